//! # Unit Types
//!
//! Type-safe wrappers for the handful of units an LED wall calculation
//! touches. They are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## Units
//!
//! - Length: millimeters (panel sizes, pitch), meters (viewing distance)
//! - Area: square millimeters, square meters
//!
//! Yen amounts stay plain `f64` fields named `*_yen`.
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::units::{Meters, Millimeters, SquareMeters, SquareMillimeters};
//!
//! let width: Meters = Millimeters(2000.0).into();
//! assert_eq!(width.0, 2.0);
//!
//! let area: SquareMeters = SquareMillimeters(3_000_000.0).into();
//! assert_eq!(area.0, 3.0);
//! ```

use serde::{Deserialize, Serialize};

/// Millimeters in one meter
pub const MM_PER_M: f64 = 1000.0;

/// Square millimeters in one square meter
pub const MM2_PER_M2: f64 = 1_000_000.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / MM_PER_M)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl From<SquareMillimeters> for SquareMeters {
    fn from(mm2: SquareMillimeters) -> Self {
        SquareMeters(mm2.0 / MM2_PER_M2)
    }
}

impl From<SquareMeters> for SquareMillimeters {
    fn from(m2: SquareMeters) -> Self {
        SquareMillimeters(m2.0 * MM2_PER_M2)
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round half up to the nearest integer (0.5 goes to 1, -0.5 goes to 0).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half up at the tenths digit.
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
