//! # Error Types
//!
//! Structured error types for ledwall_core. Every calculation failure carries
//! a machine-checkable kind (see [`CalcError::error_code`]) and a
//! human-readable message (the `Display` impl), so a front-end can both
//! branch on the failure and show it to the user.
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pitch(led_pitch_mm: f64) -> CalcResult<()> {
//!     if led_pitch_mm <= 0.0 {
//!         return Err(CalcError::zero_division("LED pitch must be greater than zero"));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_pitch(0.0).unwrap_err();
//! assert_eq!(err.error_code(), "ZERO_DIVISION");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;

/// Result type alias for ledwall_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation, catalog and preset operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, not an integer, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A divisor would be zero (LED pitch, wall area)
    #[error("Division by zero: {reason}")]
    ZeroDivision { reason: String },

    /// A value falls outside its documented range
    #[error("Out of range for '{field}': {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: f64,
        max: f64,
    },

    /// A panel model failed catalog validation
    #[error("Invalid panel model: {}", .errors.join(", "))]
    InvalidPanelModel { errors: Vec<String> },

    /// Preset import data has the wrong shape
    #[error("Invalid preset data format: {reason}")]
    InvalidPresetData { reason: String },

    /// Key-value store failure surfaced to the caller
    #[error("Storage error: {operation} on '{key}' - {reason}")]
    StorageError {
        operation: String,
        key: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ZeroDivision error
    pub fn zero_division(reason: impl Into<String>) -> Self {
        CalcError::ZeroDivision {
            reason: reason.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min,
            max,
        }
    }

    /// Create an InvalidPresetData error
    pub fn invalid_preset_data(reason: impl Into<String>) -> Self {
        CalcError::InvalidPresetData {
            reason: reason.into(),
        }
    }

    /// Create a StorageError
    pub fn storage_error(operation: impl Into<String>, key: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::StorageError {
            operation: operation.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ZeroDivision { .. } => "ZERO_DIVISION",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidPanelModel { .. } => "INVALID_PANEL_MODEL",
            CalcError::InvalidPresetData { .. } => "INVALID_PRESET_DATA",
            CalcError::StorageError { .. } => "STORAGE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// True for the three kinds the calculation engine produces
    pub fn is_calculation_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::ZeroDivision { .. } | CalcError::OutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

impl From<StoreError> for CalcError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable { reason } => CalcError::storage_error("access", "", reason),
            StoreError::Io { operation, key, reason } => CalcError::storage_error(operation, key, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("screen_width", "2.5", "Screen size must be a whole number of panels");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::zero_division("area is zero").error_code(), "ZERO_DIVISION");
        assert_eq!(CalcError::out_of_range("brightness_nits", 50.0, 100.0, 10000.0).error_code(), "OUT_OF_RANGE");
        assert_eq!(CalcError::invalid_preset_data("missing presets").error_code(), "INVALID_PRESET_DATA");
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::zero_division("area is zero, cannot compute pixel density");
        assert_eq!(err.to_string(), "Division by zero: area is zero, cannot compute pixel density");

        let err = CalcError::InvalidPanelModel {
            errors: vec!["Model number is required".to_string(), "Series is required".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid panel model: Model number is required, Series is required");
    }

    #[test]
    fn test_calculation_kinds() {
        assert!(CalcError::zero_division("x").is_calculation_error());
        assert!(CalcError::out_of_range("x", 1.0, 2.0, 3.0).is_calculation_error());
        assert!(!CalcError::invalid_preset_data("x").is_calculation_error());
    }

    #[test]
    fn test_store_error_conversion() {
        let err: CalcError = StoreError::io("write", "led-calculator-presets", "disk full").into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("disk full"));
    }
}
