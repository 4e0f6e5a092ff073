//! # Calculations
//!
//! Every calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate_*(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! The step functions (`calculate_resolution`, `calculate_physical_size`, ...)
//! are public so front-ends can show partial results while the user types.
//!
//! ## Available Calculations
//!
//! - [`led_wall`] - LED video wall sizing (resolution, size, density, cost)

pub mod led_wall;

// Re-export commonly used types
pub use led_wall::{
    calculate_cost_estimate, calculate_led_wall, calculate_panel_count, calculate_physical_size,
    calculate_pixel_density, calculate_resolution, calculate_viewing_distance, validate_input, CostEstimate,
    LedWallInput, LedWallResult, PhysicalSize, Resolution, ViewingDistance,
};
