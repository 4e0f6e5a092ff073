//! # LED Wall Calculation
//!
//! Derives the resolution, physical size, pixel density, viewing distances
//! and (optionally) the cost of a wall built from a grid of identical panels.
//!
//! ## Formulas
//!
//! - Pixels per panel = floor(panel dimension / pitch). Partial LEDs do not
//!   exist, so this truncates rather than rounds.
//! - Physical size = panel dimension × panel count (mm); area in m²
//! - Pixel density = total pixels / area (pixels/m²)
//! - Viewing distance: minimum = pitch in meters-equivalent, optimal =
//!   3.5 × largest dimension, maximum = 10 × largest dimension
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::calculations::led_wall::{calculate_led_wall, LedWallInput};
//!
//! let input = LedWallInput {
//!     panel_width_mm: 500.0,
//!     panel_height_mm: 500.0,
//!     screen_width: 4.0,
//!     screen_height: 3.0,
//!     led_pitch_mm: 2.5,
//!     price_per_panel_yen: Some(100_000.0),
//!     selected_panel_id: None,
//! };
//!
//! let result = calculate_led_wall(&input).unwrap();
//! assert_eq!(result.resolution.width_px, 800);
//! assert_eq!(result.resolution.height_px, 600);
//! assert_eq!(result.physical_size.area_m2, 3.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::panels::{get_panel_model_by_id, PanelModelInfo};
use crate::units::{round_half_up, round_to_tenth, Meters, Millimeters, SquareMeters, SquareMillimeters};

/// Largest whole number an `f64` holds exactly (2^53). Screen and per-panel
/// pixel counts above it cannot be converted to integers faithfully.
pub const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Input parameters for an LED wall.
///
/// ## JSON Example
///
/// ```json
/// {
///   "panel_width_mm": 500.0,
///   "panel_height_mm": 500.0,
///   "screen_width": 4,
///   "screen_height": 3,
///   "led_pitch_mm": 2.5,
///   "price_per_panel_yen": 100000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedWallInput {
    /// Panel width (mm)
    pub panel_width_mm: f64,

    /// Panel height (mm)
    pub panel_height_mm: f64,

    /// Panels across. Kept as a JSON number so fractional input can be rejected.
    pub screen_width: f64,

    /// Panels down
    pub screen_height: f64,

    /// LED pitch (mm)
    pub led_pitch_mm: f64,

    /// Price per panel (yen); enables the cost estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_panel_yen: Option<f64>,

    /// Catalog id of the chosen panel model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_panel_id: Option<String>,
}

impl LedWallInput {
    /// Validate input parameters. See [`validate_input`].
    pub fn validate(&self) -> CalcResult<()> {
        validate_input(self)
    }

    /// Panels across as an integer. Only meaningful after validation.
    pub fn screen_width_panels(&self) -> u64 {
        self.screen_width as u64
    }

    /// Panels down as an integer. Only meaningful after validation.
    pub fn screen_height_panels(&self) -> u64 {
        self.screen_height as u64
    }
}

/// Total resolution of the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width_px: u64,
    pub height_px: u64,
    pub total_pixels: u64,
}

/// Physical dimensions of the wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
    pub area_m2: f64,
}

/// Recommended viewing distances, each rounded to 0.1 m
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewingDistance {
    pub minimum_m: f64,
    pub optimal_m: f64,
    pub maximum_m: f64,
}

/// Cost estimate, yen amounts rounded to integers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub panel_count: u64,
    pub total_cost_yen: f64,
    pub cost_per_m2_yen: f64,
}

/// Complete results for an LED wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedWallResult {
    /// Echo of the input
    pub input: LedWallInput,

    /// screen_width × screen_height
    pub panel_count: u64,

    pub resolution: Resolution,

    pub physical_size: PhysicalSize,

    /// Pixels per m², rounded to the nearest integer
    pub pixel_density: f64,

    pub viewing_distance: ViewingDistance,

    /// Present only when a price per panel was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<CostEstimate>,

    /// Present only when the selected panel id exists in the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_model: Option<PanelModelInfo>,
}

fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Validate input parameters.
///
/// # Errors
///
/// * `InvalidInput` - non-positive panel size, non-positive or fractional
///   screen size, negative price, or any non-finite number
/// * `OutOfRange` - screen size above [`MAX_EXACT_COUNT`] panels
/// * `ZeroDivision` - LED pitch is zero or negative
pub fn validate_input(input: &LedWallInput) -> CalcResult<()> {
    require_finite("panel_width_mm", input.panel_width_mm)?;
    require_finite("panel_height_mm", input.panel_height_mm)?;
    require_finite("screen_width", input.screen_width)?;
    require_finite("screen_height", input.screen_height)?;
    require_finite("led_pitch_mm", input.led_pitch_mm)?;

    if input.panel_width_mm <= 0.0 {
        return Err(CalcError::invalid_input(
            "panel_width_mm",
            input.panel_width_mm.to_string(),
            "Panel size must be greater than zero",
        ));
    }
    if input.panel_height_mm <= 0.0 {
        return Err(CalcError::invalid_input(
            "panel_height_mm",
            input.panel_height_mm.to_string(),
            "Panel size must be greater than zero",
        ));
    }
    if input.screen_width <= 0.0 {
        return Err(CalcError::invalid_input(
            "screen_width",
            input.screen_width.to_string(),
            "Screen size (panels) must be greater than zero",
        ));
    }
    if input.screen_height <= 0.0 {
        return Err(CalcError::invalid_input(
            "screen_height",
            input.screen_height.to_string(),
            "Screen size (panels) must be greater than zero",
        ));
    }
    if input.screen_width.fract() != 0.0 {
        return Err(CalcError::invalid_input(
            "screen_width",
            input.screen_width.to_string(),
            "Screen size (panels) must be a whole number",
        ));
    }
    if input.screen_height.fract() != 0.0 {
        return Err(CalcError::invalid_input(
            "screen_height",
            input.screen_height.to_string(),
            "Screen size (panels) must be a whole number",
        ));
    }
    if input.screen_width > MAX_EXACT_COUNT {
        return Err(CalcError::out_of_range("screen_width", input.screen_width, 1.0, MAX_EXACT_COUNT));
    }
    if input.screen_height > MAX_EXACT_COUNT {
        return Err(CalcError::out_of_range("screen_height", input.screen_height, 1.0, MAX_EXACT_COUNT));
    }
    if input.led_pitch_mm <= 0.0 {
        return Err(CalcError::zero_division("LED pitch must be greater than zero"));
    }
    if let Some(price) = input.price_per_panel_yen {
        require_finite("price_per_panel_yen", price)?;
        if price < 0.0 {
            return Err(CalcError::invalid_input(
                "price_per_panel_yen",
                price.to_string(),
                "Price per panel must be zero or more",
            ));
        }
    }
    Ok(())
}

fn checked_product(field: &str, a: u64, b: u64) -> CalcResult<u64> {
    a.checked_mul(b)
        .ok_or_else(|| CalcError::out_of_range(field, a as f64 * b as f64, 0.0, u64::MAX as f64))
}

fn pixels_per_panel(field: &str, panel_mm: f64, pitch_mm: f64) -> CalcResult<u64> {
    let pixels = (panel_mm / pitch_mm).floor();
    if pixels > MAX_EXACT_COUNT {
        return Err(CalcError::out_of_range(field, pixels, 0.0, MAX_EXACT_COUNT));
    }
    Ok(pixels as u64)
}

/// Total number of panels: `screen_width × screen_height`.
///
/// # Errors
///
/// * `OutOfRange` - the product does not fit in a `u64`
pub fn calculate_panel_count(screen_width: u64, screen_height: u64) -> CalcResult<u64> {
    checked_product("panel_count", screen_width, screen_height)
}

/// Total resolution. Pixels per panel are truncated, never rounded.
///
/// # Errors
///
/// * `OutOfRange` - a pixel count does not fit in a `u64`
pub fn calculate_resolution(input: &LedWallInput) -> CalcResult<Resolution> {
    let per_panel_width = pixels_per_panel("pixels_per_panel_width", input.panel_width_mm, input.led_pitch_mm)?;
    let per_panel_height = pixels_per_panel("pixels_per_panel_height", input.panel_height_mm, input.led_pitch_mm)?;

    let width_px = checked_product("width_px", per_panel_width, input.screen_width_panels())?;
    let height_px = checked_product("height_px", per_panel_height, input.screen_height_panels())?;

    Ok(Resolution {
        width_px,
        height_px,
        total_pixels: checked_product("total_pixels", width_px, height_px)?,
    })
}

/// Physical size in mm and area in m² (unrounded)
pub fn calculate_physical_size(input: &LedWallInput) -> PhysicalSize {
    let width_mm = input.panel_width_mm * input.screen_width;
    let height_mm = input.panel_height_mm * input.screen_height;
    let area: SquareMeters = SquareMillimeters(width_mm * height_mm).into();

    PhysicalSize {
        width_mm,
        height_mm,
        area_m2: area.0,
    }
}

/// Pixel density in pixels/m² (unrounded).
///
/// # Errors
///
/// * `ZeroDivision` - the area is zero
pub fn calculate_pixel_density(resolution: &Resolution, physical_size: &PhysicalSize) -> CalcResult<f64> {
    if physical_size.area_m2 == 0.0 {
        return Err(CalcError::zero_division("area is zero, cannot compute pixel density"));
    }
    Ok(resolution.total_pixels as f64 / physical_size.area_m2)
}

/// Recommended viewing distances in meters, rounded half-up to 0.1 m.
pub fn calculate_viewing_distance(input: &LedWallInput, physical_size: &PhysicalSize) -> ViewingDistance {
    let max_dimension_mm = physical_size.width_mm.max(physical_size.height_mm);

    // The pitch value is reused as meters: pitch × 1000 mm, back to m
    let minimum: Meters = Millimeters(input.led_pitch_mm * 1000.0).into();
    let optimal: Meters = Millimeters(max_dimension_mm * 3.5).into();
    let maximum: Meters = Millimeters(max_dimension_mm * 10.0).into();

    ViewingDistance {
        minimum_m: round_to_tenth(minimum.0),
        optimal_m: round_to_tenth(optimal.0),
        maximum_m: round_to_tenth(maximum.0),
    }
}

/// Cost estimate with integer-rounded yen amounts.
///
/// # Errors
///
/// * `ZeroDivision` - the area is zero
pub fn calculate_cost_estimate(panel_count: u64, price_per_panel_yen: f64, area_m2: f64) -> CalcResult<CostEstimate> {
    if area_m2 == 0.0 {
        return Err(CalcError::zero_division("area is zero, cannot compute cost per square meter"));
    }

    let total_cost_yen = round_half_up(panel_count as f64 * price_per_panel_yen);
    let cost_per_m2_yen = round_half_up(total_cost_yen / area_m2);

    Ok(CostEstimate {
        panel_count,
        total_cost_yen,
        cost_per_m2_yen,
    })
}

/// Calculate every derived value for an LED wall.
///
/// Validation runs first; any failure from an inner step is returned
/// unchanged. An unknown `selected_panel_id` is not an error, the panel
/// summary is simply omitted.
///
/// # Arguments
///
/// * `input` - Wall parameters
///
/// # Returns
///
/// * `Ok(LedWallResult)` - Calculation results
/// * `Err(CalcError)` - `InvalidInput`, `ZeroDivision`, or `OutOfRange`
///   when a count is too large to represent
pub fn calculate_led_wall(input: &LedWallInput) -> CalcResult<LedWallResult> {
    validate_input(input)?;

    let panel_count = calculate_panel_count(input.screen_width_panels(), input.screen_height_panels())?;
    let resolution = calculate_resolution(input)?;
    let physical_size = calculate_physical_size(input);
    let pixel_density = round_half_up(calculate_pixel_density(&resolution, &physical_size)?);
    let viewing_distance = calculate_viewing_distance(input, &physical_size);

    let cost_estimate = match input.price_per_panel_yen {
        Some(price) => Some(calculate_cost_estimate(panel_count, price, physical_size.area_m2)?),
        None => None,
    };

    let panel_model = match input.selected_panel_id.as_deref() {
        Some(id) => {
            let found = get_panel_model_by_id(id).map(PanelModelInfo::from);
            if found.is_none() {
                log::debug!("panel model '{}' not in catalog, omitting from result", id);
            }
            found
        }
        None => None,
    };

    log::debug!(
        "calculated {}x{} wall: {}x{} px, {:.2} m²",
        input.screen_width,
        input.screen_height,
        resolution.width_px,
        resolution.height_px,
        physical_size.area_m2
    );

    Ok(LedWallResult {
        input: input.clone(),
        panel_count,
        resolution,
        physical_size,
        pixel_density,
        viewing_distance,
        cost_estimate,
        panel_model,
    })
}
