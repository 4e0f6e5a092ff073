//! # LED Panel Models
//!
//! Panel model definitions, data-integrity validation and the built-in
//! catalog. New models are described as [`PanelModelInput`] (id optional),
//! validated against [`PANEL_CONSTRAINTS`], and turned into [`PanelModel`]s
//! with a generated id.
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::panels::{create_panel_model, PanelModelInput};
//!
//! let input = PanelModelInput {
//!     id: None,
//!     model_number: "Q+2.5".to_string(),
//!     display_name: "Q+2.5".to_string(),
//!     series: "Q+".to_string(),
//!     panel_width_mm: 640.0,
//!     panel_height_mm: 480.0,
//!     pixel_pitch_mm: 2.5,
//!     brightness_nits: 1000.0,
//!     refresh_rate_hz: Some(3840.0),
//!     viewing_angle_deg: Some(160.0),
//!     weight_kg: Some(8.0),
//!     power_consumption_w: Some(220.0),
//!     price_per_panel_yen: None,
//!     description: "Indoor high-resolution panel".to_string(),
//!     use_case: None,
//!     image_url: None,
//! };
//!
//! let model = create_panel_model(input).unwrap();
//! assert_eq!(model.id, "q-plus-p25");
//! ```

pub mod catalog;

pub use catalog::{available_series, get_panel_model_by_id, get_panel_models_by_series, panel_models};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

/// Inclusive numeric range for a panel field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelRange {
    pub min: f64,
    pub max: f64,
}

impl PanelRange {
    pub const fn new(min: f64, max: f64) -> Self {
        PanelRange { min, max }
    }

    /// True when `value` lies within `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check `value`, failing with `OutOfRange` for `field`
    pub fn check(&self, field: &str, value: f64) -> CalcResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(CalcError::out_of_range(field, value, self.min, self.max))
        }
    }
}

/// Documented ranges for panel model fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConstraints {
    pub panel_width_mm: PanelRange,
    pub panel_height_mm: PanelRange,
    pub pixel_pitch_mm: PanelRange,
    pub brightness_nits: PanelRange,
    pub refresh_rate_hz: PanelRange,
    pub viewing_angle_deg: PanelRange,
    pub weight_kg: PanelRange,
    pub power_consumption_w: PanelRange,
    pub price_per_panel_yen: PanelRange,
}

/// Ranges every catalog entry must satisfy
pub const PANEL_CONSTRAINTS: PanelConstraints = PanelConstraints {
    panel_width_mm: PanelRange::new(100.0, 5000.0),
    panel_height_mm: PanelRange::new(100.0, 5000.0),
    pixel_pitch_mm: PanelRange::new(0.5, 50.0),
    brightness_nits: PanelRange::new(100.0, 10000.0),
    refresh_rate_hz: PanelRange::new(60.0, 7680.0),
    viewing_angle_deg: PanelRange::new(60.0, 180.0),
    weight_kg: PanelRange::new(0.1, 100.0),
    power_consumption_w: PanelRange::new(1.0, 2000.0),
    price_per_panel_yen: PanelRange::new(0.0, 10_000_000.0),
};

/// Panel model description before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelModelInput {
    /// Explicit id; generated from series and pitch when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub model_number: String,
    pub display_name: String,
    pub series: String,
    pub panel_width_mm: f64,
    pub panel_height_mm: f64,
    pub pixel_pitch_mm: f64,
    pub brightness_nits: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate_hz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewing_angle_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_consumption_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_panel_yen: Option<f64>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelModel {
    /// Unique across the catalog
    pub id: String,
    /// Manufacturer model number (e.g., "Q+2.5")
    pub model_number: String,
    pub display_name: String,
    /// Product series (e.g., "Q+")
    pub series: String,
    /// Panel width (mm)
    pub panel_width_mm: f64,
    /// Panel height (mm)
    pub panel_height_mm: f64,
    /// Distance between LED centers (mm)
    pub pixel_pitch_mm: f64,
    /// Brightness (nits)
    pub brightness_nits: f64,
    /// Refresh rate (Hz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate_hz: Option<f64>,
    /// Viewing angle (degrees)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewing_angle_deg: Option<f64>,
    /// Weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Power consumption (W)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_consumption_w: Option<f64>,
    /// List price per panel (yen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_panel_yen: Option<f64>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PanelModel {
    fn from_input(input: PanelModelInput, id: String) -> Self {
        PanelModel {
            id,
            model_number: input.model_number,
            display_name: input.display_name,
            series: input.series,
            panel_width_mm: input.panel_width_mm,
            panel_height_mm: input.panel_height_mm,
            pixel_pitch_mm: input.pixel_pitch_mm,
            brightness_nits: input.brightness_nits,
            refresh_rate_hz: input.refresh_rate_hz,
            viewing_angle_deg: input.viewing_angle_deg,
            weight_kg: input.weight_kg,
            power_consumption_w: input.power_consumption_w,
            price_per_panel_yen: input.price_per_panel_yen,
            description: input.description,
            use_case: input.use_case,
            image_url: input.image_url,
        }
    }
}

/// Summary of a panel model attached to a calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelModelInfo {
    pub id: String,
    pub model_number: String,
    pub display_name: String,
    pub series: String,
    pub brightness_nits: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate_hz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewing_angle_deg: Option<f64>,
}

impl From<&PanelModel> for PanelModelInfo {
    fn from(model: &PanelModel) -> Self {
        PanelModelInfo {
            id: model.id.clone(),
            model_number: model.model_number.clone(),
            display_name: model.display_name.clone(),
            series: model.series.clone(),
            brightness_nits: model.brightness_nits,
            refresh_rate_hz: model.refresh_rate_hz,
            viewing_angle_deg: model.viewing_angle_deg,
        }
    }
}

/// Outcome of validating one panel model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelValidation {
    pub errors: Vec<String>,
}

impl PanelValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A panel input that failed validation, with its messages
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedPanel {
    pub input: PanelModelInput,
    pub errors: Vec<String>,
}

fn require(errors: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", label));
    }
}

fn check_range(errors: &mut Vec<String>, range: PanelRange, value: f64, label: &str, unit: &str) {
    if !range.contains(value) {
        errors.push(format!("{} must be between {} and {}{}", label, range.min, range.max, unit));
    }
}

/// Validate a panel model's required fields and numeric ranges.
///
/// All problems are collected, not just the first.
pub fn validate_panel_model(panel: &PanelModelInput) -> PanelValidation {
    let c = &PANEL_CONSTRAINTS;
    let mut errors = Vec::new();

    require(&mut errors, &panel.model_number, "Model number");
    require(&mut errors, &panel.display_name, "Display name");
    require(&mut errors, &panel.series, "Series");
    require(&mut errors, &panel.description, "Description");

    check_range(&mut errors, c.panel_width_mm, panel.panel_width_mm, "Panel width", "mm");
    check_range(&mut errors, c.panel_height_mm, panel.panel_height_mm, "Panel height", "mm");
    check_range(&mut errors, c.pixel_pitch_mm, panel.pixel_pitch_mm, "Pixel pitch", "mm");
    check_range(&mut errors, c.brightness_nits, panel.brightness_nits, "Brightness", " nits");

    if let Some(v) = panel.refresh_rate_hz {
        check_range(&mut errors, c.refresh_rate_hz, v, "Refresh rate", "Hz");
    }
    if let Some(v) = panel.viewing_angle_deg {
        check_range(&mut errors, c.viewing_angle_deg, v, "Viewing angle", " degrees");
    }
    if let Some(v) = panel.weight_kg {
        check_range(&mut errors, c.weight_kg, v, "Weight", "kg");
    }
    if let Some(v) = panel.power_consumption_w {
        check_range(&mut errors, c.power_consumption_w, v, "Power consumption", "W");
    }
    if let Some(v) = panel.price_per_panel_yen {
        check_range(&mut errors, c.price_per_panel_yen, v, "Price per panel", " yen");
    }

    PanelValidation { errors }
}

/// Generate a panel id as `{series-slug}-p{pitch}`, e.g. `q-plus-p25`.
///
/// An explicit id on the input wins.
pub fn generate_panel_id(panel: &PanelModelInput) -> String {
    if let Some(id) = &panel.id {
        return id.clone();
    }

    let series = panel.series.to_lowercase().replace('+', "-plus");
    let series_slug = series.split_whitespace().collect::<Vec<_>>().join("-");
    let pitch = panel.pixel_pitch_mm.to_string().replacen('.', "", 1);
    format!("{}-p{}", series_slug, pitch)
}

/// Validate and build a panel model.
///
/// # Returns
///
/// * `Ok(PanelModel)` - Valid model with its id assigned
/// * `Err(CalcError::InvalidPanelModel)` - All validation messages
pub fn create_panel_model(input: PanelModelInput) -> CalcResult<PanelModel> {
    let validation = validate_panel_model(&input);
    if !validation.is_valid() {
        return Err(CalcError::InvalidPanelModel {
            errors: validation.errors,
        });
    }

    let id = generate_panel_id(&input);
    Ok(PanelModel::from_input(input, id))
}

/// Build many panel models, separating valid ones from rejected ones.
pub fn create_panel_models(inputs: Vec<PanelModelInput>) -> (Vec<PanelModel>, Vec<RejectedPanel>) {
    let mut panels = Vec::new();
    let mut rejected = Vec::new();

    for input in inputs {
        let validation = validate_panel_model(&input);
        if validation.is_valid() {
            let id = generate_panel_id(&input);
            panels.push(PanelModel::from_input(input, id));
        } else {
            rejected.push(RejectedPanel {
                input,
                errors: validation.errors,
            });
        }
    }

    (panels, rejected)
}

/// Validate each input, pairing it with its result.
pub fn validate_panel_models(panels: &[PanelModelInput]) -> Vec<(&PanelModelInput, PanelValidation)> {
    panels.iter().map(|p| (p, validate_panel_model(p))).collect()
}

/// Structural check that a JSON value has the shape of a [`PanelModel`].
pub fn is_valid_panel_model(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let is_str = |k: &str| obj.get(k).is_some_and(Value::is_string);
    let is_num = |k: &str| obj.get(k).is_some_and(Value::is_number);

    ["id", "model_number", "display_name", "series", "description"]
        .into_iter()
        .all(is_str)
        && ["panel_width_mm", "panel_height_mm", "pixel_pitch_mm", "brightness_nits"]
            .into_iter()
            .all(is_num)
}

/// Parse a JSON array of panel inputs into validated panel models.
///
/// Fails on invalid JSON, a non-array document, or any invalid entry.
pub fn parse_panel_data_from_json(json: &str) -> CalcResult<Vec<PanelModel>> {
    let data: Value = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON format: {}", e),
    })?;

    let Value::Array(items) = data else {
        return Err(CalcError::invalid_input(
            "panels",
            "non-array",
            "JSON data must be an array of panel objects",
        ));
    };

    let mut inputs = Vec::with_capacity(items.len());
    let mut messages = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<PanelModelInput>(item) {
            Ok(input) => inputs.push(input),
            Err(e) => messages.push(format!("Panel #{}: {}", index, e)),
        }
    }

    let (panels, rejected) = create_panel_models(inputs);
    messages.extend(
        rejected
            .iter()
            .map(|r| format!("Panel \"{}\": {}", r.input.model_number, r.errors.join(", "))),
    );

    if !messages.is_empty() {
        return Err(CalcError::InvalidPanelModel { errors: messages });
    }

    Ok(panels)
}
