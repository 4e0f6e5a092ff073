//! # Presets
//!
//! Named panel configurations used to prefill a calculation. The built-in
//! presets are fixed; user-created ("custom") presets live in a
//! [`PresetStore`](store::PresetStore) on top of any key-value store.
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::presets::{default_presets, find_preset_by_id, presets_by_category, PresetCategory};
//!
//! let pitch = presets_by_category(default_presets(), PresetCategory::Pitch);
//! assert_eq!(pitch.len(), 4);
//!
//! let p = find_preset_by_id(default_presets(), "panel-500x500").unwrap();
//! assert_eq!(p.led_pitch_mm, 3.91);
//! ```

pub mod store;

pub use store::{PresetExport, PresetStore, EXPORT_VERSION};

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Preset grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetCategory {
    #[serde(rename = "panel-size")]
    PanelSize,
    #[serde(rename = "pitch")]
    Pitch,
    #[serde(rename = "use-case")]
    UseCase,
}

impl PresetCategory {
    /// All categories in display order
    pub const ALL: [PresetCategory; 3] = [PresetCategory::PanelSize, PresetCategory::Pitch, PresetCategory::UseCase];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PresetCategory::PanelSize => "Panel size",
            PresetCategory::Pitch => "Pitch",
            PresetCategory::UseCase => "Use case",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named panel configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "custom-1760745600000-3f9a2c1",
///   "name": "Lobby wall",
///   "category": "use-case",
///   "panel_width_mm": 500.0,
///   "panel_height_mm": 500.0,
///   "led_pitch_mm": 3.91,
///   "description": "Main entrance",
///   "is_custom": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub category: PresetCategory,
    /// Panel width (mm)
    pub panel_width_mm: f64,
    /// Panel height (mm)
    pub panel_height_mm: f64,
    /// LED pitch (mm)
    pub led_pitch_mm: f64,
    pub description: String,
    /// False (and omitted from JSON) for built-ins
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

/// Fields of a preset the user supplies; id and custom flag are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPreset {
    pub name: String,
    pub category: PresetCategory,
    pub panel_width_mm: f64,
    pub panel_height_mm: f64,
    pub led_pitch_mm: f64,
    pub description: String,
}

impl NewPreset {
    pub(crate) fn into_preset(self, id: String) -> Preset {
        Preset {
            id,
            name: self.name,
            category: self.category,
            panel_width_mm: self.panel_width_mm,
            panel_height_mm: self.panel_height_mm,
            led_pitch_mm: self.led_pitch_mm,
            description: self.description,
            is_custom: true,
        }
    }
}

impl From<Preset> for NewPreset {
    fn from(p: Preset) -> Self {
        NewPreset {
            name: p.name,
            category: p.category,
            panel_width_mm: p.panel_width_mm,
            panel_height_mm: p.panel_height_mm,
            led_pitch_mm: p.led_pitch_mm,
            description: p.description,
        }
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PresetCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_width_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_height_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_pitch_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PresetUpdate {
    /// Apply the provided fields to `preset`. Id and custom flag are untouched.
    pub fn apply_to(&self, preset: &mut Preset) {
        if let Some(name) = &self.name {
            preset.name = name.clone();
        }
        if let Some(category) = self.category {
            preset.category = category;
        }
        if let Some(w) = self.panel_width_mm {
            preset.panel_width_mm = w;
        }
        if let Some(h) = self.panel_height_mm {
            preset.panel_height_mm = h;
        }
        if let Some(p) = self.led_pitch_mm {
            preset.led_pitch_mm = p;
        }
        if let Some(description) = &self.description {
            preset.description = description.clone();
        }
    }
}

static DEFAULT_PRESETS: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        // Panel sizes
        Preset {
            id: "panel-500x500".to_string(),
            name: "500mm × 500mm".to_string(),
            category: PresetCategory::PanelSize,
            panel_width_mm: 500.0,
            panel_height_mm: 500.0,
            led_pitch_mm: 3.91,
            description: "Standard 500mm square panel".to_string(),
            is_custom: false,
        },
        Preset {
            id: "panel-320x320".to_string(),
            name: "320mm × 320mm".to_string(),
            category: PresetCategory::PanelSize,
            panel_width_mm: 320.0,
            panel_height_mm: 320.0,
            led_pitch_mm: 2.5,
            description: "Compact 320mm square panel".to_string(),
            is_custom: false,
        },
        Preset {
            id: "panel-250x250".to_string(),
            name: "250mm × 250mm".to_string(),
            category: PresetCategory::PanelSize,
            panel_width_mm: 250.0,
            panel_height_mm: 250.0,
            led_pitch_mm: 2.5,
            description: "Small 250mm square panel".to_string(),
            is_custom: false,
        },
        // Pitches
        Preset {
            id: "pitch-p2.5".to_string(),
            name: "P2.5 (indoor, high quality)".to_string(),
            category: PresetCategory::Pitch,
            panel_width_mm: 320.0,
            panel_height_mm: 320.0,
            led_pitch_mm: 2.5,
            description: "Indoor high-resolution display, viewing distance 2.5m+".to_string(),
            is_custom: false,
        },
        Preset {
            id: "pitch-p3.91".to_string(),
            name: "P3.91 (indoor, standard)".to_string(),
            category: PresetCategory::Pitch,
            panel_width_mm: 500.0,
            panel_height_mm: 500.0,
            led_pitch_mm: 3.91,
            description: "Indoor standard display, viewing distance 4m+".to_string(),
            is_custom: false,
        },
        Preset {
            id: "pitch-p5".to_string(),
            name: "P5 (indoor/outdoor)".to_string(),
            category: PresetCategory::Pitch,
            panel_width_mm: 640.0,
            panel_height_mm: 640.0,
            led_pitch_mm: 5.0,
            description: "Indoor/outdoor display, viewing distance 5m+".to_string(),
            is_custom: false,
        },
        Preset {
            id: "pitch-p10".to_string(),
            name: "P10 (outdoor large screen)".to_string(),
            category: PresetCategory::Pitch,
            panel_width_mm: 960.0,
            panel_height_mm: 960.0,
            led_pitch_mm: 10.0,
            description: "Outdoor large-screen display, viewing distance 10m+".to_string(),
            is_custom: false,
        },
        // Use cases
        Preset {
            id: "usecase-conference".to_string(),
            name: "Conference room".to_string(),
            category: PresetCategory::UseCase,
            panel_width_mm: 320.0,
            panel_height_mm: 320.0,
            led_pitch_mm: 2.5,
            description: "Small high-resolution display for meeting rooms (viewing distance 3-5m)".to_string(),
            is_custom: false,
        },
        Preset {
            id: "usecase-event".to_string(),
            name: "Event".to_string(),
            category: PresetCategory::UseCase,
            panel_width_mm: 500.0,
            panel_height_mm: 500.0,
            led_pitch_mm: 3.91,
            description: "Mid-size standard display for events (viewing distance 5-10m)".to_string(),
            is_custom: false,
        },
        Preset {
            id: "usecase-outdoor".to_string(),
            name: "Outdoor advertising".to_string(),
            category: PresetCategory::UseCase,
            panel_width_mm: 960.0,
            panel_height_mm: 960.0,
            led_pitch_mm: 10.0,
            description: "Large low-resolution display for outdoor advertising (viewing distance 10m+)".to_string(),
            is_custom: false,
        },
    ]
});

/// Built-in presets, in fixed order
pub fn default_presets() -> &'static [Preset] {
    &DEFAULT_PRESETS
}

/// Label for a category
pub fn category_label(category: PresetCategory) -> &'static str {
    category.label()
}

/// Presets in `category`, preserving order
pub fn presets_by_category(presets: &[Preset], category: PresetCategory) -> Vec<&Preset> {
    presets.iter().filter(|p| p.category == category).collect()
}

/// First preset with `id`
pub fn find_preset_by_id<'a>(presets: &'a [Preset], id: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets_fixed_order() {
        let ids: Vec<_> = default_presets().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "panel-500x500",
                "panel-320x320",
                "panel-250x250",
                "pitch-p2.5",
                "pitch-p3.91",
                "pitch-p5",
                "pitch-p10",
                "usecase-conference",
                "usecase-event",
                "usecase-outdoor",
            ]
        );
        assert!(default_presets().iter().all(|p| !p.is_custom));
    }

    #[test]
    fn test_presets_by_category() {
        assert_eq!(presets_by_category(default_presets(), PresetCategory::PanelSize).len(), 3);
        assert_eq!(presets_by_category(default_presets(), PresetCategory::Pitch).len(), 4);
        assert_eq!(presets_by_category(default_presets(), PresetCategory::UseCase).len(), 3);
    }

    #[test]
    fn test_find_preset_by_id() {
        let p = find_preset_by_id(default_presets(), "pitch-p10").unwrap();
        assert_eq!(p.panel_width_mm, 960.0);
        assert!(find_preset_by_id(default_presets(), "nope").is_none());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(category_label(PresetCategory::PanelSize), "Panel size");
        assert_eq!(PresetCategory::UseCase.to_string(), "Use case");
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&PresetCategory::PanelSize).unwrap(), "\"panel-size\"");
        let c: PresetCategory = serde_json::from_str("\"use-case\"").unwrap();
        assert_eq!(c, PresetCategory::UseCase);
    }

    #[test]
    fn test_builtin_omits_custom_flag() {
        let json = serde_json::to_string(&default_presets()[0]).unwrap();
        assert!(!json.contains("is_custom"));

        let parsed: Preset = serde_json::from_str(&json).unwrap();
        assert!(!parsed.is_custom);
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut p = default_presets()[0].clone();
        let update = PresetUpdate {
            name: Some("Renamed".to_string()),
            led_pitch_mm: Some(2.0),
            ..Default::default()
        };
        update.apply_to(&mut p);
        assert_eq!(p.name, "Renamed");
        assert_eq!(p.led_pitch_mm, 2.0);
        assert_eq!(p.panel_width_mm, 500.0);
        assert_eq!(p.id, "panel-500x500");
    }
}
