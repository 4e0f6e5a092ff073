//! Built-in Panel Catalog
//!
//! Q+ series indoor/outdoor LED panels. Entries are validated once on first
//! access; an entry that fails validation is logged and left out.
//!
//! To add a model, append a [`PanelModelInput`] to `catalog_inputs` and run
//! the tests (they guard that every entry is valid and ids are unique).

use once_cell::sync::Lazy;

use super::{create_panel_models, PanelModel, PanelModelInput};

/// Fields shared by every Q+ panel
fn q_plus() -> PanelModelInput {
    PanelModelInput {
        id: None,
        model_number: String::new(),
        display_name: String::new(),
        series: "Q+".to_string(),
        panel_width_mm: 0.0,
        panel_height_mm: 0.0,
        pixel_pitch_mm: 0.0,
        brightness_nits: 0.0,
        refresh_rate_hz: Some(3840.0),
        viewing_angle_deg: Some(160.0),
        weight_kg: None,
        power_consumption_w: None,
        price_per_panel_yen: None,
        description: String::new(),
        use_case: None,
        image_url: None,
    }
}

fn catalog_inputs() -> Vec<PanelModelInput> {
    vec![
        PanelModelInput {
            id: Some("q-plus-p1.5".to_string()),
            model_number: "Q+1.5".to_string(),
            display_name: "Q+1.5".to_string(),
            panel_width_mm: 600.0,
            panel_height_mm: 337.5,
            pixel_pitch_mm: 1.5,
            brightness_nits: 800.0,
            weight_kg: Some(6.5),
            power_consumption_w: Some(180.0),
            description: "Ultra-high-resolution indoor panel for very close viewing".to_string(),
            use_case: Some("Meeting rooms, showrooms, boutiques".to_string()),
            ..q_plus()
        },
        PanelModelInput {
            id: Some("q-plus-p1.9".to_string()),
            model_number: "Q+1.9".to_string(),
            display_name: "Q+1.9".to_string(),
            panel_width_mm: 600.0,
            panel_height_mm: 337.5,
            pixel_pitch_mm: 1.9,
            brightness_nits: 800.0,
            weight_kg: Some(6.5),
            power_consumption_w: Some(180.0),
            description: "High-resolution indoor panel for close viewing".to_string(),
            use_case: Some("Meeting rooms, presentation rooms, exhibitions".to_string()),
            ..q_plus()
        },
        PanelModelInput {
            id: Some("q-plus-p2.5".to_string()),
            model_number: "Q+2.5".to_string(),
            display_name: "Q+2.5".to_string(),
            panel_width_mm: 640.0,
            panel_height_mm: 480.0,
            pixel_pitch_mm: 2.5,
            brightness_nits: 1000.0,
            weight_kg: Some(8.0),
            power_consumption_w: Some(220.0),
            description: "High-resolution indoor panel for standard viewing distances".to_string(),
            use_case: Some("Event venues, shopping malls, corporate lobbies".to_string()),
            ..q_plus()
        },
        PanelModelInput {
            id: Some("q-plus-p3.0".to_string()),
            model_number: "Q+3.0".to_string(),
            display_name: "Q+3.0".to_string(),
            panel_width_mm: 576.0,
            panel_height_mm: 576.0,
            pixel_pitch_mm: 3.0,
            brightness_nits: 1200.0,
            weight_kg: Some(9.0),
            power_consumption_w: Some(250.0),
            description: "Balanced indoor panel for mid-range viewing".to_string(),
            use_case: Some("Event venues, halls, large meeting rooms".to_string()),
            ..q_plus()
        },
        PanelModelInput {
            id: Some("q-plus-p3.9".to_string()),
            model_number: "Q+3.9".to_string(),
            display_name: "Q+3.9".to_string(),
            panel_width_mm: 500.0,
            panel_height_mm: 500.0,
            pixel_pitch_mm: 3.91,
            brightness_nits: 1200.0,
            weight_kg: Some(7.5),
            power_consumption_w: Some(230.0),
            description: "Versatile indoor panel for a wide range of uses".to_string(),
            use_case: Some("Rental, events, concerts, exhibitions".to_string()),
            ..q_plus()
        },
        PanelModelInput {
            id: Some("q-plus-p4.8".to_string()),
            model_number: "Q+4.8".to_string(),
            display_name: "Q+4.8".to_string(),
            panel_width_mm: 576.0,
            panel_height_mm: 576.0,
            pixel_pitch_mm: 4.8,
            brightness_nits: 1500.0,
            weight_kg: Some(9.5),
            power_consumption_w: Some(280.0),
            description: "Indoor/outdoor panel for long viewing distances".to_string(),
            use_case: Some("Stadiums, large events, outdoor advertising".to_string()),
            ..q_plus()
        },
    ]
}

static PANEL_MODELS: Lazy<Vec<PanelModel>> = Lazy::new(|| {
    let (panels, rejected) = create_panel_models(catalog_inputs());
    for r in &rejected {
        log::error!(
            "invalid built-in panel model \"{}\": {}",
            r.input.model_number,
            r.errors.join(", ")
        );
    }
    panels
});

/// All built-in panel models
pub fn panel_models() -> &'static [PanelModel] {
    &PANEL_MODELS
}

/// Look up a panel model by id
pub fn get_panel_model_by_id(id: &str) -> Option<&'static PanelModel> {
    PANEL_MODELS.iter().find(|m| m.id == id)
}

/// All panel models in a series
pub fn get_panel_models_by_series(series: &str) -> Vec<&'static PanelModel> {
    PANEL_MODELS.iter().filter(|m| m.series == series).collect()
}

/// Distinct series names, in catalog order
pub fn available_series() -> Vec<&'static str> {
    let mut series: Vec<&'static str> = Vec::new();
    for model in PANEL_MODELS.iter() {
        if !series.contains(&model.series.as_str()) {
            series.push(&model.series);
        }
    }
    series
}
