//! # LED Wall Calculator CLI
//!
//! Terminal front-end for the LED wall calculation engine. A small menu lets
//! the user run a calculation (optionally prefilled from a preset), save the
//! last configuration as a custom preset, delete custom presets, and export
//! or import them as JSON files.
//!
//! Custom presets are read from the file-backed store configured through
//! `LEDWALL_DATA_DIR` / `LEDWALL_PRESETS_KEY`. Set `RUST_LOG=debug` for
//! engine logging.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use ledwall_core::calculations::{calculate_led_wall, LedWallInput, LedWallResult};
use ledwall_core::format::{
    format_area, format_aspect_ratio, format_currency, format_distance, format_panel_count, format_physical_size,
    format_pixel_density, format_resolution,
};
use ledwall_core::presets::{default_presets, presets_by_category, NewPreset, Preset, PresetCategory, PresetStore};
use ledwall_core::storage::FileStore;
use ledwall_core::{CalcError, CalcResult, KeyValueStore, Settings};

const DEFAULT_EXPORT_FILE: &str = "led-presets.json";

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return None;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read one trimmed line; None at end of input
fn prompt_choice(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_optional_f64(prompt: &str) -> Option<f64> {
    prompt_line(prompt).and_then(|s| s.parse().ok())
}

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Calculate,
    SavePreset,
    DeletePreset,
    Export,
    Import,
    Quit,
}

impl Action {
    fn parse(choice: &str) -> Option<Action> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "c" | "calc" => Some(Action::Calculate),
            "2" | "s" | "save" => Some(Action::SavePreset),
            "3" | "d" | "delete" => Some(Action::DeletePreset),
            "4" | "e" | "export" => Some(Action::Export),
            "5" | "i" | "import" => Some(Action::Import),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

fn print_menu() {
    println!();
    println!("  1. Calculate");
    println!("  2. Save last configuration as preset");
    println!("  3. Delete a custom preset");
    println!("  4. Export custom presets to a file");
    println!("  5. Import presets from a file");
    println!("  q. Quit");
}

fn print_presets(presets: &[Preset]) {
    let mut index = 1;
    for category in PresetCategory::ALL {
        let group = presets_by_category(presets, category);
        if group.is_empty() {
            continue;
        }
        println!("{}:", category.label());
        for preset in group {
            let marker = if preset.is_custom { " *" } else { "" };
            println!(
                "  {:>2}. {}{} ({} × {} mm, P{})",
                index, preset.name, marker, preset.panel_width_mm, preset.panel_height_mm, preset.led_pitch_mm
            );
            index += 1;
        }
    }
    println!("  (* = custom preset)");
}

/// Presets in the order `print_presets` numbers them
fn numbered(presets: &[Preset]) -> Vec<&Preset> {
    PresetCategory::ALL
        .into_iter()
        .flat_map(|c| presets_by_category(presets, c))
        .collect()
}

/// Pick an entry by its 1-based number
fn pick<'a>(items: &[&'a Preset], choice: &str) -> Option<&'a Preset> {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| items.get(i).copied())
}

fn print_result(result: &LedWallResult) {
    let physical = format_physical_size(result.physical_size.width_mm, result.physical_size.height_mm);

    println!("═══════════════════════════════════════");
    println!("  LED WALL CALCULATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    if let Some(model) = &result.panel_model {
        println!("Panel:       {} ({} series, {} nits)", model.display_name, model.series, model.brightness_nits);
    }
    println!(
        "Panels:      {}",
        format_panel_count(
            result.panel_count,
            result.input.screen_width_panels(),
            result.input.screen_height_panels()
        )
    );
    println!("Resolution:  {}", format_resolution(result.resolution.width_px, result.resolution.height_px));
    println!(
        "Aspect:      {}",
        format_aspect_ratio(result.resolution.width_px, result.resolution.height_px)
    );
    println!("Size:        {} ({})", physical.meters, physical.millimeters);
    println!("Area:        {}", format_area(result.physical_size.area_m2));
    println!("Density:     {}", format_pixel_density(result.pixel_density));
    println!();
    println!("Viewing distance:");
    println!("  Minimum:   {}", format_distance(result.viewing_distance.minimum_m));
    println!("  Optimal:   {}", format_distance(result.viewing_distance.optimal_m));
    println!("  Maximum:   {}", format_distance(result.viewing_distance.maximum_m));

    if let Some(cost) = &result.cost_estimate {
        println!();
        println!("Cost estimate:");
        println!("  Total:     {}", format_currency(cost.total_cost_yen));
        println!("  Per m²:    {}", format_currency(cost.cost_per_m2_yen));
    }
    println!("═══════════════════════════════════════");
}

fn print_error(e: &CalcError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

/// Prompt for a wall, calculate it and print the report. Returns the input
/// when the calculation succeeded.
fn run_calculation(presets: &[Preset]) -> Option<LedWallInput> {
    print_presets(presets);
    println!();

    let ordered = numbered(presets);
    let chosen = prompt_line("Choose a preset number [none]: ").and_then(|s| pick(&ordered, &s));

    let (def_w, def_h, def_pitch) = match chosen {
        Some(p) => {
            println!("Using preset '{}'", p.name);
            (p.panel_width_mm, p.panel_height_mm, p.led_pitch_mm)
        }
        None => (500.0, 500.0, 2.5),
    };

    let panel_width_mm = prompt_f64(&format!("Panel width (mm) [{}]: ", def_w), def_w);
    let panel_height_mm = prompt_f64(&format!("Panel height (mm) [{}]: ", def_h), def_h);
    let led_pitch_mm = prompt_f64(&format!("LED pitch (mm) [{}]: ", def_pitch), def_pitch);
    let screen_width = prompt_f64("Panels across [4]: ", 4.0);
    let screen_height = prompt_f64("Panels down [3]: ", 3.0);
    let price_per_panel_yen = prompt_optional_f64("Price per panel (yen) [skip]: ");
    let selected_panel_id = prompt_line("Panel model id, e.g. q-plus-p2.5 [skip]: ");

    let input = LedWallInput {
        panel_width_mm,
        panel_height_mm,
        screen_width,
        screen_height,
        led_pitch_mm,
        price_per_panel_yen,
        selected_panel_id,
    };

    println!();

    match calculate_led_wall(&input) {
        Ok(result) => {
            print_result(&result);

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
            Some(input)
        }
        Err(e) => {
            print_error(&e);
            None
        }
    }
}

/// Category from a menu choice (1-3 or the serialized name); defaults to use case
fn category_from_choice(choice: Option<&str>) -> PresetCategory {
    match choice.map(|c| c.trim().to_lowercase()).as_deref() {
        Some("1") | Some("panel-size") => PresetCategory::PanelSize,
        Some("2") | Some("pitch") => PresetCategory::Pitch,
        _ => PresetCategory::UseCase,
    }
}

/// Preset holding the panel dimensions of a calculated wall
fn preset_from_input(name: String, category: PresetCategory, description: String, input: &LedWallInput) -> NewPreset {
    NewPreset {
        name,
        category,
        panel_width_mm: input.panel_width_mm,
        panel_height_mm: input.panel_height_mm,
        led_pitch_mm: input.led_pitch_mm,
        description,
    }
}

fn save_preset<S: KeyValueStore>(store: &mut PresetStore<S>, input: &LedWallInput) {
    let Some(name) = prompt_line("Preset name: ") else {
        println!("A name is required, nothing saved.");
        return;
    };

    for (i, category) in PresetCategory::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, category.label());
    }
    let category = category_from_choice(prompt_line("Category [3]: ").as_deref());
    let description = prompt_line("Description [none]: ").unwrap_or_default();

    match store.add_custom(preset_from_input(name, category, description, input)) {
        Ok(preset) => println!("Saved preset '{}' ({})", preset.name, preset.id),
        Err(e) => print_error(&e),
    }
}

fn delete_preset<S: KeyValueStore>(store: &mut PresetStore<S>) {
    let customs = store.load_custom();
    if customs.is_empty() {
        println!("No custom presets to delete.");
        return;
    }

    for (i, preset) in customs.iter().enumerate() {
        println!("  {:>2}. {} ({})", i + 1, preset.name, preset.category.label());
    }

    let ordered: Vec<&Preset> = customs.iter().collect();
    let Some(preset) = prompt_line("Delete which preset? [none]: ").and_then(|s| pick(&ordered, &s)) else {
        return;
    };

    if store.delete_custom(&preset.id) {
        println!("Deleted preset '{}'", preset.name);
    } else {
        println!("Could not delete preset '{}'", preset.name);
    }
}

/// Write the custom presets as an export file; returns how many were written
fn export_to_file<S: KeyValueStore>(store: &PresetStore<S>, path: &Path) -> CalcResult<usize> {
    let export = store.export_custom();
    let json = serde_json::to_string_pretty(&export)?;
    fs::write(path, json).map_err(|e| CalcError::storage_error("export", path.display().to_string(), e.to_string()))?;
    Ok(export.presets.len())
}

/// Read an export file and append its presets as new custom presets
fn import_from_file<S: KeyValueStore>(store: &mut PresetStore<S>, path: &Path) -> CalcResult<Vec<Preset>> {
    let json = fs::read_to_string(path)
        .map_err(|e| CalcError::storage_error("import", path.display().to_string(), e.to_string()))?;
    store.import_json(&json)
}

fn prompt_path(prompt: &str) -> String {
    prompt_line(&format!("{} [{}]: ", prompt, DEFAULT_EXPORT_FILE)).unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();
    log::debug!("using settings {:?}", settings);

    println!("LED Wall Calculator");
    println!("===================");

    let mut store = match FileStore::open(&settings.data_dir) {
        Ok(files) => Some(PresetStore::with_key(files, settings.presets_key.clone())),
        Err(e) => {
            log::warn!("custom presets unavailable ({}), showing built-ins only", e);
            None
        }
    };

    let mut last_input: Option<LedWallInput> = None;

    loop {
        print_menu();
        let Some(choice) = prompt_choice("Choose an action [1]: ") else {
            break;
        };
        let choice = if choice.is_empty() { "1".to_string() } else { choice };
        let Some(action) = Action::parse(&choice) else {
            println!("Unknown choice '{}'", choice);
            continue;
        };
        println!();

        if action == Action::Quit {
            break;
        }
        if action == Action::Calculate {
            let presets = match &store {
                Some(s) => s.get_all(),
                None => default_presets().to_vec(),
            };
            if let Some(input) = run_calculation(&presets) {
                last_input = Some(input);
            }
            continue;
        }

        let Some(store) = store.as_mut() else {
            println!("Preset storage is unavailable; only calculations are possible.");
            continue;
        };

        match action {
            Action::SavePreset => match &last_input {
                Some(input) => save_preset(store, input),
                None => println!("Run a calculation first."),
            },
            Action::DeletePreset => delete_preset(store),
            Action::Export => {
                let path = prompt_path("Export to");
                match export_to_file(store, Path::new(&path)) {
                    Ok(count) => println!("Exported {} preset(s) to {}", count, path),
                    Err(e) => print_error(&e),
                }
            }
            Action::Import => {
                let path = prompt_path("Import from");
                match import_from_file(store, Path::new(&path)) {
                    Ok(imported) => println!("Imported {} preset(s) from {}", imported.len(), path),
                    Err(e) => print_error(&e),
                }
            }
            Action::Calculate | Action::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledwall_core::MemoryStore;
    use std::env::temp_dir;

    fn test_wall() -> LedWallInput {
        LedWallInput {
            panel_width_mm: 640.0,
            panel_height_mm: 480.0,
            screen_width: 6.0,
            screen_height: 4.0,
            led_pitch_mm: 2.5,
            price_per_panel_yen: None,
            selected_panel_id: None,
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("1"), Some(Action::Calculate));
        assert_eq!(Action::parse(" Save "), Some(Action::SavePreset));
        assert_eq!(Action::parse("3"), Some(Action::DeletePreset));
        assert_eq!(Action::parse("e"), Some(Action::Export));
        assert_eq!(Action::parse("import"), Some(Action::Import));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("9"), None);
    }

    #[test]
    fn test_category_from_choice() {
        assert_eq!(category_from_choice(Some("1")), PresetCategory::PanelSize);
        assert_eq!(category_from_choice(Some("pitch")), PresetCategory::Pitch);
        assert_eq!(category_from_choice(Some("3")), PresetCategory::UseCase);
        assert_eq!(category_from_choice(None), PresetCategory::UseCase);
    }

    #[test]
    fn test_pick_is_one_based() {
        let presets = default_presets().to_vec();
        let ordered = numbered(&presets);
        assert_eq!(pick(&ordered, "1").map(|p| p.id.as_str()), Some("panel-500x500"));
        assert!(pick(&ordered, "0").is_none());
        assert!(pick(&ordered, "99").is_none());
        assert!(pick(&ordered, "x").is_none());
    }

    #[test]
    fn test_saved_configuration_becomes_custom_preset() {
        let mut store = PresetStore::new(MemoryStore::new());
        let new = preset_from_input("Stage".to_string(), PresetCategory::UseCase, String::new(), &test_wall());
        let saved = store.add_custom(new).unwrap();

        assert!(saved.is_custom);
        assert_eq!(saved.panel_width_mm, 640.0);
        assert_eq!(saved.panel_height_mm, 480.0);
        assert_eq!(saved.led_pitch_mm, 2.5);
        assert_eq!(store.get_all().last(), Some(&saved));
    }

    #[test]
    fn test_export_then_import_file() {
        let path = temp_dir().join(format!("ledwall_cli_export_{}.json", std::process::id()));

        let mut source = PresetStore::new(MemoryStore::new());
        let new = preset_from_input("Stage".to_string(), PresetCategory::Pitch, "Main".to_string(), &test_wall());
        source.add_custom(new).unwrap();
        assert_eq!(export_to_file(&source, &path).unwrap(), 1);

        let mut target = PresetStore::new(MemoryStore::new());
        let imported = import_from_file(&mut target, &path).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].name, "Stage");
        assert_eq!(target.load_custom(), imported);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_import_missing_file_is_storage_error() {
        let path = temp_dir().join(format!("ledwall_cli_missing_{}.json", std::process::id()));
        let mut store = PresetStore::new(MemoryStore::new());
        let err = import_from_file(&mut store, &path).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
