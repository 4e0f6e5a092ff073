//! # Preset Store
//!
//! Custom presets layered over the built-in catalog and persisted as one
//! JSON array under a single key of a [`KeyValueStore`].
//!
//! Reads never fail: a missing key, an unreachable store or a corrupt value
//! all load as an empty list (and are logged). Every successful mutation
//! rewrites the whole custom list.
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::presets::{NewPreset, PresetCategory, PresetStore};
//! use ledwall_core::storage::MemoryStore;
//!
//! let mut store = PresetStore::new(MemoryStore::new());
//! let preset = store
//!     .add_custom(NewPreset {
//!         name: "Lobby".to_string(),
//!         category: PresetCategory::UseCase,
//!         panel_width_mm: 500.0,
//!         panel_height_mm: 500.0,
//!         led_pitch_mm: 3.91,
//!         description: "Entrance wall".to_string(),
//!     })
//!     .unwrap();
//!
//! assert!(preset.id.starts_with("custom-"));
//! assert_eq!(store.load_custom(), vec![preset]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{default_presets, NewPreset, Preset, PresetUpdate};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DEFAULT_PRESETS_KEY;
use crate::storage::{KeyValueStore, StoreError};

/// Version written into every export
pub const EXPORT_VERSION: &str = "1.0";

/// Portable export envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetExport {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub presets: Vec<Preset>,
}

/// Wrap presets in an export envelope stamped with the current time
pub fn export_presets(presets: &[Preset]) -> PresetExport {
    PresetExport {
        version: EXPORT_VERSION.to_string(),
        export_date: Utc::now(),
        presets: presets.to_vec(),
    }
}

/// Fresh id for a custom preset: `custom-<unix millis>-<7 random hex chars>`
pub fn generate_custom_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("custom-{}-{}", Utc::now().timestamp_millis(), &random[..7])
}

/// Custom presets persisted in a key-value store.
#[derive(Debug)]
pub struct PresetStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PresetStore<S> {
    /// Use the default storage key
    pub fn new(store: S) -> Self {
        PresetStore::with_key(store, DEFAULT_PRESETS_KEY)
    }

    /// Use a custom storage key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        PresetStore {
            store,
            key: key.into(),
        }
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the preset store, returning the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load custom presets. Never fails; problems degrade to an empty list.
    pub fn load_custom(&self) -> Vec<Preset> {
        let stored = match self.store.get(&self.key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("cannot read custom presets: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Preset>>(&stored) {
            Ok(presets) => presets,
            Err(e) => {
                log::error!("failed to parse custom presets under '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn try_save(&mut self, presets: &[Preset]) -> Result<(), StoreError> {
        let json = serde_json::to_string(presets).map_err(|e| StoreError::io("serialize", &self.key, e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    /// Replace the stored custom list. Returns false if the write fails.
    pub fn save_custom(&mut self, presets: &[Preset]) -> bool {
        match self.try_save(presets) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to save custom presets: {}", e);
                false
            }
        }
    }

    /// Built-in presets followed by custom presets in insertion order
    pub fn get_all(&self) -> Vec<Preset> {
        let mut all = default_presets().to_vec();
        all.extend(self.load_custom());
        all
    }

    /// Add a custom preset with a freshly generated id.
    ///
    /// # Returns
    ///
    /// * `Ok(Preset)` - The stored preset
    /// * `Err(CalcError::StorageError)` - The list could not be written
    pub fn add_custom(&mut self, preset: NewPreset) -> CalcResult<Preset> {
        let mut customs = self.load_custom();
        let preset = preset.into_preset(generate_custom_id());
        customs.push(preset.clone());
        self.try_save(&customs)?;
        log::info!("added custom preset '{}' ({})", preset.name, preset.id);
        Ok(preset)
    }

    /// Update a custom preset in place, keeping its id and custom flag.
    ///
    /// Returns false when no custom preset has `id` or the write fails.
    pub fn update_custom(&mut self, id: &str, update: &PresetUpdate) -> bool {
        let mut customs = self.load_custom();
        let Some(preset) = customs.iter_mut().find(|p| p.id == id && p.is_custom) else {
            return false;
        };

        update.apply_to(preset);
        preset.is_custom = true;

        self.save_custom(&customs)
    }

    /// Delete a custom preset. Returns false when nothing was removed or the write fails.
    pub fn delete_custom(&mut self, id: &str) -> bool {
        let mut customs = self.load_custom();
        let before = customs.len();
        customs.retain(|p| p.id != id);

        if customs.len() == before {
            return false;
        }

        self.save_custom(&customs)
    }

    /// Export the stored custom presets
    pub fn export_custom(&self) -> PresetExport {
        export_presets(&self.load_custom())
    }

    /// Export the stored custom presets as pretty JSON
    pub fn export_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(&self.export_custom())?)
    }

    /// Import presets as new custom presets appended after the existing ones.
    ///
    /// Each imported preset gets a fresh id, so re-importing never collides.
    pub fn import(&mut self, data: PresetExport) -> CalcResult<Vec<Preset>> {
        let incoming = data.presets.into_iter().map(NewPreset::from).collect();
        self.import_new(incoming)
    }

    /// Import from JSON produced by [`export_json`](Self::export_json).
    ///
    /// Only the `presets` array is required; ids and flags in it are ignored.
    pub fn import_json(&mut self, json: &str) -> CalcResult<Vec<Preset>> {
        let data: Value = serde_json::from_str(json)?;

        let presets = match data.get("presets") {
            Some(presets) if presets.is_array() => presets.clone(),
            _ => return Err(CalcError::invalid_preset_data("expected a 'presets' array")),
        };

        let incoming: Vec<NewPreset> =
            serde_json::from_value(presets).map_err(|e| CalcError::invalid_preset_data(e.to_string()))?;

        self.import_new(incoming)
    }

    fn import_new(&mut self, incoming: Vec<NewPreset>) -> CalcResult<Vec<Preset>> {
        let imported: Vec<Preset> = incoming
            .into_iter()
            .map(|p| p.into_preset(generate_custom_id()))
            .collect();

        let mut customs = self.load_custom();
        customs.extend(imported.iter().cloned());
        self.try_save(&customs)?;

        log::info!("imported {} preset(s)", imported.len());
        Ok(imported)
    }

    /// Remove every custom preset. Returns false if the store refuses.
    pub fn clear_custom(&mut self) -> bool {
        if !self.store.is_available() {
            log::warn!("storage unavailable, cannot clear custom presets");
            return false;
        }

        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to clear custom presets: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetCategory;
    use crate::storage::MemoryStore;

    fn new_preset(name: &str, width: f64) -> NewPreset {
        NewPreset {
            name: name.to_string(),
            category: PresetCategory::UseCase,
            panel_width_mm: width,
            panel_height_mm: width,
            led_pitch_mm: 3.0,
            description: format!("{} description", name),
        }
    }

    fn stored_preset(id: &str) -> Preset {
        new_preset("Test Preset", 400.0).into_preset(id.to_string())
    }

    fn store() -> PresetStore<MemoryStore> {
        PresetStore::new(MemoryStore::new())
    }

    #[test]
    fn test_load_empty() {
        assert!(store().load_custom().is_empty());
    }

    #[test]
    fn test_load_stored_list() {
        let mut s = store();
        let presets = vec![stored_preset("custom-1")];
        let json = serde_json::to_string(&presets).unwrap();
        s.store_mut().set(DEFAULT_PRESETS_KEY, &json).unwrap();
        assert_eq!(s.load_custom(), presets);
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let mut s = store();
        s.store_mut().set(DEFAULT_PRESETS_KEY, "invalid json").unwrap();
        assert!(s.load_custom().is_empty());

        // Valid JSON, wrong shape
        s.store_mut().set(DEFAULT_PRESETS_KEY, "{\"a\":1}").unwrap();
        assert!(s.load_custom().is_empty());
    }

    #[test]
    fn test_load_unavailable_is_empty() {
        let s = PresetStore::new(MemoryStore::unavailable());
        assert!(s.load_custom().is_empty());
        assert_eq!(s.get_all().len(), default_presets().len());
    }

    #[test]
    fn test_save_replaces_value() {
        let mut s = store();
        assert!(s.save_custom(&[stored_preset("custom-1"), stored_preset("custom-2")]));
        assert!(s.save_custom(&[stored_preset("custom-3")]));

        let stored = s.store().get(DEFAULT_PRESETS_KEY).unwrap().unwrap();
        let parsed: Vec<Preset> = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, vec![stored_preset("custom-3")]);
    }

    #[test]
    fn test_save_failure_returns_false() {
        let mut s = PresetStore::new(MemoryStore::unavailable());
        assert!(!s.save_custom(&[stored_preset("custom-1")]));
    }

    #[test]
    fn test_get_all_builtins_then_customs() {
        let mut s = store();
        s.save_custom(&[stored_preset("custom-b"), stored_preset("custom-a")]);

        let all = s.get_all();
        let n = default_presets().len();
        assert_eq!(all.len(), n + 2);
        assert_eq!(&all[..n], default_presets());
        assert_eq!(all[n].id, "custom-b");
        assert_eq!(all[n + 1].id, "custom-a");
    }

    #[test]
    fn test_add_custom() {
        let mut s = store();
        let added = s.add_custom(new_preset("New Preset", 600.0)).unwrap();

        assert!(added.id.starts_with("custom-"));
        assert!(added.is_custom);
        assert_eq!(added.name, "New Preset");
        assert_eq!(s.load_custom(), vec![added]);
    }

    #[test]
    fn test_add_preserves_order_and_unique_ids() {
        let mut s = store();
        let first = s.add_custom(new_preset("First", 500.0)).unwrap();
        let second = s.add_custom(new_preset("Second", 600.0)).unwrap();
        assert_ne!(first.id, second.id);

        let stored = s.load_custom();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, first.id);
        assert_eq!(stored[1].id, second.id);
    }

    #[test]
    fn test_add_reports_storage_failure() {
        let mut s = PresetStore::new(MemoryStore::unavailable());
        let err = s.add_custom(new_preset("Lost", 500.0)).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_update_custom() {
        let mut s = store();
        let preset = s.add_custom(new_preset("Original", 500.0)).unwrap();

        let update = PresetUpdate {
            name: Some("Updated".to_string()),
            description: Some("Updated description".to_string()),
            ..Default::default()
        };
        assert!(s.update_custom(&preset.id, &update));

        let stored = s.load_custom();
        assert_eq!(stored[0].id, preset.id);
        assert!(stored[0].is_custom);
        assert_eq!(stored[0].name, "Updated");
        assert_eq!(stored[0].description, "Updated description");
        assert_eq!(stored[0].panel_width_mm, 500.0);
    }

    #[test]
    fn test_update_missing_or_builtin() {
        let mut s = store();
        assert!(!s.update_custom("non-existent", &PresetUpdate::default()));

        // A stored entry without the custom flag is not updatable
        let mut builtin_like = stored_preset("panel-x");
        builtin_like.is_custom = false;
        s.save_custom(&[builtin_like]);
        let update = PresetUpdate {
            name: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert!(!s.update_custom("panel-x", &update));
        assert_eq!(s.load_custom()[0].name, "Test Preset");
    }

    #[test]
    fn test_update_save_failure_returns_false() {
        let mut s = store();
        let preset = s.add_custom(new_preset("Original", 500.0)).unwrap();
        // Reads still work, writes are refused
        s.store_mut().set_read_only(true);
        assert!(!s.update_custom(&preset.id, &PresetUpdate::default()));
    }

    #[test]
    fn test_delete_custom() {
        let mut s = store();
        let first = s.add_custom(new_preset("First", 500.0)).unwrap();
        let second = s.add_custom(new_preset("Second", 600.0)).unwrap();

        assert!(s.delete_custom(&first.id));
        let stored = s.load_custom();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, second.id);

        assert!(!s.delete_custom("non-existent"));
    }

    #[test]
    fn test_export() {
        let presets = vec![stored_preset("custom-1")];
        let exported = export_presets(&presets);
        assert_eq!(exported.version, "1.0");
        assert_eq!(exported.presets, presets);
    }

    #[test]
    fn test_import_assigns_new_ids() {
        let mut s = store();
        let mut data = export_presets(&[stored_preset("old-id")]);
        data.presets[0].is_custom = false;

        let imported = s.import(data).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].name, "Test Preset");
        assert!(imported[0].is_custom);
        assert_ne!(imported[0].id, "old-id");
        assert!(imported[0].id.starts_with("custom-"));
        assert_eq!(s.load_custom().len(), 1);
    }

    #[test]
    fn test_import_merges_with_existing() {
        let mut s = store();
        let existing = s.add_custom(new_preset("Existing", 400.0)).unwrap();
        s.import(export_presets(&[stored_preset("import-1")])).unwrap();

        let stored = s.load_custom();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, existing.id);
    }

    #[test]
    fn test_export_import_json_roundtrip() {
        let mut source = store();
        source.add_custom(new_preset("A", 400.0)).unwrap();
        source.add_custom(new_preset("B", 500.0)).unwrap();
        let json = source.export_json().unwrap();
        assert!(json.contains("\"version\": \"1.0\""));

        let mut target = store();
        let imported = target.import_json(&json).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "A");
        assert_eq!(imported[1].name, "B");
    }

    #[test]
    fn test_import_json_minimal_entries() {
        // Entries without ids or flags are accepted
        let json = r#"{"presets":[{"name":"Bare","category":"pitch","panel_width_mm":500,
            "panel_height_mm":500,"led_pitch_mm":3,"description":"No id"}]}"#;
        let mut s = store();
        let imported = s.import_json(json).unwrap();
        assert_eq!(imported[0].category, PresetCategory::Pitch);
        assert!(imported[0].is_custom);
    }

    #[test]
    fn test_import_json_invalid_data() {
        let mut s = store();
        let err = s.import_json(r#"{"invalid":"data"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid preset data format"));

        let err = s.import_json(r#"{"presets":"nope"}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PRESET_DATA");

        let err = s.import_json("not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        assert!(s.load_custom().is_empty());
    }

    #[test]
    fn test_clear_custom() {
        let mut s = store();
        s.add_custom(new_preset("Test", 500.0)).unwrap();
        assert!(s.clear_custom());
        assert!(s.load_custom().is_empty());

        let mut unavailable = PresetStore::new(MemoryStore::unavailable());
        assert!(!unavailable.clear_custom());
    }

    #[test]
    fn test_custom_key() {
        let mut s = PresetStore::with_key(MemoryStore::new(), "other-key");
        s.add_custom(new_preset("Keyed", 500.0)).unwrap();
        assert_eq!(s.key(), "other-key");
        assert!(s.store().get("other-key").unwrap().is_some());
        assert!(s.store().get(DEFAULT_PRESETS_KEY).unwrap().is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_backed_store_persists() {
        use crate::storage::FileStore;

        let dir = std::env::temp_dir().join(format!("ledwall_test_presets_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let added = {
            let mut s = PresetStore::new(FileStore::open(&dir).unwrap());
            s.add_custom(new_preset("On disk", 500.0)).unwrap()
        };

        let reopened = PresetStore::new(FileStore::open(&dir).unwrap());
        assert_eq!(reopened.load_custom(), vec![added]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
