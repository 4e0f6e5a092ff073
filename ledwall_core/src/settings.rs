//! # Settings
//!
//! Where presets are stored. Defaults can be overridden through the
//! environment:
//!
//! - `LEDWALL_DATA_DIR` - directory for the file-backed store
//! - `LEDWALL_PRESETS_KEY` - key the custom preset list is stored under

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key custom presets are stored under unless configured otherwise
pub const DEFAULT_PRESETS_KEY: &str = "led-calculator-presets";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".ledwall";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "LEDWALL_DATA_DIR";

/// Environment variable overriding the presets key
pub const ENV_PRESETS_KEY: &str = "LEDWALL_PRESETS_KEY";

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,

    /// Key the custom preset list is stored under
    pub presets_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            presets_key: DEFAULT_PRESETS_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, overridden by any non-empty environment variables
    pub fn from_env() -> Self {
        Settings::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(ENV_PRESETS_KEY).filter(|v| !v.trim().is_empty()) {
            settings.presets_key = key;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_dir, PathBuf::from(".ledwall"));
        assert_eq!(settings.presets_key, "led-calculator-presets");
    }

    #[test]
    fn test_lookup_overrides() {
        let settings = Settings::from_lookup(|name| match name {
            ENV_DATA_DIR => Some("/tmp/walls".to_string()),
            ENV_PRESETS_KEY => Some("my-presets".to_string()),
            _ => None,
        });
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/walls"));
        assert_eq!(settings.presets_key, "my-presets");
    }

    #[test]
    fn test_blank_values_ignored() {
        let settings = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        let roundtrip: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Settings::default());
    }
}
