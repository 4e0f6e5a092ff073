//! # ledwall_core - LED Video Wall Sizing Engine
//!
//! `ledwall_core` computes what an LED video wall built from a grid of
//! panels will look like (resolution, physical size, pixel density,
//! viewing distances, cost) and manages named panel presets. All inputs and
//! outputs are JSON-serializable so any front-end (browser via WASM, CLI,
//! desktop) can drive it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types with machine-checkable codes
//! - **Pluggable storage**: Presets persist through a small key-value trait
//!
//! ## Quick Start
//!
//! ```rust
//! use ledwall_core::calculations::{calculate_led_wall, LedWallInput};
//!
//! let input = LedWallInput {
//!     panel_width_mm: 500.0,
//!     panel_height_mm: 500.0,
//!     screen_width: 4.0,
//!     screen_height: 3.0,
//!     led_pitch_mm: 2.5,
//!     price_per_panel_yen: None,
//!     selected_panel_id: Some("q-plus-p2.5".to_string()),
//! };
//!
//! let result = calculate_led_wall(&input).unwrap();
//! assert_eq!(result.panel_count, 12);
//!
//! // Serialize to JSON for a front-end
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The LED wall calculation engine
//! - [`panels`] - Panel model validation and the built-in catalog
//! - [`presets`] - Built-in presets and the custom preset store
//! - [`storage`] - Key-value store trait with memory and file backends
//! - [`settings`] - Storage location and key configuration
//! - [`format`] - Display formatting for results
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod format;
pub mod panels;
pub mod presets;
pub mod settings;
pub mod storage;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_led_wall, LedWallInput, LedWallResult};
pub use errors::{CalcError, CalcResult};
pub use panels::{get_panel_model_by_id, PanelModel};
pub use presets::{Preset, PresetCategory, PresetStore};
pub use settings::Settings;
pub use storage::{KeyValueStore, MemoryStore, StoreError};
