//! # Evolution Theme Core - Persisted Theme State
//!
//! `evolution-theme-core` holds the stateful half of the theme engine: the
//! active theme of an application, where it is persisted, how it is
//! reflected onto the document, and how new themes are registered at
//! runtime.
//!
//! ## Core Concepts
//!
//! - [`ThemeKey`]: Opaque, non-empty theme identifier (`"dark"`, `"ocean"`)
//! - [`ThemeStore`]: Owns the active key; initializes from persistence and
//!   writes through on every change
//! - [`Persistence`]: Key/value backend (`MemoryStorage`, `JsonFileStorage`)
//! - [`PresentationSurface`]: Root node whose `data-theme` attribute selects
//!   the CSS block in effect (`DocumentRoot`)
//! - [`ThemeRegistry`]: Injects `[data-theme="name"]` rules into a
//!   [`StyleSheet`] at runtime
//!
//! ## Quick Start
//!
//! ```rust
//! use evolution_theme_core::{
//!     DocumentRoot, HeadStyleSheet, MemoryStorage, PresentationSurface, ThemeRegistry, ThemeStore,
//! };
//!
//! let storage = MemoryStorage::new();
//! let root = DocumentRoot::new();
//!
//! let store = ThemeStore::builder()
//!     .default_theme("light")
//!     .storage(storage.clone())
//!     .surface(root.clone())
//!     .build()
//!     .unwrap();
//!
//! let mut registry = ThemeRegistry::new(HeadStyleSheet::new());
//! registry
//!     .register_theme("ocean", [("color-bg", "#0a1628"), ("color-text", "#e0f0ff")])
//!     .unwrap();
//!
//! store.set_theme("ocean").unwrap();
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("ocean"));
//!
//! // A new store over the same storage picks the theme back up.
//! let reloaded = ThemeStore::builder().storage(storage).build().unwrap();
//! assert_eq!(reloaded.theme(), "ocean");
//! ```
//!
//! ## Configuration
//!
//! Store settings can come from YAML through [`StoreConfig`]:
//!
//! ```rust
//! use evolution_theme_core::{StoreConfig, ThemeStore};
//!
//! let config = StoreConfig::from_yaml(r#"
//! default_theme: midnight
//! storage_key: my-app-theme
//! "#).unwrap();
//!
//! let store = ThemeStore::builder().config(config).build().unwrap();
//! assert_eq!(store.theme(), "midnight");
//! ```

mod config;
mod error;
mod key;
mod mode;
pub mod registry;
mod storage;
mod store;
mod surface;

pub use config::{DefaultTheme, StoreConfig, DEFAULT_ATTRIBUTE, DEFAULT_STORAGE_KEY};
pub use error::{ConfigError, PersistenceError, RegistryError, ThemeError};
pub use key::{BuiltinTheme, ThemeKey};
pub use mode::{detect_color_mode, reset_color_mode_detector, set_color_mode_detector, ColorMode};
pub use registry::{
    build_rule, install_style_sheet, register_theme, rule_id, uninstall_style_sheet,
    with_style_sheet, HeadStyleSheet, StyleSheet, ThemeDefinition, ThemeRegistry, RULE_ID_PREFIX,
};
pub use storage::{DisabledStorage, JsonFileStorage, MemoryStorage, Persistence};
pub use store::{initial_theme, SubscriptionId, ThemeStore, ThemeStoreBuilder};
pub use surface::{DocumentRoot, PresentationSurface};
