//! # Evolution Theme - Theme Switching for Web Applications
//!
//! Evolution Theme tracks an application's active theme, persists it across
//! sessions and reflects it onto the document root as a `data-theme`
//! attribute, so that CSS variable blocks scoped to that attribute take
//! effect. Themes can be added at runtime, and two ready-made components (a
//! theme dropdown and a navbar) render against the active theme.
//!
//! This crate re-exports [`evolution_theme_core`] (state, persistence,
//! registration) and [`evolution_theme_render`] (markup components), and adds
//! [`ThemeProvider`], which wires them together.
//!
//! ## Quick Start
//!
//! ```rust
//! use evolution_theme::prelude::*;
//!
//! let storage = MemoryStorage::new();
//! let root = DocumentRoot::new();
//! let store = ThemeStore::builder()
//!     .default_theme("light")
//!     .storage(storage.clone())
//!     .surface(root.clone())
//!     .build()
//!     .unwrap();
//!
//! let mut provider = ThemeProvider::new(store).unwrap();
//! provider
//!     .register_yaml(
//!         r##"
//! ocean:
//!   color-bg: "#0a1628"
//!   color-text: "#e0f0ff"
//! "##,
//!     )
//!     .unwrap();
//!
//! let selector = ThemeSelector::new().themes(
//!     ThemeOptions::from_pairs([("Light", "light"), ("Ocean", "ocean")]).unwrap(),
//! );
//! selector.on_change(provider.store(), "ocean").unwrap();
//!
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("ocean"));
//! assert_eq!(storage.get("etn-theme").unwrap().as_deref(), Some("ocean"));
//!
//! let html = provider.render_selector(&selector).unwrap();
//! assert!(html.contains(r#"<option value="ocean" selected>Ocean</option>"#));
//! ```
//!
//! ## Crates
//!
//! - `evolution-theme-core`: [`ThemeStore`], [`ThemeRegistry`], storage and
//!   surface collaborators, [`StoreConfig`]
//! - `evolution-theme-render`: [`MarkupEngine`], [`ThemeSelector`],
//!   [`ThemeNavBar`]

mod provider;

pub use provider::{SetupError, ThemeProvider};

pub use evolution_theme_core::*;
pub use evolution_theme_render::*;

/// The types most applications need.
pub mod prelude {
    pub use crate::provider::{SetupError, ThemeProvider};
    pub use evolution_theme_core::{
        DocumentRoot, HeadStyleSheet, JsonFileStorage, MemoryStorage, Persistence,
        PresentationSurface, StoreConfig, ThemeError, ThemeKey, ThemeRegistry, ThemeStore,
    };
    pub use evolution_theme_render::{
        InlineStyle, LinkTarget, MarkupEngine, NavLink, Navigation, ThemeNavBar, ThemeOptions,
        ThemeSelector,
    };
}
