//! # Evolution Theme Render - Theme Components as HTML
//!
//! `evolution-theme-render` turns the state held by an
//! [`evolution_theme_core::ThemeStore`] into markup. It has no state of its
//! own: every component reads the active theme at render time and writes
//! changes back through the store.
//!
//! ## Core Concepts
//!
//! - [`MarkupEngine`]: MiniJinja environment with the component templates,
//!   HTML auto-escaping on
//! - [`ThemeSelector`]: `<select>` listing [`ThemeOptions`], active key selected
//! - [`ThemeNavBar`]: title, links and an embedded selector, with click
//!   dispatch through [`ThemeNavBar::click`]
//! - [`InlineStyle`] / [`class_list`]: per-instance style and class overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use evolution_theme_core::{DocumentRoot, PresentationSurface, ThemeStore};
//! use evolution_theme_render::{MarkupEngine, ThemeNavBar, ThemeSelector};
//!
//! let root = DocumentRoot::new();
//! let store = ThemeStore::builder().surface(root.clone()).build().unwrap();
//! let engine = MarkupEngine::new().unwrap();
//!
//! let html = ThemeNavBar::new().title("Atlas").render(&store, &engine).unwrap();
//! assert!(html.contains(r#"<option value="light" selected>Light Theme</option>"#));
//!
//! // The host forwards the dropdown's change event.
//! ThemeSelector::new().on_change(&store, "forest").unwrap();
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("forest"));
//! ```
//!
//! ## Custom Templates
//!
//! Each component renders through a named template that can be replaced:
//!
//! ```rust
//! use evolution_theme_core::ThemeStore;
//! use evolution_theme_render::{MarkupEngine, ThemeSelector, SELECTOR_TEMPLATE};
//!
//! let mut engine = MarkupEngine::new().unwrap();
//! engine
//!     .add_template(
//!         SELECTOR_TEMPLATE,
//!         "{% for o in options %}[{{ o.value }}{% if o.selected %}*{% endif %}]{% endfor %}",
//!     )
//!     .unwrap();
//!
//! let store = ThemeStore::builder().default_theme("tron").build().unwrap();
//! let html = ThemeSelector::new().render(&store, &engine).unwrap();
//! assert_eq!(html, "[light][dark][forest][tron*][midnight]");
//! ```

mod attrs;
mod engine;
mod error;
mod navbar;
mod selector;

pub use attrs::{class_list, InlineStyle};
pub use engine::{MarkupEngine, LINK_TEMPLATE, NAVBAR_TEMPLATE, SELECTOR_TEMPLATE};
pub use error::RenderError;
pub use navbar::{
    ClickHandler, LinkParts, LinkRenderer, LinkTarget, NavLink, Navigation, ThemeNavBar,
    BRAND_CLASS, LINK_CLASS, NAVBAR_CLASS,
};
pub use selector::{SelectorOption, ThemeOptions, ThemeSelector, SELECTOR_CLASS};
