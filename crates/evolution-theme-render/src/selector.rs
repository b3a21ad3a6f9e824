//! The theme dropdown.
//!
//! [`ThemeSelector`] renders one `<option>` per entry of its
//! [`ThemeOptions`], marking the store's active key as selected, and routes
//! the user's choice back through [`ThemeStore::set_theme`]. Entries are not
//! checked against registered themes; an option whose key has no style rule
//! still renders.
//!
//! Template data (`selector.html`):
//!
//! | Field | Value |
//! |-------|-------|
//! | `class` | `etn-theme-selector` plus extra classes |
//! | `style` | inline CSS text, or absent |
//! | `options` | list of `{ label, value, selected }` |

use evolution_theme_core::{BuiltinTheme, ThemeError, ThemeKey, ThemeStore};
use serde::Serialize;

use crate::attrs::{class_list, InlineStyle};
use crate::engine::{MarkupEngine, SELECTOR_TEMPLATE};
use crate::error::RenderError;

/// Base class of the `<select>` element.
pub const SELECTOR_CLASS: &str = "etn-theme-selector";

/// Ordered display label to theme key pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOptions {
    entries: Vec<(String, ThemeKey)>,
}

impl ThemeOptions {
    /// Creates an empty option list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds options from `(label, key)` pairs, keeping their order.
    ///
    /// ```rust
    /// use evolution_theme_render::ThemeOptions;
    ///
    /// let options = ThemeOptions::from_pairs([("Light", "light"), ("Ocean", "ocean")]).unwrap();
    /// assert_eq!(options.len(), 2);
    /// ```
    pub fn from_pairs<I, L, K>(pairs: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |options, (label, key)| options.with(label, key))
    }

    /// Appends an entry.
    pub fn with(mut self, label: impl Into<String>, key: impl Into<String>) -> Result<Self, ThemeError> {
        self.entries.push((label.into(), ThemeKey::new(key)?));
        Ok(self)
    }

    /// Iterates over `(label, key)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeKey)> {
        self.entries.iter().map(|(label, key)| (label.as_str(), key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ThemeOptions {
    /// The five built-in themes with their stock labels.
    fn default() -> Self {
        Self {
            entries: BuiltinTheme::ALL
                .iter()
                .map(|theme| (theme.label().to_string(), theme.key()))
                .collect(),
        }
    }
}

/// One rendered `<option>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    /// Display label.
    pub label: String,
    /// Theme key submitted on selection.
    pub value: String,
    /// Whether this is the active theme.
    pub selected: bool,
}

#[derive(Serialize)]
struct SelectorView<'a> {
    class: String,
    style: Option<String>,
    options: &'a [SelectorOption],
}

/// A `<select>` dropdown bound to a [`ThemeStore`].
///
/// # Example
///
/// ```rust
/// use evolution_theme_core::ThemeStore;
/// use evolution_theme_render::{MarkupEngine, ThemeOptions, ThemeSelector};
///
/// let store = ThemeStore::builder().default_theme("dark").build().unwrap();
/// let engine = MarkupEngine::new().unwrap();
/// let selector = ThemeSelector::new()
///     .themes(ThemeOptions::from_pairs([("Light", "light"), ("Dark", "dark")]).unwrap());
///
/// let html = selector.render(&store, &engine).unwrap();
/// assert!(html.contains(r#"<option value="dark" selected>Dark</option>"#));
///
/// selector.on_change(&store, "light").unwrap();
/// assert_eq!(store.theme(), "light");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSelector {
    themes: ThemeOptions,
    class_name: Option<String>,
    style: InlineStyle,
}

impl ThemeSelector {
    /// Creates a selector listing the built-in themes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the listed themes.
    pub fn themes(mut self, themes: ThemeOptions) -> Self {
        self.themes = themes;
        self
    }

    /// Adds classes next to `etn-theme-selector`.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets inline styles on the `<select>`.
    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    /// The listed themes.
    pub fn theme_options(&self) -> &ThemeOptions {
        &self.themes
    }

    /// Resolves the options against the store's active key.
    pub fn options(&self, store: &ThemeStore) -> Vec<SelectorOption> {
        let active = store.theme();
        self.themes
            .iter()
            .map(|(label, key)| SelectorOption {
                label: label.to_string(),
                value: key.to_string(),
                selected: *key == active,
            })
            .collect()
    }

    /// Renders the `<select>` markup.
    pub fn render(&self, store: &ThemeStore, engine: &MarkupEngine) -> Result<String, RenderError> {
        let options = self.options(store);
        let view = SelectorView {
            class: class_list(SELECTOR_CLASS, self.class_name.as_deref()),
            style: self.style.attribute_value(),
            options: &options,
        };
        engine.render_named(SELECTOR_TEMPLATE, &view)
    }

    /// Handles a selection: makes `value` the active theme.
    pub fn on_change(&self, store: &ThemeStore, value: &str) -> Result<(), ThemeError> {
        store.set_theme(value)
    }
}
