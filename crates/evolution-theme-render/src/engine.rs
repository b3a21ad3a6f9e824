//! Markup engine.
//!
//! [`MarkupEngine`] wraps a MiniJinja environment preloaded with the
//! component templates:
//!
//! | Template | Renders |
//! |----------|---------|
//! | `selector.html` | The theme `<select>` |
//! | `navbar.html` | The `<nav>` bar, with pre-rendered brand, links and selector |
//! | `link.html` | One default `<a>` link (brand or navbar entry) |
//!
//! All templates are HTML auto-escaped. Hosts can restyle a component by
//! replacing its template with [`MarkupEngine::add_template`]; the data a
//! template receives is documented on each component.

use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::error::RenderError;

/// Name of the selector template.
pub const SELECTOR_TEMPLATE: &str = "selector.html";
/// Name of the navbar template.
pub const NAVBAR_TEMPLATE: &str = "navbar.html";
/// Name of the link template.
pub const LINK_TEMPLATE: &str = "link.html";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (SELECTOR_TEMPLATE, include_str!("../templates/selector.html")),
    (NAVBAR_TEMPLATE, include_str!("../templates/navbar.html")),
    (LINK_TEMPLATE, include_str!("../templates/link.html")),
];

/// MiniJinja environment holding the component templates.
///
/// # Example
///
/// ```rust
/// use evolution_theme_render::MarkupEngine;
/// use serde_json::json;
///
/// let mut engine = MarkupEngine::new().unwrap();
/// engine.add_template("greeting.html", "<p>{{ name }}</p>").unwrap();
///
/// let html = engine.render_named("greeting.html", &json!({ "name": "<b>" })).unwrap();
/// assert_eq!(html, "<p>&lt;b&gt;</p>");
/// ```
pub struct MarkupEngine {
    env: Environment<'static>,
}

impl MarkupEngine {
    /// Creates an engine with the built-in component templates.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Adds a template, replacing any template with the same name.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        tracing::debug!(template = name, "template registered");
        Ok(())
    }

    /// Checks if a template with the given name exists.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Renders a template with serializable data.
    pub fn render_named<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        let data = serde_json::to_value(data)?;
        self.render_value(name, Value::from_serialize(&data))
    }

    /// Renders a template with a prepared context value.
    ///
    /// Use this when the context carries pre-rendered markup wrapped in
    /// [`Value::from_safe_string`].
    pub fn render_value(&self, name: &str, context: Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(context)?)
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl std::fmt::Debug for MarkupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.env.templates().map(|(name, _)| name).collect();
        names.sort_unstable();
        f.debug_struct("MarkupEngine")
            .field("templates", &names)
            .finish()
    }
}
