//! One object wiring a store, a markup engine and a theme registry together.

use std::path::Path;

use evolution_theme_core::{
    ConfigError, HeadStyleSheet, RegistryError, StoreConfig, ThemeError, ThemeKey, ThemeRegistry,
    ThemeStore,
};
use evolution_theme_render::{MarkupEngine, RenderError, ThemeNavBar, ThemeSelector};

/// Error type for provider setup.
#[derive(Debug)]
pub enum SetupError {
    /// Configuration could not be loaded.
    Config(ConfigError),
    /// The configured default theme was rejected.
    Theme(ThemeError),
    /// The markup engine could not be created.
    Render(RenderError),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Config(err) => write!(f, "configuration error: {}", err),
            SetupError::Theme(err) => write!(f, "theme error: {}", err),
            SetupError::Render(err) => write!(f, "render setup error: {}", err),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Config(err) => Some(err),
            SetupError::Theme(err) => Some(err),
            SetupError::Render(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl From<ThemeError> for SetupError {
    fn from(e: ThemeError) -> Self {
        SetupError::Theme(e)
    }
}

impl From<RenderError> for SetupError {
    fn from(e: RenderError) -> Self {
        SetupError::Render(e)
    }
}

/// Store, engine and registry for one application.
///
/// The registry writes rules scoped to the store's attribute, so themes
/// registered here take effect when the store activates them.
///
/// # Example
///
/// ```rust
/// use evolution_theme::prelude::*;
///
/// let store = ThemeStore::builder().default_theme("dark").build().unwrap();
/// let mut provider = ThemeProvider::new(store).unwrap();
///
/// provider.register_theme("ocean", [("color-bg", "#0a1628")]).unwrap();
/// provider.set_theme("ocean").unwrap();
///
/// assert_eq!(provider.theme(), "ocean");
/// assert!(provider.style_html().contains(r#"[data-theme="ocean"]"#));
/// ```
#[derive(Debug)]
pub struct ThemeProvider {
    store: ThemeStore,
    engine: MarkupEngine,
    registry: ThemeRegistry,
}

impl ThemeProvider {
    /// Wraps `store` with the built-in templates and an empty registry.
    pub fn new(store: ThemeStore) -> Result<Self, SetupError> {
        let engine = MarkupEngine::new()?;
        let registry = ThemeRegistry::new(HeadStyleSheet::new()).with_attribute(store.attribute());
        tracing::debug!(theme = %store.theme(), attribute = %store.attribute(), "theme provider ready");
        Ok(Self {
            store,
            engine,
            registry,
        })
    }

    /// Builds a provider from a YAML config file.
    ///
    /// The store persists to the configured `storage_file`, or in memory when
    /// none is set.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let config = StoreConfig::from_file(path)?;
        let store = ThemeStore::builder().config(config).build()?;
        Self::new(store)
    }

    /// The shared store handle.
    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// The active theme key.
    pub fn theme(&self) -> ThemeKey {
        self.store.theme()
    }

    /// Makes `key` the active theme.
    pub fn set_theme(&self, key: &str) -> Result<(), ThemeError> {
        self.store.set_theme(key)
    }

    /// The markup engine.
    pub fn engine(&self) -> &MarkupEngine {
        &self.engine
    }

    /// Mutable access for template overrides.
    pub fn engine_mut(&mut self) -> &mut MarkupEngine {
        &mut self.engine
    }

    /// Registered theme rules.
    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Registers (or replaces) a theme rule.
    pub fn register_theme<I, K, V>(&mut self, name: &str, vars: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.registry.register_theme(name, vars)
    }

    /// Registers every theme in a YAML document.
    pub fn register_yaml(&mut self, yaml: &str) -> Result<Vec<ThemeKey>, RegistryError> {
        self.registry.register_yaml(yaml)
    }

    /// Renders a selector against the active theme.
    pub fn render_selector(&self, selector: &ThemeSelector) -> Result<String, RenderError> {
        selector.render(&self.store, &self.engine)
    }

    /// Renders a navbar against the active theme.
    pub fn render_navbar(&self, navbar: &ThemeNavBar) -> Result<String, RenderError> {
        navbar.render(&self.store, &self.engine)
    }

    /// The registered rules as `<style>` blocks for the document head.
    pub fn style_html(&self) -> String {
        self.registry.sheet().to_html()
    }
}
