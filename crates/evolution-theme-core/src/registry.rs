//! Runtime theme registration.
//!
//! Registering a theme turns a name and an ordered list of CSS custom
//! properties into one style rule scoped to that name:
//!
//! ```text
//! registerTheme("ocean", { color-bg: #0a1628, color-text: #e0f0ff })
//!
//! [data-theme="ocean"] {
//!   --color-bg: #0a1628;
//!   --color-text: #e0f0ff;
//! }
//! ```
//!
//! The rule is stored in a [`StyleSheet`] under the id `etn-theme-<name>`.
//! Registering the same name again removes the old rule before inserting the
//! new one, so a name never has more than one rule. Variable names and values
//! are passed through verbatim.
//!
//! Two entry points exist:
//!
//! - [`ThemeRegistry`] owns a style sheet and is what hosts normally use.
//! - [`register_theme`] writes to a process-wide sheet installed with
//!   [`install_style_sheet`]; it fails with
//!   [`RegistryError::SurfaceUnavailable`] until one is installed.
//!
//! ## Definition files
//!
//! Several themes can be loaded from one YAML document, keyed by theme name.
//! Declaration order follows document order:
//!
//! ```yaml
//! ocean:
//!   color-bg: "#0a1628"
//!   color-text: "#e0f0ff"
//! sand:
//!   color-bg: "#f4e9d8"
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde_yaml::Value as YamlValue;
use std::sync::Mutex;

use crate::config::DEFAULT_ATTRIBUTE;
use crate::error::RegistryError;
use crate::key::ThemeKey;

/// Prefix of the style block id a theme's rule is stored under.
pub const RULE_ID_PREFIX: &str = "etn-theme-";

/// Returns the style block id for `name`.
pub fn rule_id(name: &str) -> String {
    format!("{}{}", RULE_ID_PREFIX, name)
}

/// Builds the style rule for a theme.
///
/// ```rust
/// use evolution_theme_core::build_rule;
///
/// let css = build_rule("data-theme", "ocean", [("color-bg", "#000")]);
/// assert_eq!(css, "[data-theme=\"ocean\"] {\n  --color-bg: #000;\n}");
/// ```
pub fn build_rule<I, K, V>(attribute: &str, name: &str, vars: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let declarations: Vec<String> = vars
        .into_iter()
        .map(|(key, value)| format!("  --{}: {};", key.as_ref(), value.as_ref()))
        .collect();
    format!(
        "[{}=\"{}\"] {{\n{}\n}}",
        attribute,
        name,
        declarations.join("\n")
    )
}

/// A mutable collection of named style blocks.
pub trait StyleSheet {
    /// Appends a style block.
    fn insert_rule(&mut self, id: &str, css: &str);

    /// Looks up the CSS of a style block.
    fn rule(&self, id: &str) -> Option<&str>;

    /// Removes a style block. Returns false if none had that id.
    fn remove_rule(&mut self, id: &str) -> bool;
}

/// In-memory equivalent of `<style>` elements appended to `<head>`.
///
/// Blocks keep insertion order; a replaced block moves to the end, as a
/// removed-then-appended element would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadStyleSheet {
    blocks: Vec<(String, String)>,
}

impl HeadStyleSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of style blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the sheet holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|(id, _)| id.as_str())
    }

    /// All rules concatenated, one blank line apart.
    pub fn css(&self) -> String {
        self.blocks
            .iter()
            .map(|(_, css)| css.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders the blocks as `<style>` elements.
    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(|(id, css)| format!("<style id=\"{}\">\n{}\n</style>", id, css))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StyleSheet for HeadStyleSheet {
    fn insert_rule(&mut self, id: &str, css: &str) {
        self.blocks.push((id.to_string(), css.to_string()));
    }

    fn rule(&self, id: &str) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, css)| css.as_str())
    }

    fn remove_rule(&mut self, id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|(existing, _)| existing != id);
        self.blocks.len() != before
    }
}

impl<S: StyleSheet + ?Sized> StyleSheet for Box<S> {
    fn insert_rule(&mut self, id: &str, css: &str) {
        (**self).insert_rule(id, css)
    }

    fn rule(&self, id: &str) -> Option<&str> {
        (**self).rule(id)
    }

    fn remove_rule(&mut self, id: &str) -> bool {
        (**self).remove_rule(id)
    }
}

/// A theme name with its ordered custom properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDefinition {
    /// Theme key the rule is scoped to.
    pub name: ThemeKey,
    /// Variable name (without `--`) and value pairs, in declaration order.
    pub vars: Vec<(String, String)>,
}

impl ThemeDefinition {
    /// Creates a definition, rejecting a blank name.
    pub fn new<I, K, V>(name: &str, vars: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Self {
            name: ThemeKey::new(name)?,
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        })
    }

    /// Parses every theme in a YAML document, in document order.
    pub fn parse_yaml(yaml: &str) -> Result<Vec<Self>, RegistryError> {
        parse_definitions(yaml, None)
    }

    /// Loads every theme from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Definition {
            path: Some(path.to_path_buf()),
            message: format!("failed to read file: {}", e),
        })?;
        parse_definitions(&content, Some(path))
    }

    /// Builds this theme's style rule.
    pub fn to_rule(&self, attribute: &str) -> String {
        build_rule(
            attribute,
            self.name.as_str(),
            self.vars.iter().map(|(key, value)| (key, value)),
        )
    }
}

fn parse_definitions(yaml: &str, path: Option<&Path>) -> Result<Vec<ThemeDefinition>, RegistryError> {
    let error = |message: String| RegistryError::Definition {
        path: path.map(Path::to_path_buf),
        message,
    };

    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root: YamlValue = serde_yaml::from_str(yaml).map_err(|e| error(e.to_string()))?;
    let themes = match root {
        YamlValue::Mapping(themes) => themes,
        YamlValue::Null => return Ok(Vec::new()),
        _ => return Err(error("expected a mapping of theme names".into())),
    };

    let mut definitions = Vec::with_capacity(themes.len());
    for (name, vars) in themes {
        let name = scalar_to_string(&name)
            .ok_or_else(|| error("theme names must be strings".into()))?;
        let vars = match vars {
            YamlValue::Mapping(vars) => vars,
            YamlValue::Null => Default::default(),
            _ => return Err(error(format!("theme '{}' must map variable names to values", name))),
        };

        let mut pairs = Vec::with_capacity(vars.len());
        for (var, value) in vars {
            let var = scalar_to_string(&var)
                .ok_or_else(|| error(format!("theme '{}' has a non-scalar variable name", name)))?;
            let value = scalar_to_string(&value).ok_or_else(|| {
                error(format!("variable '{}' in theme '{}' must be a scalar", var, name))
            })?;
            pairs.push((var, value));
        }
        definitions.push(ThemeDefinition::new(&name, pairs)?);
    }
    Ok(definitions)
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Registers theme rules into an owned style sheet.
///
/// # Example
///
/// ```rust
/// use evolution_theme_core::{HeadStyleSheet, StyleSheet, ThemeRegistry};
///
/// let mut registry = ThemeRegistry::new(HeadStyleSheet::new());
/// registry.register_theme("ocean", [("color-bg", "#0a1628")]).unwrap();
/// registry.register_theme("ocean", [("color-bg", "#000000")]).unwrap();
///
/// assert_eq!(registry.sheet().len(), 1);
/// assert!(registry.rule_for("ocean").unwrap().contains("#000000"));
/// ```
#[derive(Debug, Clone)]
pub struct ThemeRegistry<S: StyleSheet = HeadStyleSheet> {
    sheet: S,
    attribute: String,
}

impl Default for ThemeRegistry<HeadStyleSheet> {
    fn default() -> Self {
        Self::new(HeadStyleSheet::new())
    }
}

impl<S: StyleSheet> ThemeRegistry<S> {
    /// Creates a registry writing rules scoped to `data-theme`.
    pub fn new(sheet: S) -> Self {
        Self {
            sheet,
            attribute: DEFAULT_ATTRIBUTE.to_string(),
        }
    }

    /// Scopes rules to a different root attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// The attribute rules are scoped to.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Registers (or replaces) the rule for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] for a blank name.
    pub fn register_theme<I, K, V>(&mut self, name: &str, vars: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = ThemeKey::new(name)?;
        write_rule(&mut self.sheet, &self.attribute, &key, vars);
        Ok(())
    }

    /// Registers a parsed definition.
    pub fn register_definition(&mut self, definition: &ThemeDefinition) {
        write_rule(
            &mut self.sheet,
            &self.attribute,
            &definition.name,
            definition.vars.iter().map(|(key, value)| (key, value)),
        );
    }

    /// Registers every theme in a YAML document, returning their keys.
    pub fn register_yaml(&mut self, yaml: &str) -> Result<Vec<ThemeKey>, RegistryError> {
        let definitions = ThemeDefinition::parse_yaml(yaml)?;
        Ok(self.register_all(&definitions))
    }

    /// Registers every theme in a YAML file, returning their keys.
    pub fn register_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<ThemeKey>, RegistryError> {
        let definitions = ThemeDefinition::from_file(path)?;
        Ok(self.register_all(&definitions))
    }

    fn register_all(&mut self, definitions: &[ThemeDefinition]) -> Vec<ThemeKey> {
        definitions
            .iter()
            .map(|definition| {
                self.register_definition(definition);
                definition.name.clone()
            })
            .collect()
    }

    /// The rule currently registered for `name`.
    pub fn rule_for(&self, name: &str) -> Option<&str> {
        self.sheet.rule(&rule_id(name))
    }

    /// Returns true if a rule is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.rule_for(name).is_some()
    }

    /// The underlying style sheet.
    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Consumes the registry, returning its style sheet.
    pub fn into_sheet(self) -> S {
        self.sheet
    }
}

fn write_rule<S, I, K, V>(sheet: &mut S, attribute: &str, key: &ThemeKey, vars: I)
where
    S: StyleSheet + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let id = rule_id(key.as_str());
    if sheet.remove_rule(&id) {
        tracing::debug!(theme = %key, "replacing existing theme rule");
    }
    let css = build_rule(attribute, key.as_str(), vars);
    sheet.insert_rule(&id, &css);
    tracing::info!(theme = %key, "registered theme");
}

type SharedSheet = Box<dyn StyleSheet + Send>;

static GLOBAL_STYLE_SHEET: Lazy<Mutex<Option<SharedSheet>>> = Lazy::new(|| Mutex::new(None));

/// Installs the process-wide style sheet used by [`register_theme`].
///
/// Returns the previously installed sheet, if any.
pub fn install_style_sheet<S: StyleSheet + Send + 'static>(sheet: S) -> Option<SharedSheet> {
    let mut guard = GLOBAL_STYLE_SHEET
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.replace(Box::new(sheet))
}

/// Removes and returns the process-wide style sheet.
pub fn uninstall_style_sheet() -> Option<SharedSheet> {
    let mut guard = GLOBAL_STYLE_SHEET
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.take()
}

/// Runs `f` against the process-wide style sheet, if one is installed.
pub fn with_style_sheet<R>(f: impl FnOnce(&dyn StyleSheet) -> R) -> Option<R> {
    let guard = GLOBAL_STYLE_SHEET
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.as_ref().map(|sheet| f(&**sheet))
}

/// Registers (or replaces) a theme rule in the process-wide style sheet.
///
/// Rules are scoped to `data-theme`.
///
/// # Errors
///
/// - [`RegistryError::SurfaceUnavailable`] if no sheet is installed
/// - [`RegistryError::InvalidName`] for a blank name
pub fn register_theme<I, K, V>(name: &str, vars: I) -> Result<(), RegistryError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let key = ThemeKey::new(name)?;
    let mut guard = GLOBAL_STYLE_SHEET
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let sheet = guard.as_mut().ok_or(RegistryError::SurfaceUnavailable)?;
    write_rule(sheet, DEFAULT_ATTRIBUTE, &key, vars);
    Ok(())
}
