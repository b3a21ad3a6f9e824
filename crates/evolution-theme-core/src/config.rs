//! Store configuration.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! default_theme: dark        # or: { light: light, dark: midnight }
//! storage_key: etn-theme
//! attribute: data-theme
//! storage_file: theme.json   # optional, relative to the config file
//! ```
//!
//! A `{ light, dark }` default follows the OS color mode (see
//! [`detect_color_mode`](crate::detect_color_mode)) and only applies when no
//! theme has been persisted.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::key::{BuiltinTheme, ThemeKey};
use crate::mode::{detect_color_mode, ColorMode};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "etn-theme";

/// Root attribute used when none is configured.
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";

/// The theme used when nothing has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DefaultTheme {
    /// Always the same key.
    Fixed(ThemeKey),
    /// Chosen from the OS color mode.
    System {
        /// Key used in light mode.
        light: ThemeKey,
        /// Key used in dark mode.
        dark: ThemeKey,
    },
}

impl DefaultTheme {
    /// Resolves to a concrete key, consulting the color mode detector for
    /// [`DefaultTheme::System`].
    pub fn resolve(&self) -> ThemeKey {
        match self {
            DefaultTheme::Fixed(key) => key.clone(),
            DefaultTheme::System { light, dark } => match detect_color_mode() {
                ColorMode::Light => light.clone(),
                ColorMode::Dark => dark.clone(),
            },
        }
    }
}

impl Default for DefaultTheme {
    fn default() -> Self {
        DefaultTheme::Fixed(BuiltinTheme::Light.key())
    }
}

impl From<ThemeKey> for DefaultTheme {
    fn from(key: ThemeKey) -> Self {
        DefaultTheme::Fixed(key)
    }
}

impl From<BuiltinTheme> for DefaultTheme {
    fn from(theme: BuiltinTheme) -> Self {
        DefaultTheme::Fixed(theme.key())
    }
}

/// Configuration for a [`ThemeStore`](crate::ThemeStore).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Theme used when no persisted value exists.
    pub default_theme: DefaultTheme,
    /// Key the active theme is persisted under.
    pub storage_key: String,
    /// Root attribute the active theme is written to.
    pub attribute: String,
    /// JSON file to persist to. In-memory storage is used when absent.
    pub storage_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_theme: DefaultTheme::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            storage_file: None,
        }
    }
}

impl StoreConfig {
    /// Parses a configuration from YAML.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evolution_theme_core::StoreConfig;
    ///
    /// let config = StoreConfig::from_yaml("default_theme: dark").unwrap();
    /// assert_eq!(config.storage_key, "etn-theme");
    /// assert_eq!(config.default_theme.resolve(), "dark");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads a configuration from a YAML file.
    ///
    /// A relative `storage_file` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, Some(path))?;
        if let (Some(file), Some(dir)) = (config.storage_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }
        Ok(config)
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        for (field, value) in [("storage_key", &self.storage_key), ("attribute", &self.attribute)] {
            if value.trim().is_empty() {
                return Err(ConfigError::Parse {
                    path: path.map(Path::to_path_buf),
                    message: format!("{} must not be empty", field),
                });
            }
        }
        if self
            .storage_file
            .as_ref()
            .is_some_and(|file| file.as_os_str().is_empty())
        {
            return Err(ConfigError::Parse {
                path: path.map(Path::to_path_buf),
                message: "storage_file must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{reset_color_mode_detector, set_color_mode_detector};
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "etn-theme");
        assert_eq!(config.attribute, "data-theme");
        assert_eq!(config.default_theme, DefaultTheme::Fixed(BuiltinTheme::Light.key()));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(StoreConfig::from_yaml("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = StoreConfig::from_yaml(
            r#"
            default_theme: midnight
            storage_key: my-app-theme
            attribute: data-mode
            "#,
        )
        .unwrap();

        assert_eq!(config.default_theme.resolve(), "midnight");
        assert_eq!(config.storage_key, "my-app-theme");
        assert_eq!(config.attribute, "data-mode");
    }

    #[test]
    fn test_empty_default_theme_rejected() {
        let result = StoreConfig::from_yaml(r#"default_theme: """#);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let err = StoreConfig::from_yaml(r#"storage_key: "  ""#).unwrap_err();
        assert!(err.to_string().contains("storage_key"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(StoreConfig::from_yaml("colour: red").is_err());
    }

    #[test]
    #[serial]
    fn test_system_default_follows_color_mode() {
        let config = StoreConfig::from_yaml(
            r#"
            default_theme:
              light: forest
              dark: midnight
            "#,
        )
        .unwrap();

        set_color_mode_detector(|| ColorMode::Dark);
        assert_eq!(config.default_theme.resolve(), "midnight");

        set_color_mode_detector(|| ColorMode::Light);
        assert_eq!(config.default_theme.resolve(), "forest");

        reset_color_mode_detector();
    }

    #[test]
    fn test_from_file() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.yaml");
        std::fs::write(&path, "default_theme: tron\n").unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.default_theme.resolve(), "tron");
    }

    #[test]
    fn test_storage_file_resolves_against_config_dir() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.yaml");
        std::fs::write(&path, "storage_file: state/theme.json\n").unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(
            config.storage_file,
            Some(dir.path().join("state").join("theme.json"))
        );
    }

    #[test]
    fn test_absolute_storage_file_kept() {
        let config = StoreConfig::from_yaml("storage_file: /var/lib/app/theme.json").unwrap();
        assert_eq!(
            config.storage_file.as_deref(),
            Some(Path::new("/var/lib/app/theme.json"))
        );
    }

    #[test]
    fn test_empty_storage_file_rejected() {
        let err = StoreConfig::from_yaml(r#"storage_file: """#).unwrap_err();
        assert!(err.to_string().contains("storage_file"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = StoreConfig::from_file("/nonexistent/theme.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
