//! Error types for theme state, persistence, registration and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a theme key or theme change is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The theme key was empty or contained only whitespace.
    #[error("theme key must not be empty")]
    EmptyKey,
}

/// Error raised by a [`Persistence`](crate::Persistence) backend.
///
/// The store never surfaces these to its callers: reads fall back to the
/// default theme and failed writes are logged and dropped.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend cannot be reached (disabled, blocked, quota exceeded).
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("persistence I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be decoded or encoded.
    #[error("persisted data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Error returned by theme registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No style sheet has been installed for the process-wide registry.
    #[error("no style sheet installed; call install_style_sheet before register_theme")]
    SurfaceUnavailable,

    /// The theme name was rejected.
    #[error("invalid theme name: {0}")]
    InvalidName(#[from] ThemeError),

    /// A theme definition document could not be parsed.
    #[error("invalid theme definition{}: {message}", origin(.path))]
    Definition {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },
}

/// Error returned when loading store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration document is not valid.
    #[error("invalid configuration{}: {message}", origin(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_error_display() {
        assert_eq!(ThemeError::EmptyKey.to_string(), "theme key must not be empty");
    }

    #[test]
    fn test_registry_error_from_theme_error() {
        let err: RegistryError = ThemeError::EmptyKey.into();
        assert!(matches!(err, RegistryError::InvalidName(ThemeError::EmptyKey)));
        assert!(err.to_string().contains("invalid theme name"));
    }

    #[test]
    fn test_definition_error_mentions_path() {
        let err = RegistryError::Definition {
            path: Some(PathBuf::from("themes/ocean.yaml")),
            message: "bad".into(),
        };
        assert!(err.to_string().contains("themes/ocean.yaml"));

        let inline = RegistryError::Definition {
            path: None,
            message: "bad".into(),
        };
        assert_eq!(inline.to_string(), "invalid theme definition: bad");
    }

    #[test]
    fn test_persistence_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PersistenceError = io_err.into();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
