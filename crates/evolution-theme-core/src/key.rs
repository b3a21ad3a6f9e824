//! Theme keys and the built-in theme set.
//!
//! A [`ThemeKey`] is the opaque string written to the presentation attribute
//! (`data-theme` by default) and used as the selector value of a theme's
//! style rule. The only validation applied is that it is not blank; whether a
//! matching style rule exists is the caller's concern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A non-empty theme identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeKey(String);

impl ThemeKey {
    /// Creates a key, rejecting empty and whitespace-only strings.
    ///
    /// The value is stored verbatim; surrounding whitespace is not trimmed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evolution_theme_core::ThemeKey;
    ///
    /// let key = ThemeKey::new("ocean").unwrap();
    /// assert_eq!(key.as_str(), "ocean");
    /// assert!(ThemeKey::new("  ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ThemeError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ThemeError::EmptyKey);
        }
        Ok(Self(value))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThemeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ThemeKey {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ThemeKey {
    type Error = ThemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThemeKey> for String {
    fn from(key: ThemeKey) -> Self {
        key.0
    }
}

impl PartialEq<str> for ThemeKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ThemeKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The themes shipped with the stock stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTheme {
    Light,
    Dark,
    Forest,
    Tron,
    Midnight,
}

impl BuiltinTheme {
    /// All built-in themes, in dropdown order.
    pub const ALL: [BuiltinTheme; 5] = [
        BuiltinTheme::Light,
        BuiltinTheme::Dark,
        BuiltinTheme::Forest,
        BuiltinTheme::Tron,
        BuiltinTheme::Midnight,
    ];

    /// The attribute value this theme's CSS block is scoped to.
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinTheme::Light => "light",
            BuiltinTheme::Dark => "dark",
            BuiltinTheme::Forest => "forest",
            BuiltinTheme::Tron => "tron",
            BuiltinTheme::Midnight => "midnight",
        }
    }

    /// The label shown for this theme in the default selector.
    pub fn label(self) -> &'static str {
        match self {
            BuiltinTheme::Light => "Light Theme",
            BuiltinTheme::Dark => "Dark Theme",
            BuiltinTheme::Forest => "Forest",
            BuiltinTheme::Tron => "Tron",
            BuiltinTheme::Midnight => "Midnight",
        }
    }

    /// Returns this theme as a [`ThemeKey`].
    pub fn key(self) -> ThemeKey {
        ThemeKey(self.as_str().to_string())
    }
}

impl fmt::Display for BuiltinTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BuiltinTheme> for ThemeKey {
    fn from(theme: BuiltinTheme) -> Self {
        theme.key()
    }
}
