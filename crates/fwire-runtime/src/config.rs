#![forbid(unsafe_code)]

//! Framework configuration.
//!
//! Everything a [`FrameworkContext`](crate::FrameworkContext) reads at
//! construction: the default language, the ordered locale search paths and
//! the ordered text-setter method names.
//!
//! # Loading
//!
//! ```toml
//! # fwire.toml
//! default_language = "en"
//! search_paths = ["languages", "/usr/share/myapp/languages"]
//! text_setters = ["setText", "setTitle"]
//! ```
//!
//! ```rust,ignore
//! let config = FrameworkConfig::from_toml_file("fwire.toml")?;
//! ```
//!
//! # Defaults
//!
//! Fields left out of a file keep their defaults: language `zh_CN`, one
//! search path `languages`, one setter name `setText`.

use std::path::PathBuf;

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// Default language id.
pub const DEFAULT_LANGUAGE: &str = "zh_CN";
/// Default locale search path.
pub const DEFAULT_SEARCH_PATH: &str = "languages";
/// Default text-setter method name.
pub const DEFAULT_TEXT_SETTER: &str = "setText";

/// Startup configuration for a framework context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct FrameworkConfig {
    /// Language loaded by [`load_default`](crate::FrameworkContext::load_default).
    pub default_language: String,

    /// Locale directories, searched in order.
    pub search_paths: Vec<PathBuf>,

    /// Text-setter method names, tried in order.
    pub text_setters: Vec<String>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_owned(),
            search_paths: vec![PathBuf::from(DEFAULT_SEARCH_PATH)],
            text_setters: vec![DEFAULT_TEXT_SETTER.to_owned()],
        }
    }
}

impl FrameworkConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load a TOML file and reject it unless [`validate`](Self::validate)
    /// finds nothing.
    #[cfg(feature = "config-file")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        let problems = config.validate();
        if problems.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Render as TOML.
    #[cfg(feature = "config-file")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSerialize)
    }

    /// Check the configuration.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.default_language.trim().is_empty() {
            errors.push("default_language must not be empty".to_owned());
        } else if self.default_language.contains(['/', '\\']) {
            errors.push(format!(
                "default_language `{}` must not contain a path separator",
                self.default_language
            ));
        }

        for (index, path) in self.search_paths.iter().enumerate() {
            if path.as_os_str().is_empty() {
                errors.push(format!("search_paths[{index}] is empty"));
            }
        }

        if self.text_setters.is_empty() {
            errors.push("text_setters must name at least one method".to_owned());
        }
        for (index, name) in self.text_setters.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(format!("text_setters[{index}] is empty"));
            }
            if self.text_setters[..index].contains(name) {
                errors.push(format!("text_setters[{index}] repeats `{name}`"));
            }
        }

        errors
    }
}

/// Errors that can occur when loading a framework configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config-file")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[source] toml::ser::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
