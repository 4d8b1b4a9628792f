#![forbid(unsafe_code)]

//! Search roots for locale resources.
//!
//! A root is either a directory on disk or an [`EmbeddedBundle`] compiled
//! into the binary. Every root uses the same naming convention: the resource
//! for language `en` is `en.yml` directly under the root.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// File extension used for locale resources.
pub const RESOURCE_EXTENSION: &str = "yml";

/// Resource name for a language id (`en` → `en.yml`).
#[must_use]
pub fn resource_file_name(language: &str) -> String {
    format!("{language}.{RESOURCE_EXTENSION}")
}

/// Why a single search root did not produce a locale mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The language id cannot name a resource (empty or contains a path separator).
    InvalidLanguage,
    /// No resource for the language exists under the root.
    Missing,
    /// The resource exists but could not be read.
    Unreadable(String),
    /// The resource is not valid YAML.
    Malformed(String),
    /// The document parsed but its top level is not a mapping.
    NotAMapping,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLanguage => write!(f, "invalid language id"),
            Self::Missing => write!(f, "missing"),
            Self::Unreadable(msg) => write!(f, "unreadable: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed: {msg}"),
            Self::NotAMapping => write!(f, "top level is not a mapping"),
        }
    }
}

/// One failed attempt while loading a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Label of the root that was tried (see [`SearchRoot::label`]).
    pub root: String,
    /// What went wrong.
    pub kind: FailureKind,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.root, self.kind)
    }
}

/// In-memory locale resources, keyed by language id.
///
/// ```
/// use fwire_i18n::EmbeddedBundle;
///
/// let bundle = EmbeddedBundle::new("builtin")
///     .with_language("en", "greeting: Hello")
///     .with_language("de", "greeting: Hallo");
/// assert_eq!(bundle.languages().collect::<Vec<_>>(), vec!["de", "en"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedBundle {
    name: String,
    resources: BTreeMap<String, Cow<'static, str>>,
}

impl EmbeddedBundle {
    /// Create an empty bundle with a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Add (or replace) the resource text for a language.
    #[must_use]
    pub fn with_language(
        mut self,
        language: impl Into<String>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.resources.insert(language.into(), text.into());
        self
    }

    /// Bundle name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Languages present in the bundle, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.resources.keys().map(String::as_str)
    }
}

/// A place where locale resources are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoot {
    /// Directory containing `<language>.yml` files.
    Directory(PathBuf),
    /// Resources compiled into the binary.
    Embedded(EmbeddedBundle),
}

impl SearchRoot {
    /// Directory root.
    #[must_use]
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    /// Human-readable label used in logs and load failures.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Directory(path) => path.display().to_string(),
            Self::Embedded(bundle) => format!("embedded:{}", bundle.name),
        }
    }

    /// Read the raw resource text for `language` under this root.
    pub fn read(&self, language: &str) -> Result<Cow<'_, str>, FailureKind> {
        if !is_valid_language(language) {
            return Err(FailureKind::InvalidLanguage);
        }
        match self {
            Self::Directory(dir) => read_file(&dir.join(resource_file_name(language))),
            Self::Embedded(bundle) => bundle
                .resources
                .get(language)
                .map(|text| Cow::Borrowed(text.as_ref()))
                .ok_or(FailureKind::Missing),
        }
    }
}

impl From<PathBuf> for SearchRoot {
    fn from(path: PathBuf) -> Self {
        Self::Directory(path)
    }
}

impl From<&str> for SearchRoot {
    fn from(path: &str) -> Self {
        Self::Directory(PathBuf::from(path))
    }
}

impl From<EmbeddedBundle> for SearchRoot {
    fn from(bundle: EmbeddedBundle) -> Self {
        Self::Embedded(bundle)
    }
}

fn is_valid_language(language: &str) -> bool {
    !language.is_empty()
        && language != "."
        && language != ".."
        && !language.contains(['/', '\\'])
}

fn read_file(path: &Path) -> Result<Cow<'static, str>, FailureKind> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Cow::Owned(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(FailureKind::Missing),
        Err(err) => Err(FailureKind::Unreadable(err.to_string())),
    }
}
