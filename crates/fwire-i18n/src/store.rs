#![forbid(unsafe_code)]

//! Immutable per-language text stores.
//!
//! A [`LocaleStore`] holds the nested text mapping parsed from one
//! `<language>.yml` resource, or nothing when no search root produced one.
//! Stores are never mutated after construction; a language change builds a
//! fresh store and swaps it in (see [`ActiveLocale`](crate::ActiveLocale)).
//!
//! # Resolution
//!
//! Dotted keys descend the mapping one segment at a time. Only leaves yield
//! text: a key that stops on a nested mapping resolves to `None`.
//!
//! ```
//! use fwire_i18n::LocaleStore;
//!
//! let store = LocaleStore::parse("en", "menu:\n  file:\n    open: Open...\n").unwrap();
//! assert_eq!(store.resolve_text("menu.file.open"), Some("Open..."));
//! assert_eq!(store.resolve_text("menu.file"), None);
//! assert_eq!(store.resolve_text("menu.edit.undo"), None);
//! ```

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::source::{FailureKind, LoadFailure, SearchRoot};

/// A node of a locale mapping: a display string or a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNode {
    /// Leaf display text.
    Leaf(String),
    /// Nested mapping.
    Table(BTreeMap<String, TextNode>),
}

/// Every search root failed to yield a parseable resource for a language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no locale resource for `{language}` ({} root(s) tried)", .attempts.len())]
pub struct ResourceLoadError {
    /// Language id that was requested.
    pub language: String,
    /// One entry per root, in search order.
    pub attempts: Vec<LoadFailure>,
}

/// Immutable text mapping for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleStore {
    language: String,
    texts: Option<BTreeMap<String, TextNode>>,
    source: Option<String>,
    failures: Vec<LoadFailure>,
}

impl LocaleStore {
    /// Load `language` from the first root that yields a parseable mapping.
    ///
    /// Roots are tried in order; missing or unparseable resources are
    /// skipped. When every root fails the store is unloaded and the
    /// failures are available through [`load_error`](Self::load_error).
    #[must_use]
    pub fn load(language: &str, roots: &[SearchRoot]) -> Self {
        let _span = tracing::debug_span!(
            target: "fwire.locale",
            "locale.load",
            language,
            roots = roots.len()
        )
        .entered();

        let mut failures = Vec::new();
        for root in roots {
            let label = root.label();
            match root.read(language).and_then(|text| parse_mapping(&text)) {
                Ok(texts) => {
                    tracing::debug!(
                        target: "fwire.locale",
                        language,
                        root = %label,
                        skipped = failures.len(),
                        "locale resource loaded"
                    );
                    return Self {
                        language: language.to_owned(),
                        texts: Some(texts),
                        source: Some(label),
                        failures,
                    };
                }
                Err(kind) => {
                    tracing::trace!(
                        target: "fwire.locale",
                        language,
                        root = %label,
                        reason = %kind,
                        "locale resource skipped"
                    );
                    failures.push(LoadFailure { root: label, kind });
                }
            }
        }

        tracing::debug!(
            target: "fwire.locale",
            language,
            attempts = failures.len(),
            "no locale resource found"
        );
        Self {
            language: language.to_owned(),
            texts: None,
            source: None,
            failures,
        }
    }

    /// Parse a store directly from YAML text.
    pub fn parse(language: &str, yaml: &str) -> Result<Self, ResourceLoadError> {
        match parse_mapping(yaml) {
            Ok(texts) => Ok(Self {
                language: language.to_owned(),
                texts: Some(texts),
                source: Some("inline".to_owned()),
                failures: Vec::new(),
            }),
            Err(kind) => Err(ResourceLoadError {
                language: language.to_owned(),
                attempts: vec![LoadFailure {
                    root: "inline".to_owned(),
                    kind,
                }],
            }),
        }
    }

    /// An unloaded store for `language`.
    #[must_use]
    pub fn unloaded(language: &str) -> Self {
        Self {
            language: language.to_owned(),
            texts: None,
            source: None,
            failures: Vec::new(),
        }
    }

    /// Whether a mapping was parsed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.texts.is_some()
    }

    /// Language id this store was built for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Label of the root the mapping came from.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Roots that were skipped before the mapping was found (or all roots,
    /// for an unloaded store).
    #[must_use]
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// The load failure for an unloaded store; `None` once loaded.
    #[must_use]
    pub fn load_error(&self) -> Option<ResourceLoadError> {
        if self.is_loaded() {
            return None;
        }
        Some(ResourceLoadError {
            language: self.language.clone(),
            attempts: self.failures.clone(),
        })
    }

    /// Resolve a dotted key to leaf text.
    ///
    /// Trailing dots are ignored (`"a.b."` resolves like `"a.b"`). Returns
    /// `None` when the store is unloaded, a segment is absent, a segment
    /// descends into a leaf, or the key ends on a nested mapping.
    #[must_use]
    pub fn resolve_text(&self, key: &str) -> Option<&str> {
        let mut table = self.texts.as_ref()?;
        let trimmed = key.trim_end_matches('.');
        if trimmed.is_empty() && !key.is_empty() {
            return None;
        }
        let mut segments = trimmed.split('.').peekable();
        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match table.get(segment)? {
                TextNode::Leaf(text) if last => return Some(text),
                TextNode::Leaf(_) => return None,
                TextNode::Table(_) if last => return None,
                TextNode::Table(next) => table = next,
            }
        }
        None
    }

    /// Every dotted key that resolves to text, sorted.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(texts) = &self.texts {
            collect_leaf_keys(texts, "", &mut keys);
        }
        keys
    }
}

fn collect_leaf_keys(table: &BTreeMap<String, TextNode>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match node {
            TextNode::Leaf(_) => out.push(key),
            TextNode::Table(inner) => collect_leaf_keys(inner, &key, out),
        }
    }
}

fn parse_mapping(text: &str) -> Result<BTreeMap<String, TextNode>, FailureKind> {
    let mut value: Value =
        serde_yaml::from_str(text).map_err(|err| FailureKind::Malformed(err.to_string()))?;
    value
        .apply_merge()
        .map_err(|err| FailureKind::Malformed(err.to_string()))?;
    match convert(value) {
        Some(TextNode::Table(table)) => Ok(table),
        _ => Err(FailureKind::NotAMapping),
    }
}

/// Scalars become leaf text; `null` and sequences carry no text.
fn convert(value: Value) -> Option<TextNode> {
    match value {
        Value::String(text) => Some(TextNode::Leaf(text)),
        Value::Number(number) => Some(TextNode::Leaf(number.to_string())),
        Value::Bool(flag) => Some(TextNode::Leaf(flag.to_string())),
        Value::Mapping(mapping) => {
            let table = mapping
                .into_iter()
                .filter_map(|(key, value)| Some((scalar_text(&key)?, convert(value)?)))
                .collect();
            Some(TextNode::Table(table))
        }
        Value::Tagged(tagged) => convert(tagged.value),
        Value::Null | Value::Sequence(_) => None,
    }
}

fn scalar_text(key: &Value) -> Option<String> {
    match key {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
