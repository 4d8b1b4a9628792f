#![forbid(unsafe_code)]

//! Test fixtures for fwire.
//!
//! A headless stand-in for a GUI toolkit: a few display widgets that record
//! every text they receive, a base [`Frame`] window, and a tracing capture
//! layer for asserting on log output.
//!
//! # Key Components
//!
//! - [`Label`], [`Button`] - widgets with text setters and a write history
//! - [`Icon`] - a widget with no text setter
//! - [`BrokenLabel`] - a widget whose text setter always fails
//! - [`Frame`] - a base window; hosts embed it and expose it via `AsRef`
//! - [`capture`] - collect tracing events emitted during a closure

pub mod capture;
pub mod frame;
pub mod widgets;

use fwire_i18n::{ActiveLocale, EmbeddedBundle, LocaleStore, SearchRoot};

pub use fwire_core;

pub use capture::{CaptureHandle, CapturedEvent, with_captured_tracing};
pub use frame::Frame;
pub use widgets::{BrokenLabel, Button, Icon, Label};

/// An active locale holding `yaml` parsed for `language`.
///
/// # Panics
///
/// Panics if `yaml` is not a mapping.
#[must_use]
pub fn locale(language: &str, yaml: &str) -> ActiveLocale {
    match LocaleStore::parse(language, yaml) {
        Ok(store) => ActiveLocale::new(store),
        Err(err) => panic!("fixture locale does not parse: {err}"),
    }
}

/// An embedded search root named `name` holding the given languages.
#[must_use]
pub fn embedded_root(name: &str, languages: &[(&str, &'static str)]) -> SearchRoot {
    let bundle = languages
        .iter()
        .fold(EmbeddedBundle::new(name), |bundle, (language, yaml)| {
            bundle.with_language(*language, *yaml)
        });
    SearchRoot::from(bundle)
}
