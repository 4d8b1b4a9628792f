#![forbid(unsafe_code)]

//! Localization text stores for fwire.
//!
//! Provides one immutable [`LocaleStore`] per language, loaded from the
//! first [`SearchRoot`] that yields a parseable `<language>.yml` resource,
//! and an [`ActiveLocale`] slot that swaps whole stores on language change.
//!
//! # Role in fwire
//! `fwire-i18n` isolates resource lookup and dotted-key resolution so the
//! component registry can stay agnostic of where text comes from. It does
//! not depend on windows or wiring, keeping the localization layer reusable
//! and testable.

pub mod active;
pub mod source;
pub mod store;

pub use active::ActiveLocale;
pub use source::{EmbeddedBundle, FailureKind, LoadFailure, SearchRoot, resource_file_name};
pub use store::{LocaleStore, ResourceLoadError, TextNode};
