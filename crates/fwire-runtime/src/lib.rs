#![forbid(unsafe_code)]

//! fwire runtime: configuration, window lifecycle and locale switching.
//!
//! # Key Components
//!
//! - [`FrameworkConfig`] - default language, search paths and setter names,
//!   loadable from TOML
//! - [`FrameworkContext`] - the table of open windows and the active locale
//! - [`launch`] / [`launch_with_language`] - open the main window
//!
//! # How it fits in the system
//! The context creates each window through its type descriptor and hands it
//! to a [`fwire_core::ComponentRegistry`]; locale changes load a fresh
//! [`fwire_i18n::LocaleStore`] and re-render every registry.

pub mod config;
pub mod context;
pub mod launcher;

pub use config::{ConfigError, FrameworkConfig};
pub use context::{ContextError, FrameworkContext};
pub use launcher::{MAIN_WINDOW_ID, launch, launch_with_language};
