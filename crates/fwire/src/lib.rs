#![forbid(unsafe_code)]

//! fwire public facade crate.
//!
//! Re-exports the types most applications need from the internal crates and
//! offers a prelude for day-to-day usage.
//!
//! # Example
//!
//! ```rust,ignore
//! use fwire::prelude::*;
//!
//! let context = FrameworkContext::new(FrameworkConfig::load("fwire.toml")?);
//! let main = launch::<MainWindow>(&context)?;
//! context.change_locale("en")?;
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports --------------------------------------------------------

pub use fwire_core::{
    ComponentRegistry, Describe, Object, RenderReport, TypeBuilder, TypeInfo, Window,
    WiringReport,
};

// --- Locale re-exports ------------------------------------------------------

pub use fwire_i18n::{ActiveLocale, EmbeddedBundle, LocaleStore, SearchRoot};

// --- Runtime re-exports -----------------------------------------------------

#[cfg(feature = "runtime")]
pub use fwire_runtime::{FrameworkConfig, FrameworkContext, launch, launch_with_language};

// --- Prelude ----------------------------------------------------------------

/// Common imports for fwire applications.
pub mod prelude {
    pub use crate::{
        ActiveLocale, ComponentRegistry, Describe, EmbeddedBundle, Error, LocaleStore, Object,
        RenderReport, Result, SearchRoot, TypeBuilder, TypeInfo, Window, WiringReport,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{FrameworkConfig, FrameworkContext, launch, launch_with_language};

    pub use fwire_core::{downcast, text, text_of};
}

pub use fwire_core as core;
pub use fwire_i18n as i18n;
#[cfg(feature = "runtime")]
pub use fwire_runtime as runtime;
