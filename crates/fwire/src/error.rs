#![forbid(unsafe_code)]

//! Unified error type for fwire applications.
//!
//! Each layer keeps its own error enum; [`Error`] wraps all of them so an
//! application can propagate any fwire failure with `?`.
//!
//! # Error Categories
//!
//! | Category | Source | Typical cause |
//! |----------|--------|---------------|
//! | Reflect  | `fwire-core` | wrong argument type, failing accessor |
//! | Wiring   | `fwire-core` | marked field without a default constructor |
//! | Resource | `fwire-i18n` | no search root yields `<language>.yml` |
//! | Context  | `fwire-runtime` | host not launchable, no matching initializer |
//! | Config   | `fwire-runtime` | unreadable or invalid `fwire.toml` |

use fwire_core::{ReflectError, WiringError};
use fwire_i18n::ResourceLoadError;

#[cfg(feature = "runtime")]
use fwire_runtime::{ConfigError, ContextError};

/// Any failure raised by the fwire crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading, writing or invoking a described member failed.
    #[error(transparent)]
    Reflect(#[from] ReflectError),
    /// A marked field could not be wired.
    #[error(transparent)]
    Wiring(#[from] WiringError),
    /// No locale resource could be loaded.
    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),
    /// A window could not be opened.
    #[cfg(feature = "runtime")]
    #[error(transparent)]
    Context(#[from] ContextError),
    /// The framework configuration could not be loaded.
    #[cfg(feature = "runtime")]
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Short category name, suitable for a log field.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Reflect(_) => "reflect",
            Self::Wiring(_) => "wiring",
            Self::ResourceLoad(_) => "resource",
            #[cfg(feature = "runtime")]
            Self::Context(_) => "context",
            #[cfg(feature = "runtime")]
            Self::Config(_) => "config",
        }
    }

    /// Whether the application can keep running after this error.
    ///
    /// A missing locale leaves the previous texts in place and a failed
    /// field is skipped; the rest stop the operation that raised them.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::ResourceLoad(_) | Self::Wiring(_) => true,
            Self::Reflect(_) => false,
            #[cfg(feature = "runtime")]
            Self::Context(_) | Self::Config(_) => false,
        }
    }
}

/// Standard result type for fwire APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Tests ───────────────────────────────────────────────────────────────
