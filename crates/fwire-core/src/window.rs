#![forbid(unsafe_code)]

//! Capabilities a host window provides to the runtime.

use crate::reflect::Reflect;

/// A top-level window that a registry can be bound to.
///
/// Construction goes through the type's descriptor (its no-argument
/// constructor); the remaining lifecycle hooks live here.
pub trait Window: Reflect {
    /// Make the window visible.
    fn show(&self);

    /// Register the callback to fire once the window closes.
    ///
    /// Only one callback is kept; a later registration replaces it.
    fn on_close(&self, callback: Box<dyn FnOnce()>);

    /// Repaint after a locale change. Default: nothing to do.
    fn refresh(&self) {}
}
