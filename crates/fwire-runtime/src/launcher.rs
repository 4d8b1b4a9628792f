#![forbid(unsafe_code)]

//! Application entry points.

use std::rc::Rc;

use fwire_core::{Describe, Window};

use crate::context::{ContextError, FrameworkContext};

/// Window id used for the window opened by [`launch`].
pub const MAIN_WINDOW_ID: &str = "mainFrame";

/// Load the default language and open `H` as the main window.
///
/// A default language without resources is not fatal: the window opens and
/// every bound text stays unset until a later locale change succeeds.
pub fn launch<H: Window + Describe>(context: &Rc<FrameworkContext>) -> Result<Rc<H>, ContextError> {
    if let Err(err) = context.load_default() {
        tracing::warn!(target: "fwire.context", error = %err, "launching without texts");
    }
    context.new_frame::<H>(MAIN_WINDOW_ID, &[])
}

/// [`launch`] after making `language` the default.
pub fn launch_with_language<H: Window + Describe>(
    context: &Rc<FrameworkContext>,
    language: &str,
) -> Result<Rc<H>, ContextError> {
    context.set_default_language(language);
    launch::<H>(context)
}
