#![forbid(unsafe_code)]

//! A headless top-level window.
//!
//! Test hosts embed a [`Frame`], describe themselves with
//! `extends::<Frame>()` and forward the [`Window`] capabilities with
//! [`frame_window!`](crate::frame_window).

use std::cell::{Cell, RefCell};
use std::fmt;

use fwire_core::{Describe, TypeBuilder, Window};

/// Base window: tracks visibility, refreshes and the close callback.
#[derive(Default)]
pub struct Frame {
    title: RefCell<String>,
    visible: Cell<bool>,
    refreshes: Cell<usize>,
    on_close: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("title", &self.title.borrow())
            .field("visible", &self.visible.get())
            .field("refreshes", &self.refreshes.get())
            .field("closable", &self.on_close.borrow().is_some())
            .finish()
    }
}

impl Frame {
    #[must_use]
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Number of refresh requests received.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.refreshes.get()
    }

    /// Hide the window and fire the close callback, if one is registered.
    pub fn close(&self) {
        self.visible.set(false);
        let callback = self.on_close.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl Describe for Frame {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("Frame")
            .default_constructor()
            .text_setter("setTitle", |frame, title| *frame.title.borrow_mut() = title.to_owned())
    }
}

impl Window for Frame {
    fn show(&self) {
        self.visible.set(true);
    }

    fn on_close(&self, callback: Box<dyn FnOnce()>) {
        *self.on_close.borrow_mut() = Some(callback);
    }

    fn refresh(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

/// Implement `AsRef<Frame>` and [`Window`] for a host by forwarding to an
/// embedded [`Frame`] field.
///
/// ```ignore
/// frame_window!(MainWindow => frame);
/// ```
#[macro_export]
macro_rules! frame_window {
    ($host:ty => $field:ident) => {
        impl ::core::convert::AsRef<$crate::Frame> for $host {
            fn as_ref(&self) -> &$crate::Frame {
                &self.$field
            }
        }

        impl $crate::fwire_core::Window for $host {
            fn show(&self) {
                $crate::fwire_core::Window::show(&self.$field);
            }

            fn on_close(&self, callback: ::std::boxed::Box<dyn FnOnce()>) {
                $crate::fwire_core::Window::on_close(&self.$field, callback);
            }

            fn refresh(&self) {
                $crate::fwire_core::Window::refresh(&self.$field);
            }
        }
    };
}
