#![forbid(unsafe_code)]

//! Headless display widgets.

use std::cell::RefCell;

use fwire_core::{Describe, ParamType, ReflectError, TypeBuilder, text_of};

/// Text widget. Constructible with no arguments or an initial text.
#[derive(Debug, Default)]
pub struct Label {
    text: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
            history: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
        self.history.borrow_mut().push(text.to_owned());
    }

    /// Every text received through [`set_text`](Self::set_text), oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Describe for Label {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("Label")
            .default_constructor()
            .constructor(vec![ParamType::of::<String>()], |args| Ok(Label::new(text_of(&args[0])?)))
            .text_setter("setText", Label::set_text)
    }
}

/// Push button with a caption and a tooltip.
#[derive(Debug, Default)]
pub struct Button {
    caption: Label,
    tooltip: RefCell<Option<String>>,
}

impl Button {
    #[must_use]
    pub fn text(&self) -> String {
        self.caption.text()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.caption.history()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.borrow().clone()
    }
}

impl Describe for Button {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("Button")
            .default_constructor()
            .text_setter("setText", |button, text| button.caption.set_text(text))
            .text_setter("setToolTipText", |button, text| {
                *button.tooltip.borrow_mut() = Some(text.to_owned());
            })
    }
}

/// Image widget; has no text setter.
#[derive(Debug, Default)]
pub struct Icon;

impl Describe for Icon {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("Icon").default_constructor()
    }
}

/// Label whose text setter always fails.
#[derive(Debug, Default)]
pub struct BrokenLabel;

impl Describe for BrokenLabel {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("BrokenLabel").default_constructor().method(
            "setText",
            vec![ParamType::of::<String>()],
            |_, _| Err(ReflectError::failed("widget disposed")),
        )
    }
}
