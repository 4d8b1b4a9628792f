#![forbid(unsafe_code)]

//! fwire core: declarative wiring of window fields to localized text.
//!
//! # Key Components
//!
//! - [`Describe`] / [`TypeInfo`] - per-type descriptors carrying markers,
//!   fields, methods and constructors, built once and cached
//! - [`introspect`] - lookups over a descriptor and its ancestors
//! - [`Window`] - the capabilities a host window must provide
//! - [`ComponentRegistry`] - per-window map from display objects to text keys,
//!   auto-wiring and re-rendering
//!
//! # How it fits in the system
//! Hosts describe themselves through [`TypeBuilder`]; the registry consults
//! those descriptors to populate marked fields and pushes text from the
//! active [`fwire_i18n::LocaleStore`] into every registered object. The
//! runtime crate owns one registry per open window.

pub mod error;
pub mod introspect;
pub mod reflect;
pub mod registry;
pub mod report;
pub mod window;

pub use error::{ReflectError, WiringError};
pub use reflect::{
    ConstructorInfo, Describe, FieldInfo, FieldMarker, MarkerKind, MethodInfo, Object, ObjectId,
    ParamType, Reflect, TypeBuilder, TypeInfo, downcast, text, text_of, type_info_of,
};
pub use registry::{ComponentRegistry, SetterNames};
pub use report::{FieldOutcome, FieldStatus, RenderOutcome, RenderReport, WiringReport};
pub use window::Window;
