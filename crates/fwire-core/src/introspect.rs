#![forbid(unsafe_code)]

//! Lookups over a described object's type and its ancestors.
//!
//! Member searches walk the own type first and then each ancestor outward;
//! initializers are the exception and come from the own type only.
//! A miss is an ordinary `None`/empty result, never an error.

use crate::reflect::{
    ConstructorInfo, FieldInfo, MarkerKind, MethodInfo, Object, ParamType, Reflect, TypeInfo,
};

/// Fields carrying `kind`, own type first, each type in declaration order.
#[must_use]
pub fn find_marked_fields<R: Reflect + ?Sized>(object: &R, kind: MarkerKind) -> Vec<&'static FieldInfo> {
    object
        .type_info()
        .ancestry()
        .flat_map(TypeInfo::fields)
        .filter(|field| field.marker_kind() == Some(kind))
        .collect()
}

/// First method named `name` whose declared parameters are exactly `params`.
#[must_use]
pub fn find_method(info: &'static TypeInfo, name: &str, params: &[ParamType]) -> Option<&'static MethodInfo> {
    info.ancestry().find_map(|ty| {
        ty.methods()
            .iter()
            .find(|method| method.name() == name && method.has_signature(params))
    })
}

/// First candidate name (in the given order) that names a one-text-argument
/// method on the object or an ancestor.
#[must_use]
pub fn find_text_setter<R: Reflect + ?Sized>(
    object: &R,
    candidates: &[String],
) -> Option<&'static MethodInfo> {
    let info = object.type_info();
    let text = [ParamType::of::<String>()];
    candidates.iter().find_map(|name| find_method(info, name, &text))
}

/// `get<Field>` taking no arguments.
#[must_use]
pub fn find_getter<R: Reflect + ?Sized>(object: &R, field: &str) -> Option<&'static MethodInfo> {
    find_method(object.type_info(), &accessor_name("get", field), &[])
}

/// `set<Field>` taking one argument of the field's declared type.
#[must_use]
pub fn find_setter<R: Reflect + ?Sized>(
    object: &R,
    field: &str,
    declared: ParamType,
) -> Option<&'static MethodInfo> {
    find_method(object.type_info(), &accessor_name("set", field), &[declared])
}

/// First constructor of `info` whose parameters accept `args`.
#[must_use]
pub fn resolve_constructor(info: &'static TypeInfo, args: &[Object]) -> Option<&'static ConstructorInfo> {
    info.constructors().iter().find(|ctor| ctor.accepts(args))
}

/// Methods marked "run after wiring" declared by `info` itself.
///
/// Ancestors are not searched: a window only runs its own initializers.
pub fn initializers(info: &'static TypeInfo) -> impl Iterator<Item = &'static MethodInfo> {
    info.methods()
        .iter()
        .filter(|method| method.runs_after_wiring())
}

/// First initializer whose parameters accept `args`.
#[must_use]
pub fn find_initializer(info: &'static TypeInfo, args: &[Object]) -> Option<&'static MethodInfo> {
    initializers(info).find(|method| method.accepts(args))
}

/// `prefix` followed by `field` with its first character upper-cased.
#[must_use]
pub fn accessor_name(prefix: &str, field: &str) -> String {
    let mut chars = field.chars();
    let mut name = String::with_capacity(prefix.len() + field.len());
    name.push_str(prefix);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}
