#![forbid(unsafe_code)]

//! Per-type descriptors.
//!
//! A type takes part in wiring by implementing [`Describe`]: it fills a
//! [`TypeBuilder`] with its markers, marked fields, callable methods and
//! constructors. The resulting [`TypeInfo`] is built once per type (on first
//! use) and cached for the lifetime of the thread.
//!
//! # Ancestry
//!
//! A descriptor may extend another with [`TypeBuilder::extends`], provided
//! the derived type exposes its base through [`AsRef`]. Lookups walk the own
//! type first and then each ancestor outward; members declared by an
//! ancestor are invoked on the base view of the object.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use fwire_core::{Describe, TypeBuilder, type_info_of};
//!
//! #[derive(Default)]
//! struct Label {
//!     text: RefCell<String>,
//! }
//!
//! impl Describe for Label {
//!     fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
//!         ty.named("Label")
//!             .default_constructor()
//!             .text_setter("setText", |label, text| *label.text.borrow_mut() = text.to_owned())
//!     }
//! }
//!
//! let info = type_info_of::<Label>();
//! assert_eq!(info.name(), "Label");
//! assert_eq!(info.methods().len(), 1);
//! ```
//!
//! # Invariants
//!
//! 1. `type_info_of::<T>()` returns the same descriptor for every call on a thread.
//! 2. Fields, methods and constructors keep declaration order.
//! 3. An ancestor descriptor is fully built before the derived one is cached.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::ReflectError;
use crate::registry::ComponentRegistry;

/// A described object with shared ownership and stable identity.
pub type Object = Rc<dyn Reflect>;

type ReadFn = Box<dyn Fn(&dyn Any) -> Result<Option<Object>, ReflectError>>;
type WriteFn = Box<dyn Fn(&dyn Any, Object) -> Result<(), ReflectError>>;
type CallFn = Box<dyn Fn(&dyn Any, &[Object]) -> Result<Option<Object>, ReflectError>>;
type BuildFn = Box<dyn Fn(&[Object]) -> Result<Object, ReflectError>>;

/// Object-safe access to a value's descriptor.
///
/// Implemented for every [`Describe`] type; never implement it by hand.
pub trait Reflect: Any {
    /// Descriptor of the value's concrete type.
    fn type_info(&self) -> &'static TypeInfo;
    /// The value as [`Any`].
    fn as_any(&self) -> &dyn Any;
    /// The shared value as `Rc<dyn Any>`, for downcasting.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.type_info().name()).finish()
    }
}

/// A type that can describe its wiring surface.
pub trait Describe: Any + Sized {
    /// Populate the descriptor for `Self`.
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self>;
}

impl<T: Describe> Reflect for T {
    fn type_info(&self) -> &'static TypeInfo {
        type_info_of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl Describe for String {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("String").default_constructor()
    }
}

thread_local! {
    // Descriptors are leaked once per type and thread; UI code runs on one thread.
    static DESCRIPTORS: RefCell<HashMap<TypeId, &'static TypeInfo>> = RefCell::new(HashMap::new());
}

/// Cached descriptor for `T`, built on first use.
pub fn type_info_of<T: Describe>() -> &'static TypeInfo {
    let id = TypeId::of::<T>();
    if let Some(info) = DESCRIPTORS.with(|cache| cache.borrow().get(&id).copied()) {
        return info;
    }
    let built: &'static TypeInfo = Box::leak(Box::new(T::describe(TypeBuilder::new()).finish()));
    tracing::trace!(target: "fwire.reflect", ty = built.name, "descriptor built");
    DESCRIPTORS.with(|cache| *cache.borrow_mut().entry(id).or_insert(built))
}

// ── Identity ────────────────────────────────────────────────────────────

/// Identity of a shared object: the address of its `Rc` allocation.
///
/// Two value-equal objects in separate allocations have different ids.
/// An id is only meaningful while the object is kept alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of `object`.
    #[must_use]
    pub fn of<T: ?Sized>(object: &Rc<T>) -> Self {
        Self(Rc::as_ptr(object).cast::<()>() as usize)
    }
}

// ── Markers ─────────────────────────────────────────────────────────────

/// Marker carried by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMarker {
    /// Populate the field and keep it in sync with the text under `key`.
    BindText { key: String },
    /// Store the owning [`ComponentRegistry`] in the field.
    InjectRegistry,
}

impl FieldMarker {
    /// Kind of this marker, without payload.
    #[must_use]
    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::BindText { .. } => MarkerKind::BindText,
            Self::InjectRegistry => MarkerKind::InjectRegistry,
        }
    }
}

/// Field marker kinds, used to select fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    BindText,
    InjectRegistry,
}

// ── Parameter types ─────────────────────────────────────────────────────

/// Declared type of a parameter or field.
#[derive(Clone, Copy)]
pub struct ParamType {
    resolve: fn() -> &'static TypeInfo,
}

impl ParamType {
    /// Parameter of type `T`.
    #[must_use]
    pub fn of<T: Describe>() -> Self {
        Self {
            resolve: type_info_of::<T>,
        }
    }

    /// Descriptor of the declared type.
    #[must_use]
    pub fn info(self) -> &'static TypeInfo {
        (self.resolve)()
    }

    /// Whether `arg`'s runtime type is the declared type or derives from it.
    #[must_use]
    pub fn accepts<R: Reflect + ?Sized>(self, arg: &R) -> bool {
        arg.type_info().is_a(self.info())
    }

    /// Whether both declare the same type.
    #[must_use]
    pub fn same_as(self, other: ParamType) -> bool {
        self.info().id() == other.info().id()
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamType").field(&self.info().name()).finish()
    }
}

fn check_args(member: &'static str, params: &[ParamType], args: &[Object]) -> Result<(), ReflectError> {
    if params.len() != args.len() {
        return Err(ReflectError::ArityMismatch {
            member,
            expected: params.len(),
            found: args.len(),
        });
    }
    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        if !param.accepts(&**arg) {
            return Err(ReflectError::ArgumentMismatch {
                member,
                index,
                expected: param.info().name(),
                found: arg.type_info().name(),
            });
        }
    }
    Ok(())
}

// ── Members ─────────────────────────────────────────────────────────────

/// A declared field with optional marker and erased accessors.
pub struct FieldInfo {
    name: &'static str,
    owner: TypeId,
    owner_name: &'static str,
    declared: ParamType,
    marker: Option<FieldMarker>,
    read: Option<ReadFn>,
    write: Option<WriteFn>,
}

impl FieldInfo {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type that declares the field.
    #[must_use]
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    #[must_use]
    pub fn declared_type(&self) -> ParamType {
        self.declared
    }

    #[must_use]
    pub fn marker(&self) -> Option<&FieldMarker> {
        self.marker.as_ref()
    }

    #[must_use]
    pub fn marker_kind(&self) -> Option<MarkerKind> {
        self.marker.as_ref().map(FieldMarker::kind)
    }

    /// Text key of a "bind text" field.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match &self.marker {
            Some(FieldMarker::BindText { key }) => Some(key),
            _ => None,
        }
    }

    /// Read the field directly, bypassing any getter.
    pub fn read<R: Reflect + ?Sized>(&self, object: &R) -> Result<Option<Object>, ReflectError> {
        let read = self
            .read
            .as_ref()
            .ok_or(ReflectError::NotReadable { field: self.name })?;
        read(view(object, self.owner, self.owner_name)?)
    }

    /// Write the field directly, bypassing any setter.
    pub fn write<R: Reflect + ?Sized>(&self, object: &R, value: Object) -> Result<(), ReflectError> {
        let write = self
            .write
            .as_ref()
            .ok_or(ReflectError::NotWritable { field: self.name })?;
        write(view(object, self.owner, self.owner_name)?, value)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("owner", &self.owner_name)
            .field("marker", &self.marker)
            .field("readable", &self.read.is_some())
            .field("writable", &self.write.is_some())
            .finish()
    }
}

/// A callable method.
pub struct MethodInfo {
    name: &'static str,
    owner: TypeId,
    owner_name: &'static str,
    params: Vec<ParamType>,
    after_wiring: bool,
    call: CallFn,
}

impl MethodInfo {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    #[must_use]
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether the method carries the "run after wiring" marker.
    #[must_use]
    pub fn runs_after_wiring(&self) -> bool {
        self.after_wiring
    }

    /// Whether the declared parameter types are exactly `params`.
    #[must_use]
    pub fn has_signature(&self, params: &[ParamType]) -> bool {
        self.params.len() == params.len()
            && self.params.iter().zip(params).all(|(a, b)| a.same_as(*b))
    }

    /// Whether `args` satisfy the parameter list by count and type.
    #[must_use]
    pub fn accepts(&self, args: &[Object]) -> bool {
        check_args(self.name, &self.params, args).is_ok()
    }

    /// Invoke the method on `object` (or the matching base view of it).
    pub fn invoke<R: Reflect + ?Sized>(
        &self,
        object: &R,
        args: &[Object],
    ) -> Result<Option<Object>, ReflectError> {
        check_args(self.name, &self.params, args)?;
        (self.call)(view(object, self.owner, self.owner_name)?, args)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("owner", &self.owner_name)
            .field("params", &self.params)
            .field("after_wiring", &self.after_wiring)
            .finish()
    }
}

/// A public constructor.
pub struct ConstructorInfo {
    type_name: &'static str,
    params: Vec<ParamType>,
    build: BuildFn,
}

impl ConstructorInfo {
    #[must_use]
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn accepts(&self, args: &[Object]) -> bool {
        check_args(self.type_name, &self.params, args).is_ok()
    }

    /// Build a new instance from `args`.
    pub fn construct(&self, args: &[Object]) -> Result<Object, ReflectError> {
        check_args(self.type_name, &self.params, args)?;
        (self.build)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("type", &self.type_name)
            .field("params", &self.params)
            .finish()
    }
}

// ── Type descriptor ─────────────────────────────────────────────────────

trait Upcast {
    fn upcast<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Any>;
}

struct Projection<T, B>(PhantomData<fn(&T) -> &B>);

impl<T: AsRef<B> + Any, B: Any> Upcast for Projection<T, B> {
    fn upcast<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Any> {
        object
            .downcast_ref::<T>()
            .map(|derived| AsRef::<B>::as_ref(derived) as &dyn Any)
    }
}

struct ParentLink {
    info: &'static TypeInfo,
    upcast: Box<dyn Upcast>,
}

/// Descriptor of one type: markers, members and optional parent.
pub struct TypeInfo {
    name: &'static str,
    id: TypeId,
    launchable: bool,
    parent: Option<ParentLink>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    constructors: Vec<ConstructorInfo>,
}

impl TypeInfo {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Whether the type carries the "is launchable" marker.
    #[must_use]
    pub fn is_launchable(&self) -> bool {
        self.launchable
    }

    #[must_use]
    pub fn parent(&self) -> Option<&'static TypeInfo> {
        self.parent.as_ref().map(|link| link.info)
    }

    /// Fields declared by this type only, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Methods declared by this type only, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    #[must_use]
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// This type, then each ancestor outward.
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static TypeInfo> {
        std::iter::successors(Some(self), |info| info.parent())
    }

    /// Whether `other` is this type or one of its ancestors.
    #[must_use]
    pub fn is_a(&'static self, other: &TypeInfo) -> bool {
        self.ancestry().any(|info| info.id == other.id)
    }

    /// Project `object` (of this type) to the view of ancestor `target`.
    fn view_as<'a>(&self, object: &'a dyn Any, target: TypeId) -> Option<&'a dyn Any> {
        let mut info = self;
        let mut current = object;
        loop {
            if info.id == target {
                return Some(current);
            }
            let link = info.parent.as_ref()?;
            current = link.upcast.upcast(current)?;
            info = link.info;
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("launchable", &self.launchable)
            .field("parent", &self.parent().map(TypeInfo::name))
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

fn view<'a, R: Reflect + ?Sized>(
    object: &'a R,
    owner: TypeId,
    owner_name: &'static str,
) -> Result<&'a dyn Any, ReflectError> {
    let info = object.type_info();
    info.view_as(object.as_any(), owner)
        .ok_or(ReflectError::NotAnInstance {
            expected: owner_name,
            found: info.name(),
        })
}

fn this<T: Any>(object: &dyn Any) -> Result<&T, ReflectError> {
    object
        .downcast_ref::<T>()
        .ok_or(ReflectError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: "dyn Any",
        })
}

// ── Builder ─────────────────────────────────────────────────────────────

/// Collects the descriptor of `T` inside [`Describe::describe`].
pub struct TypeBuilder<T> {
    info: TypeInfo,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Describe> TypeBuilder<T> {
    fn new() -> Self {
        Self {
            info: TypeInfo {
                name: std::any::type_name::<T>(),
                id: TypeId::of::<T>(),
                launchable: false,
                parent: None,
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    fn finish(mut self) -> TypeInfo {
        let name = self.info.name;
        for field in &mut self.info.fields {
            field.owner_name = name;
        }
        for method in &mut self.info.methods {
            method.owner_name = name;
        }
        for constructor in &mut self.info.constructors {
            constructor.type_name = name;
        }
        self.info
    }

    /// Display name used in logs and errors (defaults to the Rust type path).
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.info.name = name;
        self
    }

    /// Mark the type as launchable as a top-level window.
    #[must_use]
    pub fn launchable(mut self) -> Self {
        self.info.launchable = true;
        self
    }

    /// Inherit the members of `B`; the base view comes from `AsRef<B>`.
    #[must_use]
    pub fn extends<B: Describe>(mut self) -> Self
    where
        T: AsRef<B>,
    {
        self.info.parent = Some(ParentLink {
            info: type_info_of::<B>(),
            upcast: Box::new(Projection::<T, B>(PhantomData)),
        });
        self
    }

    /// Declare a field marked "bind text" under `key`.
    #[must_use]
    pub fn bind_text<V, G, S>(self, name: &'static str, key: impl Into<String>, get: G, set: S) -> Self
    where
        V: Describe,
        G: Fn(&T) -> Option<Rc<V>> + 'static,
        S: Fn(&T, Rc<V>) + 'static,
    {
        let (read, write) = field_accessors(get, set);
        self.push_field(
            name,
            ParamType::of::<V>(),
            Some(FieldMarker::BindText { key: key.into() }),
            Some(read),
            Some(write),
        )
    }

    /// Declare a write-only field marked "inject registry".
    #[must_use]
    pub fn inject_registry<S>(self, name: &'static str, set: S) -> Self
    where
        S: Fn(&T, Rc<ComponentRegistry>) + 'static,
    {
        let write: WriteFn = Box::new(move |object: &dyn Any, value: Object| {
            set(this::<T>(object)?, downcast::<ComponentRegistry>(&value)?);
            Ok(())
        });
        self.push_field(
            name,
            ParamType::of::<ComponentRegistry>(),
            Some(FieldMarker::InjectRegistry),
            None,
            Some(write),
        )
    }

    /// Declare an unmarked field.
    #[must_use]
    pub fn field<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: Describe,
        G: Fn(&T) -> Option<Rc<V>> + 'static,
        S: Fn(&T, Rc<V>) + 'static,
    {
        let (read, write) = field_accessors(get, set);
        self.push_field(name, ParamType::of::<V>(), None, Some(read), Some(write))
    }

    fn push_field(
        mut self,
        name: &'static str,
        declared: ParamType,
        marker: Option<FieldMarker>,
        read: Option<ReadFn>,
        write: Option<WriteFn>,
    ) -> Self {
        self.info.fields.push(FieldInfo {
            name,
            owner: TypeId::of::<T>(),
            owner_name: self.info.name,
            declared,
            marker,
            read,
            write,
        });
        self
    }

    /// Declare a method with explicit parameter types.
    #[must_use]
    pub fn method<F>(self, name: &'static str, params: Vec<ParamType>, f: F) -> Self
    where
        F: Fn(&T, &[Object]) -> Result<Option<Object>, ReflectError> + 'static,
    {
        let call: CallFn = Box::new(move |object: &dyn Any, args: &[Object]| f(this::<T>(object)?, args));
        self.push_method(name, params, false, call)
    }

    /// Declare a method taking one text argument.
    #[must_use]
    pub fn text_setter<F>(self, name: &'static str, f: F) -> Self
    where
        F: Fn(&T, &str) + 'static,
    {
        let call: CallFn = Box::new(move |object: &dyn Any, args: &[Object]| {
            f(this::<T>(object)?, text_of(&args[0])?);
            Ok(None)
        });
        self.push_method(name, vec![ParamType::of::<String>()], false, call)
    }

    /// Declare a no-argument method returning a `V`.
    #[must_use]
    pub fn getter<V, F>(self, name: &'static str, f: F) -> Self
    where
        V: Describe,
        F: Fn(&T) -> Option<Rc<V>> + 'static,
    {
        let call: CallFn = Box::new(move |object: &dyn Any, _args: &[Object]| {
            Ok(f(this::<T>(object)?).map(|value| value as Object))
        });
        self.push_method(name, Vec::new(), false, call)
    }

    /// Declare a method taking one `V`.
    #[must_use]
    pub fn setter<V, F>(self, name: &'static str, f: F) -> Self
    where
        V: Describe,
        F: Fn(&T, Rc<V>) + 'static,
    {
        let call: CallFn = Box::new(move |object: &dyn Any, args: &[Object]| {
            f(this::<T>(object)?, downcast::<V>(&args[0])?);
            Ok(None)
        });
        self.push_method(name, vec![ParamType::of::<V>()], false, call)
    }

    /// Declare a method marked "run after wiring".
    #[must_use]
    pub fn after_wiring<F>(self, name: &'static str, params: Vec<ParamType>, f: F) -> Self
    where
        F: Fn(&T, &[Object]) -> Result<(), ReflectError> + 'static,
    {
        let call: CallFn = Box::new(move |object: &dyn Any, args: &[Object]| {
            f(this::<T>(object)?, args).map(|()| None)
        });
        self.push_method(name, params, true, call)
    }

    fn push_method(mut self, name: &'static str, params: Vec<ParamType>, after_wiring: bool, call: CallFn) -> Self {
        self.info.methods.push(MethodInfo {
            name,
            owner: TypeId::of::<T>(),
            owner_name: self.info.name,
            params,
            after_wiring,
            call,
        });
        self
    }

    /// Declare a public constructor.
    #[must_use]
    pub fn constructor<F>(mut self, params: Vec<ParamType>, f: F) -> Self
    where
        F: Fn(&[Object]) -> Result<T, ReflectError> + 'static,
    {
        let build: BuildFn = Box::new(move |args: &[Object]| f(args).map(|value| Rc::new(value) as Object));
        self.info.constructors.push(ConstructorInfo {
            type_name: self.info.name,
            params,
            build,
        });
        self
    }

    /// Declare the no-argument constructor via [`Default`].
    #[must_use]
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(Vec::new(), |_| Ok(T::default()))
    }
}

fn field_accessors<T, V, G, S>(get: G, set: S) -> (ReadFn, WriteFn)
where
    T: Any,
    V: Describe,
    G: Fn(&T) -> Option<Rc<V>> + 'static,
    S: Fn(&T, Rc<V>) + 'static,
{
    let read: ReadFn = Box::new(move |object: &dyn Any| {
        Ok(get(this::<T>(object)?).map(|value| value as Object))
    });
    let write: WriteFn = Box::new(move |object: &dyn Any, value: Object| {
        set(this::<T>(object)?, downcast::<V>(&value)?);
        Ok(())
    });
    (read, write)
}

// ── Argument helpers ────────────────────────────────────────────────────

/// Downcast a shared object to its concrete type.
pub fn downcast<V: Describe>(value: &Object) -> Result<Rc<V>, ReflectError> {
    let found = value.type_info().name();
    Rc::clone(value)
        .into_any()
        .downcast::<V>()
        .map_err(|_| ReflectError::TypeMismatch {
            expected: type_info_of::<V>().name(),
            found,
        })
}

/// Borrow a text argument.
pub fn text_of(value: &Object) -> Result<&str, ReflectError> {
    value
        .as_any()
        .downcast_ref::<String>()
        .map(String::as_str)
        .ok_or_else(|| ReflectError::TypeMismatch {
            expected: "String",
            found: value.type_info().name(),
        })
}

/// Wrap text as an argument object.
#[must_use]
pub fn text(value: impl Into<String>) -> Object {
    Rc::new(value.into())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Base {
        caption: RefCell<String>,
    }

    impl Describe for Base {
        fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
            ty.named("Base")
                .default_constructor()
                .text_setter("setCaption", |base, text| *base.caption.borrow_mut() = text.to_owned())
        }
    }

    #[derive(Default)]
    struct Derived {
        base: Base,
    }

    impl AsRef<Base> for Derived {
        fn as_ref(&self) -> &Base {
            &self.base
        }
    }

    impl Describe for Derived {
        fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
            ty.named("Derived").extends::<Base>().default_constructor()
        }
    }

    #[test]
    fn descriptor_is_cached() {
        let a = type_info_of::<Base>();
        let b = type_info_of::<Base>();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn ancestry_walks_outward() {
        let names: Vec<_> = type_info_of::<Derived>().ancestry().map(TypeInfo::name).collect();
        assert_eq!(names, vec!["Derived", "Base"]);
    }

    #[test]
    fn derived_is_a_base() {
        assert!(type_info_of::<Derived>().is_a(type_info_of::<Base>()));
        assert!(!type_info_of::<Base>().is_a(type_info_of::<Derived>()));
    }

    #[test]
    fn base_method_invoked_through_projection() {
        let derived = Derived::default();
        let method = &type_info_of::<Base>().methods()[0];
        method.invoke(&derived, &[text("hello")]).unwrap();
        assert_eq!(*derived.base.caption.borrow(), "hello");
    }

    #[test]
    fn invoke_rejects_unrelated_object() {
        let method = &type_info_of::<Base>().methods()[0];
        let err = method.invoke(&String::new(), &[text("x")]).unwrap_err();
        assert_eq!(
            err,
            ReflectError::NotAnInstance {
                expected: "Base",
                found: "String",
            }
        );
    }

    #[test]
    fn invoke_checks_arity_and_types() {
        let base = Base::default();
        let method = &type_info_of::<Base>().methods()[0];
        assert!(matches!(
            method.invoke(&base, &[]),
            Err(ReflectError::ArityMismatch { expected: 1, found: 0, .. })
        ));
        let not_text: Object = Rc::new(Base::default());
        assert!(matches!(
            method.invoke(&base, &[not_text]),
            Err(ReflectError::ArgumentMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn param_accepts_derived_argument() {
        let derived: Object = Rc::new(Derived::default());
        assert!(ParamType::of::<Base>().accepts(&*derived));
        assert!(!ParamType::of::<String>().accepts(&*derived));
    }

    #[test]
    fn object_identity_is_by_allocation() {
        let a: Object = text("same");
        let b: Object = text("same");
        assert_ne!(ObjectId::of(&a), ObjectId::of(&b));
        assert_eq!(ObjectId::of(&a), ObjectId::of(&Rc::clone(&a)));
    }

    #[test]
    fn downcast_round_trip() {
        let value = text("hi");
        assert_eq!(*downcast::<String>(&value).unwrap(), "hi");
        assert_eq!(text_of(&value).unwrap(), "hi");
        let other: Object = Rc::new(Base::default());
        assert!(downcast::<String>(&other).is_err());
        assert!(text_of(&other).is_err());
    }
}
