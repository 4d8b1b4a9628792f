#![forbid(unsafe_code)]

//! Per-window component registries.
//!
//! A [`ComponentRegistry`] is bound to one host window. It owns an
//! insertion-ordered map from display-object identity to text key, fills
//! the host's marked fields ([`auto_wire`](ComponentRegistry::auto_wire)) and
//! pushes text from the active locale into every registered object
//! ([`render`](ComponentRegistry::render)).
//!
//! # Role in fwire
//! The runtime creates one registry per open window and re-renders all of
//! them after a locale change. Application code uses the registry handed to
//! its "inject registry" field to add and remove components at runtime.
//!
//! # Ownership
//! The host owns the registry through its injected field and the registry
//! owns the host, so the pair forms a reference cycle until
//! [`clear`](ComponentRegistry::clear) drops the host. The runtime clears a
//! registry when its window closes.
//!
//! # Failure handling
//! Neither wiring nor rendering stops at the first failure. Each marked
//! field and each registered pair is handled on its own; failures are logged
//! and reported in [`WiringReport`] / [`RenderReport`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use fwire_i18n::{ActiveLocale, LocaleStore};
use indexmap::IndexMap;

use crate::error::{ReflectError, WiringError};
use crate::introspect::{find_getter, find_marked_fields, find_setter, find_text_setter, resolve_constructor};
use crate::reflect::{
    Describe, FieldInfo, MarkerKind, Object, ObjectId, Reflect, TypeBuilder, TypeInfo, downcast, text,
    type_info_of,
};
use crate::report::{FieldOutcome, FieldStatus, RenderOutcome, RenderReport, WiringReport};
use crate::window::Window;

/// Ordered list of text-setter method names, shared by every registry of a
/// context.
///
/// Cloning shares the list; a name pushed later is seen by every holder.
#[derive(Debug, Clone, Default)]
pub struct SetterNames(Rc<RefCell<Vec<String>>>);

impl SetterNames {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Rc::new(RefCell::new(names.into_iter().map(Into::into).collect())))
    }

    /// Append a name; earlier names keep priority.
    pub fn push(&self, name: impl Into<String>) {
        self.0.borrow_mut().push(name.into());
    }

    /// Copy of the current list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Clone)]
struct Registration {
    object: Object,
    key: String,
}

/// Registry of localized components for one host window.
pub struct ComponentRegistry {
    host: RefCell<Option<Rc<dyn Window>>>,
    registrations: RefCell<IndexMap<ObjectId, Registration>>,
    setter_names: SetterNames,
    locale: ActiveLocale,
}

impl Describe for ComponentRegistry {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("ComponentRegistry")
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self
            .host
            .try_borrow()
            .ok()
            .and_then(|host| host.as_ref().map(|window| window.type_info().name()));
        let registrations = self.registrations.try_borrow().map(|map| map.len()).ok();
        f.debug_struct("ComponentRegistry")
            .field("host", &host)
            .field("registrations", &registrations)
            .field("locale", &self.locale)
            .finish()
    }
}

impl ComponentRegistry {
    /// Bind a registry to `host`.
    #[must_use]
    pub fn new(host: Rc<dyn Window>, setter_names: SetterNames, locale: ActiveLocale) -> Rc<Self> {
        Rc::new(Self {
            host: RefCell::new(Some(host)),
            registrations: RefCell::new(IndexMap::new()),
            setter_names,
            locale,
        })
    }

    /// The bound window; `None` once cleared.
    #[must_use]
    pub fn host(&self) -> Option<Rc<dyn Window>> {
        self.host.borrow().clone()
    }

    /// Handle to the locale this registry renders from.
    #[must_use]
    pub fn locale(&self) -> &ActiveLocale {
        &self.locale
    }

    // ── Wiring ──────────────────────────────────────────────────────────

    /// Populate the host's marked fields, then render.
    ///
    /// "Bind text" fields keep an existing value (getter first, else direct
    /// read) or receive a default-constructed one; the value is written back
    /// (setter first, else direct write) and registered under the field's
    /// key. "Inject registry" fields receive this registry. A field whose
    /// value cannot be applied is reported and left unregistered.
    pub fn auto_wire(self: &Rc<Self>) -> WiringReport {
        let Some(host) = self.host() else {
            tracing::warn!(target: "fwire.registry", "auto-wire on a cleared registry");
            return WiringReport::default();
        };
        let _span = tracing::debug_span!(
            target: "fwire.registry",
            "registry.auto_wire",
            host = host.type_info().name()
        )
        .entered();

        let mut outcomes = Vec::new();
        for field in find_marked_fields(&*host, MarkerKind::BindText) {
            let key = field.key().unwrap_or_default();
            let status = match wire_text_field(&*host, field) {
                Ok(value) => {
                    self.insert(value, key);
                    FieldStatus::Registered { key: key.to_owned() }
                }
                Err(err) => {
                    tracing::warn!(
                        target: "fwire.registry",
                        field = field.name(),
                        key,
                        error = %err,
                        "text field not wired"
                    );
                    FieldStatus::Failed(err)
                }
            };
            outcomes.push(FieldOutcome {
                field: field.name(),
                marker: MarkerKind::BindText,
                status,
            });
        }

        let this: Object = Rc::clone(self) as Object;
        for field in find_marked_fields(&*host, MarkerKind::InjectRegistry) {
            let status = match apply_field(&*host, field, Rc::clone(&this)) {
                Ok(()) => FieldStatus::Injected,
                Err(err) => {
                    tracing::warn!(
                        target: "fwire.registry",
                        field = field.name(),
                        error = %err,
                        "registry not injected"
                    );
                    FieldStatus::Failed(WiringError::Apply(err))
                }
            };
            outcomes.push(FieldOutcome {
                field: field.name(),
                marker: MarkerKind::InjectRegistry,
                status,
            });
        }

        let render = self.render();
        tracing::debug!(
            target: "fwire.registry",
            fields = outcomes.len(),
            registered = self.len(),
            "auto-wire complete"
        );
        WiringReport { outcomes, render }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Push the active text into every registered object, in registration
    /// order.
    ///
    /// A key that resolves to no text leaves the object untouched. Setters
    /// may register or release components; the pass works on a snapshot
    /// taken before the first setter runs.
    pub fn render(&self) -> RenderReport {
        let pairs: Vec<Registration> = self.registrations.borrow().values().cloned().collect();
        let store = self.locale.current();
        let names = self.setter_names.snapshot();
        let _span = tracing::debug_span!(
            target: "fwire.registry",
            "registry.render",
            language = store.language(),
            pairs = pairs.len()
        )
        .entered();

        let mut report = RenderReport::default();
        for pair in &pairs {
            report.record(render_pair(&pair.object, &pair.key, &store, &names));
        }
        report
    }

    fn render_one(&self, object: &Object, key: &str) -> RenderOutcome {
        render_pair(object, key, &self.locale.current(), &self.setter_names.snapshot())
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Construct a `T` from `args`, register it under `key` and render it.
    ///
    /// Returns `None`, leaving the registrations untouched, when no
    /// constructor accepts `args` or construction fails.
    pub fn new_component<T: Describe>(&self, key: &str, args: &[Object]) -> Option<Rc<T>> {
        let object = instantiate(type_info_of::<T>(), args)?;
        let component = downcast::<T>(&object).ok()?;
        self.adopt(object, key);
        Some(component)
    }

    /// Type-erased [`new_component`](Self::new_component).
    pub fn new_component_of(&self, info: &'static TypeInfo, key: &str, args: &[Object]) -> Option<Object> {
        let object = instantiate(info, args)?;
        self.adopt(Rc::clone(&object), key);
        Some(object)
    }

    /// Register an existing object under `key` and render it.
    ///
    /// Returns `false` without registering when `key` resolves to no text.
    /// An object already registered keeps its position and takes the new key.
    pub fn pack_component(&self, component: Object, key: &str) -> bool {
        if self.locale.current().resolve_text(key).is_none() {
            tracing::debug!(
                target: "fwire.registry",
                key,
                component = component.type_info().name(),
                "pack refused: key has no text"
            );
            return false;
        }
        self.adopt(component, key);
        true
    }

    /// Forget `component`. Returns whether it was registered.
    pub fn release_component<C: ?Sized>(&self, component: &Rc<C>) -> bool {
        let removed = self
            .registrations
            .borrow_mut()
            .shift_remove(&ObjectId::of(component));
        removed.is_some()
    }

    /// Drop every registration and the host.
    pub fn clear(&self) {
        let host = self.host.borrow_mut().take();
        let registrations = std::mem::take(&mut *self.registrations.borrow_mut());
        tracing::debug!(
            target: "fwire.registry",
            host = host.as_ref().map(|window| window.type_info().name()),
            released = registrations.len(),
            "registry cleared"
        );
        drop(registrations);
        drop(host);
    }

    fn adopt(&self, object: Object, key: &str) {
        self.insert(Rc::clone(&object), key);
        self.render_one(&object, key);
    }

    fn insert(&self, object: Object, key: &str) {
        let id = ObjectId::of(&object);
        let mut registrations = self.registrations.borrow_mut();
        if let Some(existing) = registrations.get_mut(&id) {
            existing.key = key.to_owned();
        } else {
            registrations.insert(
                id,
                Registration {
                    object,
                    key: key.to_owned(),
                },
            );
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.borrow().is_empty()
    }

    #[must_use]
    pub fn contains<C: ?Sized>(&self, component: &Rc<C>) -> bool {
        self.registrations
            .borrow()
            .contains_key(&ObjectId::of(component))
    }

    /// Key `component` is registered under.
    #[must_use]
    pub fn key_of<C: ?Sized>(&self, component: &Rc<C>) -> Option<String> {
        self.registrations
            .borrow()
            .get(&ObjectId::of(component))
            .map(|registration| registration.key.clone())
    }

    /// Registered keys in registration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.registrations
            .borrow()
            .values()
            .map(|registration| registration.key.clone())
            .collect()
    }

    /// Registered objects in registration order.
    #[must_use]
    pub fn components(&self) -> Vec<Object> {
        self.registrations
            .borrow()
            .values()
            .map(|registration| Rc::clone(&registration.object))
            .collect()
    }
}

fn render_pair(object: &Object, key: &str, store: &LocaleStore, names: &[String]) -> RenderOutcome {
    let Some(setter) = find_text_setter(&**object, names) else {
        tracing::trace!(
            target: "fwire.registry",
            key,
            component = object.type_info().name(),
            "no text setter"
        );
        return RenderOutcome::NoSetter;
    };
    let Some(resolved) = store.resolve_text(key) else {
        tracing::debug!(target: "fwire.registry", key, language = store.language(), "no text for key");
        return RenderOutcome::Missing;
    };
    match setter.invoke(&**object, &[text(resolved)]) {
        Ok(_) => RenderOutcome::Rendered,
        Err(err) => {
            tracing::warn!(
                target: "fwire.registry",
                key,
                setter = setter.name(),
                component = object.type_info().name(),
                error = %err,
                "text setter failed"
            );
            RenderOutcome::Failed
        }
    }
}

fn wire_text_field<H: Reflect + ?Sized>(host: &H, field: &FieldInfo) -> Result<Object, WiringError> {
    let existing = match read_field(host, field) {
        Ok(value) => value,
        Err(err) => {
            tracing::trace!(
                target: "fwire.registry",
                field = field.name(),
                error = %err,
                "existing value unavailable"
            );
            None
        }
    };
    let value = match existing {
        Some(value) => value,
        None => construct_default(field.declared_type().info())?,
    };
    apply_field(host, field, Rc::clone(&value)).map_err(WiringError::Apply)?;
    Ok(value)
}

fn read_field<H: Reflect + ?Sized>(host: &H, field: &FieldInfo) -> Result<Option<Object>, ReflectError> {
    match find_getter(host, field.name()) {
        Some(getter) => getter.invoke(host, &[]),
        None => field.read(host),
    }
}

fn apply_field<H: Reflect + ?Sized>(host: &H, field: &FieldInfo, value: Object) -> Result<(), ReflectError> {
    match find_setter(host, field.name(), field.declared_type()) {
        Some(setter) => setter.invoke(host, &[value]).map(drop),
        None => field.write(host, value),
    }
}

fn construct_default(info: &'static TypeInfo) -> Result<Object, WiringError> {
    let constructor = resolve_constructor(info, &[]).ok_or(WiringError::NoDefaultConstructor {
        type_name: info.name(),
    })?;
    constructor
        .construct(&[])
        .map_err(|source| WiringError::Construction {
            type_name: info.name(),
            source,
        })
}

fn instantiate(info: &'static TypeInfo, args: &[Object]) -> Option<Object> {
    let Some(constructor) = resolve_constructor(info, args) else {
        tracing::debug!(
            target: "fwire.registry",
            component = info.name(),
            args = args.len(),
            "no constructor accepts the arguments"
        );
        return None;
    };
    match constructor.construct(args) {
        Ok(object) => Some(object),
        Err(err) => {
            tracing::warn!(
                target: "fwire.registry",
                component = info.name(),
                error = %err,
                "component construction failed"
            );
            None
        }
    }
}
