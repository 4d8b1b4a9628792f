#![forbid(unsafe_code)]

//! The framework context.
//!
//! A [`FrameworkContext`] owns everything shared between windows: the
//! active locale, the ordered locale search roots, the ordered text-setter
//! names, and the table of open windows keyed by id. Each open window has
//! one [`ComponentRegistry`].
//!
//! # Lifecycle
//!
//! 1. [`new_frame`](FrameworkContext::new_frame) constructs a launchable
//!    host, installs its registry, auto-wires it, runs the matching
//!    initializer, shows the window and arranges for the registry to be
//!    destroyed when the window closes.
//! 2. [`change_locale`](FrameworkContext::change_locale) swaps the active
//!    store and re-renders every open window.
//! 3. [`destroy_frame`](FrameworkContext::destroy_frame) clears a window's
//!    registry and removes it from the table.
//!
//! All operations run on the UI thread; the context is neither `Send` nor
//! `Sync`.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use fwire_core::introspect::{find_initializer, initializers, resolve_constructor};
use fwire_core::{
    ComponentRegistry, Describe, Object, ReflectError, RenderReport, SetterNames, TypeInfo, Window,
    downcast, type_info_of,
};
use fwire_i18n::{ActiveLocale, LocaleStore, ResourceLoadError, SearchRoot};
use indexmap::IndexMap;

use crate::config::FrameworkConfig;

/// Why a window could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The host type lacks the "is launchable" marker.
    #[error("`{type_name}` is not launchable")]
    NotLaunchable { type_name: &'static str },
    /// The host type has no no-argument constructor.
    #[error("`{type_name}` has no no-argument constructor")]
    NoDefaultConstructor { type_name: &'static str },
    /// The no-argument constructor failed.
    #[error("constructing `{type_name}` failed: {source}")]
    Construction {
        type_name: &'static str,
        source: ReflectError,
    },
    /// No initializer accepts the supplied arguments.
    #[error("`{type_name}` has no initializer taking {arity} matching argument(s)")]
    NoMatchingInitializer { type_name: &'static str, arity: usize },
    /// The chosen initializer failed.
    #[error("initializer `{type_name}::{method}` failed: {source}")]
    Initializer {
        type_name: &'static str,
        method: &'static str,
        source: ReflectError,
    },
}

/// Shared state for every window of an application.
pub struct FrameworkContext {
    default_language: RefCell<String>,
    search_roots: RefCell<Vec<SearchRoot>>,
    setter_names: SetterNames,
    locale: ActiveLocale,
    frames: RefCell<IndexMap<String, Rc<ComponentRegistry>>>,
}

impl fmt::Debug for FrameworkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameworkContext")
            .field("default_language", &self.default_language.borrow())
            .field("search_roots", &self.search_roots.borrow().len())
            .field("setter_names", &self.setter_names.snapshot())
            .field("locale", &self.locale)
            .field("frames", &self.window_ids())
            .finish()
    }
}

impl FrameworkContext {
    /// Create a context from `config`. No locale is loaded yet; see
    /// [`load_default`](Self::load_default).
    #[must_use]
    pub fn new(config: FrameworkConfig) -> Rc<Self> {
        let FrameworkConfig {
            default_language,
            search_paths,
            text_setters,
        } = config;
        Rc::new(Self {
            locale: ActiveLocale::new(LocaleStore::unloaded(&default_language)),
            default_language: RefCell::new(default_language),
            search_roots: RefCell::new(search_paths.into_iter().map(SearchRoot::Directory).collect()),
            setter_names: SetterNames::new(text_setters),
            frames: RefCell::new(IndexMap::new()),
        })
    }

    /// Context with [`FrameworkConfig::default`].
    #[must_use]
    pub fn with_defaults() -> Rc<Self> {
        Self::new(FrameworkConfig::default())
    }

    /// Snapshot of the current settings; embedded roots are not included.
    #[must_use]
    pub fn config(&self) -> FrameworkConfig {
        FrameworkConfig {
            default_language: self.default_language(),
            search_paths: self
                .search_roots
                .borrow()
                .iter()
                .filter_map(|root| match root {
                    SearchRoot::Directory(path) => Some(path.clone()),
                    SearchRoot::Embedded(_) => None,
                })
                .collect(),
            text_setters: self.setter_names.snapshot(),
        }
    }

    // ── Settings ────────────────────────────────────────────────────────

    /// Append a text-setter method name. Earlier names take priority.
    pub fn register_text_setter_name(&self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(target: "fwire.context", name = %name, "text setter name registered");
        self.setter_names.push(name);
    }

    /// Append a locale directory. Earlier roots take priority.
    pub fn register_search_path(&self, path: impl Into<PathBuf>) {
        self.register_search_root(SearchRoot::Directory(path.into()));
    }

    /// Append a locale search root (directory or embedded bundle).
    pub fn register_search_root(&self, root: impl Into<SearchRoot>) {
        let root = root.into();
        tracing::debug!(target: "fwire.context", root = %root.label(), "search root registered");
        self.search_roots.borrow_mut().push(root);
    }

    pub fn set_default_language(&self, language: impl Into<String>) {
        *self.default_language.borrow_mut() = language.into();
    }

    #[must_use]
    pub fn default_language(&self) -> String {
        self.default_language.borrow().clone()
    }

    // ── Locale ──────────────────────────────────────────────────────────

    /// Snapshot of the active store.
    #[must_use]
    pub fn locale(&self) -> Arc<LocaleStore> {
        self.locale.current()
    }

    /// Handle to the active-locale slot shared with every registry.
    #[must_use]
    pub fn active_locale(&self) -> &ActiveLocale {
        &self.locale
    }

    /// Resolve `key` against the active store.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.locale.resolve_text(key)
    }

    /// Install the default language, even if no resource for it is found.
    ///
    /// The error reports a language that could not be loaded; the unloaded
    /// store is active regardless.
    pub fn load_default(&self) -> Result<(), ResourceLoadError> {
        let language = self.default_language();
        let store = self.load(&language);
        let missing = store.load_error();
        self.install(store);
        match missing {
            Some(err) => {
                tracing::warn!(target: "fwire.context", language = %language, error = %err, "default locale not found");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Switch to `language` if a resource for it loads.
    ///
    /// On failure nothing changes: the previous store stays active and no
    /// window is re-rendered.
    pub fn change_locale(&self, language: &str) -> Result<(), ResourceLoadError> {
        let store = self.load(language);
        if let Some(err) = store.load_error() {
            tracing::warn!(target: "fwire.context", language, error = %err, "locale change rejected");
            return Err(err);
        }
        self.install(store);
        Ok(())
    }

    /// Switch to `language`; with `force`, switch even if nothing loads.
    ///
    /// Returns whether the active store was replaced.
    pub fn change_locale_with(&self, language: &str, force: bool) -> bool {
        if !force {
            return self.change_locale(language).is_ok();
        }
        let store = self.load(language);
        if !store.is_loaded() {
            tracing::warn!(target: "fwire.context", language, "forcing an unloaded locale");
        }
        self.install(store);
        true
    }

    fn load(&self, language: &str) -> LocaleStore {
        LocaleStore::load(language, &self.search_roots.borrow())
    }

    fn install(&self, store: LocaleStore) {
        let _span = tracing::debug_span!(
            target: "fwire.context",
            "context.install_locale",
            language = store.language(),
            loaded = store.is_loaded()
        )
        .entered();
        self.locale.replace(store);
        self.refresh_all();
    }

    /// Re-render every open window, then ask each to refresh.
    pub fn refresh_all(&self) -> RenderReport {
        let registries: Vec<(String, Rc<ComponentRegistry>)> = self
            .frames
            .borrow()
            .iter()
            .map(|(id, registry)| (id.clone(), Rc::clone(registry)))
            .collect();

        let mut total = RenderReport::default();
        for (id, registry) in registries {
            let report = registry.render();
            tracing::debug!(
                target: "fwire.context",
                id = %id,
                rendered = report.rendered,
                missing = report.missing,
                failed = report.failed,
                "window re-rendered"
            );
            total.rendered += report.rendered;
            total.missing += report.missing;
            total.without_setter += report.without_setter;
            total.failed += report.failed;
            if let Some(host) = registry.host() {
                host.refresh();
            }
        }
        total
    }

    // ── Windows ─────────────────────────────────────────────────────────

    /// Open a window of type `H` under `id`.
    ///
    /// `args` select the host's "run after wiring" initializer by count and
    /// type; the first match runs. An id that is already open is replaced:
    /// the earlier window's registry is cleared first.
    pub fn new_frame<H>(self: &Rc<Self>, id: &str, args: &[Object]) -> Result<Rc<H>, ContextError>
    where
        H: Window + Describe,
    {
        let info = type_info_of::<H>();
        let _span = tracing::debug_span!(
            target: "fwire.context",
            "context.new_frame",
            id,
            host = info.name(),
            args = args.len()
        )
        .entered();

        let host = construct_host::<H>(info)?;
        let registry = ComponentRegistry::new(
            Rc::clone(&host) as Rc<dyn Window>,
            self.setter_names.clone(),
            self.locale.clone(),
        );
        self.install_frame(id, Rc::clone(&registry));

        let report = registry.auto_wire();
        if !report.is_complete() {
            tracing::warn!(
                target: "fwire.context",
                id,
                failed = report.failures().count(),
                "window wired partially"
            );
        }

        if let Err(err) = run_initializer(info, &*host, args) {
            tracing::error!(target: "fwire.context", id, error = %err, "window initialization failed");
            self.close_frame(id, &Rc::downgrade(&registry));
            return Err(err);
        }

        host.show();
        let context = Rc::downgrade(self);
        let own = Rc::downgrade(&registry);
        let window_id = id.to_owned();
        host.on_close(Box::new(move || {
            if let Some(context) = context.upgrade() {
                context.close_frame(&window_id, &own);
            }
        }));

        tracing::info!(
            target: "fwire.context",
            id,
            host = info.name(),
            registered = registry.len(),
            "window opened"
        );
        Ok(host)
    }

    fn install_frame(&self, id: &str, registry: Rc<ComponentRegistry>) {
        let previous = self.frames.borrow_mut().insert(id.to_owned(), registry);
        if let Some(previous) = previous {
            tracing::warn!(target: "fwire.context", id, "window id reused; disposing the earlier window");
            previous.clear();
        }
    }

    /// Clear and remove the window `id`. Returns whether it was open.
    pub fn destroy_frame(&self, id: &str) -> bool {
        let removed = self.frames.borrow_mut().shift_remove(id);
        match removed {
            Some(registry) => {
                registry.clear();
                tracing::debug!(target: "fwire.context", id, "window destroyed");
                true
            }
            None => {
                tracing::debug!(target: "fwire.context", id, "destroy of unknown window id");
                false
            }
        }
    }

    /// Destroy `id` only while it still maps to `registry`.
    fn close_frame(&self, id: &str, registry: &Weak<ComponentRegistry>) -> bool {
        let current = self
            .frames
            .borrow()
            .get(id)
            .is_some_and(|entry| Weak::ptr_eq(&Rc::downgrade(entry), registry));
        if current {
            self.destroy_frame(id)
        } else {
            if let Some(stale) = registry.upgrade() {
                stale.clear();
            }
            tracing::debug!(target: "fwire.context", id, "close of a replaced window");
            false
        }
    }

    /// Registry of the open window `id`.
    #[must_use]
    pub fn registry(&self, id: &str) -> Option<Rc<ComponentRegistry>> {
        self.frames.borrow().get(id).cloned()
    }

    /// Ids of the open windows, oldest first.
    #[must_use]
    pub fn window_ids(&self) -> Vec<String> {
        self.frames.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Destroy every open window.
    pub fn destroy_all(&self) {
        for id in self.window_ids() {
            self.destroy_frame(&id);
        }
    }
}

fn construct_host<H: Window + Describe>(info: &'static TypeInfo) -> Result<Rc<H>, ContextError> {
    let type_name = info.name();
    if !info.is_launchable() {
        tracing::error!(target: "fwire.context", host = type_name, "host type is not launchable");
        return Err(ContextError::NotLaunchable { type_name });
    }
    let constructor =
        resolve_constructor(info, &[]).ok_or(ContextError::NoDefaultConstructor { type_name })?;
    let object = constructor
        .construct(&[])
        .map_err(|source| ContextError::Construction { type_name, source })?;
    downcast::<H>(&object).map_err(|source| ContextError::Construction { type_name, source })
}

fn run_initializer<H: Window + Describe>(
    info: &'static TypeInfo,
    host: &H,
    args: &[Object],
) -> Result<(), ContextError> {
    let type_name = info.name();
    let Some(initializer) = find_initializer(info, args) else {
        if args.is_empty() && initializers(info).next().is_none() {
            return Ok(());
        }
        return Err(ContextError::NoMatchingInitializer {
            type_name,
            arity: args.len(),
        });
    };
    tracing::debug!(target: "fwire.context", host = type_name, method = initializer.name(), "running initializer");
    initializer
        .invoke(host, args)
        .map(drop)
        .map_err(|source| ContextError::Initializer {
            type_name,
            method: initializer.name(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_unloaded_default_language() {
        let context = FrameworkContext::new(FrameworkConfig {
            default_language: "en".into(),
            ..FrameworkConfig::default()
        });
        assert_eq!(context.locale().language(), "en");
        assert!(!context.locale().is_loaded());
        assert_eq!(context.frame_count(), 0);
    }

    #[test]
    fn config_snapshot_reflects_registrations() {
        let context = FrameworkContext::with_defaults();
        context.register_search_path("extra");
        context.register_search_root(fwire_i18n::EmbeddedBundle::new("builtin"));
        context.register_text_setter_name("setTitle");
        context.set_default_language("fr");
        let config = context.config();
        assert_eq!(config.default_language, "fr");
        assert_eq!(config.search_paths, vec![PathBuf::from("languages"), PathBuf::from("extra")]);
        assert_eq!(config.text_setters, vec!["setText", "setTitle"]);
    }

    #[test]
    fn destroy_unknown_id_is_false() {
        let context = FrameworkContext::with_defaults();
        assert!(!context.destroy_frame("nope"));
    }

    #[test]
    fn context_error_messages() {
        let err = ContextError::NoMatchingInitializer {
            type_name: "Main",
            arity: 2,
        };
        assert_eq!(
            err.to_string(),
            "`Main` has no initializer taking 2 matching argument(s)"
        );
        let err = ContextError::Initializer {
            type_name: "Main",
            method: "setup",
            source: ReflectError::failed("boom"),
        };
        assert!(err.to_string().ends_with("boom"));
    }
}
