#![forbid(unsafe_code)]

//! Auto-wiring and rendering against the headless toolkit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fwire_core::{
    ComponentRegistry, Describe, FieldStatus, MarkerKind, Object, ParamType, ReflectError, SetterNames,
    TypeBuilder, Window, WiringError, text,
};
use fwire_harness::{BrokenLabel, Button, Frame, Icon, Label, frame_window, locale, with_captured_tracing};
use fwire_i18n::ActiveLocale;

const EN: &str = "
main:
  title: Main window
  ok: OK
  status: Ready
base:
  footer: Footer
";

/// Only constructible from text.
#[allow(dead_code)]
struct Tag(String);

impl Describe for Tag {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("Tag")
            .constructor(vec![ParamType::of::<String>()], |args| {
                Ok(Tag(fwire_core::text_of(&args[0])?.to_owned()))
            })
    }
}

#[derive(Default)]
struct BaseWindow {
    frame: Frame,
    footer: RefCell<Option<Rc<Label>>>,
}

frame_window!(BaseWindow => frame);

impl Describe for BaseWindow {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("BaseWindow")
            .extends::<Frame>()
            .default_constructor()
            .bind_text(
                "footer",
                "base.footer",
                |w| w.footer.borrow().clone(),
                |w, v| *w.footer.borrow_mut() = Some(v),
            )
    }
}

#[derive(Default)]
struct MainWindow {
    base: BaseWindow,
    title: RefCell<Option<Rc<Label>>>,
    ok: RefCell<Option<Rc<Button>>>,
    icon: RefCell<Option<Rc<Icon>>>,
    status: RefCell<Option<Rc<Label>>>,
    tag: RefCell<Option<Rc<Tag>>>,
    preset: Rc<Label>,
    registry: RefCell<Option<Rc<ComponentRegistry>>>,
}

impl AsRef<BaseWindow> for MainWindow {
    fn as_ref(&self) -> &BaseWindow {
        &self.base
    }
}

impl Window for MainWindow {
    fn show(&self) {
        self.base.show();
    }

    fn on_close(&self, callback: Box<dyn FnOnce()>) {
        self.base.on_close(callback);
    }
}

impl Describe for MainWindow {
    fn describe(ty: TypeBuilder<Self>) -> TypeBuilder<Self> {
        ty.named("MainWindow")
            .extends::<BaseWindow>()
            .default_constructor()
            .bind_text(
                "title",
                "main.title",
                |w| w.title.borrow().clone(),
                |w, v| *w.title.borrow_mut() = Some(v),
            )
            .bind_text(
                "ok",
                "main.ok",
                |w| w.ok.borrow().clone(),
                |w, v| *w.ok.borrow_mut() = Some(v),
            )
            .bind_text(
                "icon",
                "main.icon",
                |w| w.icon.borrow().clone(),
                |w, v| *w.icon.borrow_mut() = Some(v),
            )
            .bind_text("status", "main.status", |_| None, |_, _: Rc<Label>| {})
            .bind_text(
                "tag",
                "main.tag",
                |w| w.tag.borrow().clone(),
                |w, v| *w.tag.borrow_mut() = Some(v),
            )
            .inject_registry("registry", |w, r| *w.registry.borrow_mut() = Some(r))
            .getter::<Label, _>("getStatus", |w| Some(Rc::clone(&w.preset)))
            .method("setStatus", vec![ParamType::of::<Label>()], |_, _| {
                Err(ReflectError::failed("status bar is read-only"))
            })
    }
}

fn wired(locale: ActiveLocale, names: &[&str]) -> (Rc<MainWindow>, Rc<ComponentRegistry>) {
    let host = Rc::new(MainWindow::default());
    let registry = ComponentRegistry::new(
        Rc::clone(&host) as Rc<dyn Window>,
        SetterNames::new(names.iter().copied()),
        locale,
    );
    registry.auto_wire();
    (host, registry)
}

#[test]
fn every_bind_text_field_is_registered_once() {
    let host = Rc::new(MainWindow::default());
    let registry = ComponentRegistry::new(
        Rc::clone(&host) as Rc<dyn Window>,
        SetterNames::new(["setText"]),
        locale("en", EN),
    );
    let report = registry.auto_wire();

    assert_eq!(
        report.registered_keys(),
        vec!["main.title", "main.ok", "main.icon", "base.footer"]
    );
    assert_eq!(registry.keys(), vec!["main.title", "main.ok", "main.icon", "base.footer"]);
    let title = host.title.borrow().clone().unwrap();
    assert_eq!(title.text(), "Main window");
    assert_eq!(host.ok.borrow().as_ref().unwrap().text(), "OK");
    assert_eq!(host.base.footer.borrow().as_ref().unwrap().text(), "Footer");
    assert!(Rc::ptr_eq(host.registry.borrow().as_ref().unwrap(), &registry));
    registry.clear();
}

#[test]
fn failures_are_reported_per_field() {
    let host = Rc::new(MainWindow::default());
    let registry = ComponentRegistry::new(
        Rc::clone(&host) as Rc<dyn Window>,
        SetterNames::new(["setText"]),
        locale("en", EN),
    );
    let report = registry.auto_wire();
    registry.clear();

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 2);

    // getter supplied a value but the conventional setter rejected it
    assert_eq!(failures[0].field, "status");
    assert!(matches!(failures[0].status, FieldStatus::Failed(WiringError::Apply(_))));
    assert!(host.preset.history().is_empty());

    assert_eq!(failures[1].field, "tag");
    assert_eq!(
        failures[1].status,
        FieldStatus::Failed(WiringError::NoDefaultConstructor { type_name: "Tag" })
    );
    assert!(host.tag.borrow().is_none());

    let injected = report
        .outcomes
        .iter()
        .find(|outcome| outcome.marker == MarkerKind::InjectRegistry)
        .unwrap();
    assert_eq!(injected.status, FieldStatus::Injected);
}

#[test]
fn objects_without_text_setter_are_skipped() {
    let (host, registry) = wired(locale("en", EN), &["setText"]);
    let report = registry.render();
    assert_eq!(report.without_setter, 1);
    assert!(host.icon.borrow().is_some());
    registry.clear();
}

#[test]
fn render_is_idempotent() {
    let (host, registry) = wired(locale("en", EN), &["setText"]);
    let first = registry.render();
    let second = registry.render();
    assert_eq!(first, second);
    let title = host.title.borrow().clone().unwrap();
    assert_eq!(title.history(), vec!["Main window"; 3]);
    registry.clear();
}

#[test]
fn missing_key_leaves_widget_untouched() {
    let (host, registry) = wired(locale("en", "main:\n  ok: OK\n"), &["setText"]);
    let title = host.title.borrow().clone().unwrap();
    assert!(title.history().is_empty());
    assert_eq!(host.ok.borrow().as_ref().unwrap().text(), "OK");
    registry.clear();
}

#[test]
fn first_configured_setter_name_wins() {
    let (host, registry) = wired(locale("en", EN), &["setToolTipText", "setText"]);
    let ok = host.ok.borrow().clone().unwrap();
    assert_eq!(ok.tooltip().as_deref(), Some("OK"));
    assert_eq!(ok.text(), "");
    // labels have no tooltip setter and fall through to the next name
    assert_eq!(host.title.borrow().as_ref().unwrap().text(), "Main window");
    registry.clear();
}

#[test]
fn failing_setter_logs_and_continues() {
    let (_host, registry) = wired(locale("en", EN), &["setText"]);
    let broken = Rc::new(BrokenLabel);
    let after = Rc::new(Label::default());
    let handle = with_captured_tracing(|| {
        registry.pack_component(Rc::clone(&broken) as Object, "main.ok");
        registry.pack_component(Rc::clone(&after) as Object, "main.status");
        let report = registry.render();
        assert_eq!(report.failed, 1);
    });
    assert_eq!(after.history(), vec!["Ready", "Ready"]);

    let warnings: Vec<_> = handle
        .events_for("fwire.registry")
        .into_iter()
        .filter(|event| event.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].message(), Some("text setter failed"));
    assert_eq!(warnings[0].field("setter"), Some("setText"));
    assert!(handle.saw_span("registry.render"));
    registry.clear();
}

#[test]
fn new_component_with_unmatched_arguments_registers_nothing() {
    let (_host, registry) = wired(locale("en", EN), &["setText"]);
    let before = registry.len();
    assert!(registry.new_component::<Label>("main.ok", &[text("a"), text("b")]).is_none());
    let wrong: Object = Rc::new(Icon);
    assert!(registry.new_component::<Label>("main.ok", &[wrong]).is_none());
    assert_eq!(registry.len(), before);

    let label = registry.new_component::<Label>("main.ok", &[text("initial")]).unwrap();
    assert_eq!(label.history(), vec!["OK"]);
    assert_eq!(registry.len(), before + 1);
    registry.clear();
}

#[test]
fn release_of_unregistered_object_is_a_no_op() {
    let (_host, registry) = wired(locale("en", EN), &["setText"]);
    let before = registry.len();
    assert!(!registry.release_component(&Rc::new(Label::default())));
    assert_eq!(registry.len(), before);
    registry.clear();
}

#[test]
fn clear_breaks_the_host_registry_cycle() {
    let (host, registry) = wired(locale("en", EN), &["setText"]);
    let weak_host: Weak<MainWindow> = Rc::downgrade(&host);
    let weak_registry = Rc::downgrade(&registry);
    registry.clear();
    drop(host);
    drop(registry);
    assert!(weak_host.upgrade().is_none());
    assert!(weak_registry.upgrade().is_none());
}

#[test]
fn uncleared_registry_keeps_host_alive() {
    let (host, registry) = wired(locale("en", EN), &["setText"]);
    let weak_host = Rc::downgrade(&host);
    drop(host);
    assert!(weak_host.upgrade().is_some());
    registry.clear();
    drop(registry);
    assert!(weak_host.upgrade().is_none());
}
