//! Search-root precedence against real directories.

use std::fs;
use std::path::Path;

use fwire_i18n::{EmbeddedBundle, FailureKind, LocaleStore, SearchRoot};

fn write_resource(dir: &Path, language: &str, body: &str) {
    fs::write(dir.join(format!("{language}.yml")), body).unwrap();
}

#[test]
fn later_root_is_used_when_earlier_root_lacks_language() {
    let p1 = tempfile::tempdir().unwrap();
    let p2 = tempfile::tempdir().unwrap();
    write_resource(p2.path(), "en", "title: From P2\n");

    let store = LocaleStore::load("en", &[SearchRoot::dir(p1.path()), SearchRoot::dir(p2.path())]);

    assert!(store.is_loaded());
    assert_eq!(store.resolve_text("title"), Some("From P2"));
    assert_eq!(store.failures().len(), 1);
    assert_eq!(store.failures()[0].kind, FailureKind::Missing);
}

#[test]
fn earlier_root_wins_when_both_have_language() {
    let p1 = tempfile::tempdir().unwrap();
    let p2 = tempfile::tempdir().unwrap();
    write_resource(p1.path(), "en", "title: From P1\n");
    write_resource(p2.path(), "en", "title: From P2\n");

    let store = LocaleStore::load("en", &[SearchRoot::dir(p1.path()), SearchRoot::dir(p2.path())]);

    assert_eq!(store.resolve_text("title"), Some("From P1"));
    assert!(store.failures().is_empty());
}

#[test]
fn unparseable_resource_falls_through_to_next_root() {
    let p1 = tempfile::tempdir().unwrap();
    let p2 = tempfile::tempdir().unwrap();
    write_resource(p1.path(), "en", "title: [broken\n");
    write_resource(p2.path(), "en", "title: Fine\n");

    let store = LocaleStore::load("en", &[SearchRoot::dir(p1.path()), SearchRoot::dir(p2.path())]);

    assert_eq!(store.resolve_text("title"), Some("Fine"));
    assert!(matches!(store.failures()[0].kind, FailureKind::Malformed(_)));
}

#[test]
fn language_absent_everywhere_leaves_store_unloaded() {
    let p1 = tempfile::tempdir().unwrap();
    let p2 = tempfile::tempdir().unwrap();
    write_resource(p1.path(), "de", "title: Titel\n");

    let store = LocaleStore::load("en", &[SearchRoot::dir(p1.path()), SearchRoot::dir(p2.path())]);

    assert!(!store.is_loaded());
    let err = store.load_error().expect("unloaded store reports its failures");
    assert_eq!(err.attempts.len(), 2);
}

#[test]
fn directories_and_embedded_bundles_mix() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = EmbeddedBundle::new("builtin").with_language("en", "title: Built in\n");

    let store = LocaleStore::load("en", &[SearchRoot::dir(dir.path()), bundle.into()]);

    assert_eq!(store.resolve_text("title"), Some("Built in"));
    assert_eq!(store.source(), Some("embedded:builtin"));
}

#[test]
fn no_roots_means_unloaded() {
    let store = LocaleStore::load("en", &[]);
    assert!(!store.is_loaded());
    assert!(store.load_error().unwrap().attempts.is_empty());
}
