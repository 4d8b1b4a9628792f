#![no_main]

use fwire_i18n::LocaleStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(yaml) = std::str::from_utf8(data) else {
        return;
    };
    if yaml.len() > 8192 {
        return;
    }

    let Ok(store) = LocaleStore::parse("fuzz", yaml) else {
        return;
    };
    assert!(store.is_loaded());

    // Undotted leaf keys always resolve; a dotted name may shadow a path.
    for key in store.leaf_keys().into_iter().filter(|key| !key.contains('.')) {
        assert!(store.resolve_text(&key).is_some(), "leaf `{key}` does not resolve");
    }
});
