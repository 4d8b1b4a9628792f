#![no_main]

use arbitrary::Arbitrary;
use fwire_i18n::LocaleStore;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    entries: Vec<(Vec<u8>, String)>,
    probes: Vec<Vec<u8>>,
}

const SEGMENTS: [&str; 4] = ["menu", "file", "open", "title"];

fn key_from(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(4)
        .map(|b| SEGMENTS[usize::from(*b) % SEGMENTS.len()])
        .collect::<Vec<_>>()
        .join(".")
}

fn quote(text: &str) -> String {
    let mut out = String::from("\"");
    for c in text.chars().filter(|c| !c.is_control()) {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fuzz_target!(|input: Input| {
    if input.entries.len() > 32 || input.probes.len() > 32 {
        return;
    }

    // Quoted dotted keys land as single top-level names.
    let mut yaml = String::new();
    for (key, value) in &input.entries {
        if key.is_empty() {
            continue;
        }
        yaml.push_str(&quote(&key_from(key)));
        yaml.push_str(": ");
        yaml.push_str(&quote(value));
        yaml.push('\n');
    }

    let Ok(store) = LocaleStore::parse("fuzz", &yaml) else {
        return;
    };

    // Resolution never panics, for any key shape.
    for probe in &input.probes {
        let _ = store.resolve_text(&key_from(probe));
        if let Ok(raw) = std::str::from_utf8(probe) {
            let _ = store.resolve_text(raw);
        }
    }

    let unloaded = LocaleStore::unloaded("fuzz");
    assert!(unloaded.resolve_text("menu").is_none());
});
