//! # Extension List Validation
//!
//! Checks the flat list of file-suffix rules a format schema declares.
//! Each entry is either a literal suffix (`plain`, the default) or a
//! regular expression (`regex`).
//!
//! Beyond shape, two properties the host's extension matcher relies on are
//! checked: `regex` suffixes must compile, and a suffix registered twice
//! with the same kind is flagged (the matcher would silently drop it).
//!
//! The host matches with a Perl-style engine, so suffixes are compiled with
//! `fancy_regex`: lookaround and backreferences are accepted.

use std::collections::HashMap;

use optlint_core::{DiagnosticCode, DiagnosticSink, Severity, SymbolPath, ValueKind};
use fancy_regex::Regex;
use serde_json::Value;

use crate::assertions::Reporter;

/// Allowed values of an entry's `kind`.
pub const EXTENSION_KINDS: &[&str] = &["plain", "regex"];

const ENTRY_KEYS: &[&str] = &["suffix", "kind"];

/// Validate an extension list rooted at `path`.
pub fn validate_extensions(extensions: &[Value], path: &SymbolPath, sink: &mut dyn DiagnosticSink) {
    check_extensions(extensions, path, &mut Reporter::new(sink));
}

pub(crate) fn check_extensions(extensions: &[Value], path: &SymbolPath, r: &mut Reporter<'_>) {
    if extensions.is_empty() {
        r.report(Severity::Warning, DiagnosticCode::EmptyValue, path.clone(), "is empty");
        return;
    }

    let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
    for (i, entry) in extensions.iter().enumerate() {
        let entry_path = path.index(i);
        if !r.is_exact_type(entry, ValueKind::Object, &entry_path) {
            continue;
        }
        let Some(entry) = entry.as_object() else {
            continue;
        };

        let suffix = r
            .require_key(entry, "suffix", &entry_path, Some(ValueKind::String))
            .filter(|s| r.is_non_empty(s, &entry_path.join("suffix"), Severity::Error))
            .and_then(Value::as_str);

        let kind = match r.optional_key(entry, "kind", &entry_path, ValueKind::String) {
            Some(kind) => kind
                .as_str()
                .filter(|k| r.matches_one_of(k, EXTENSION_KINDS, &entry_path.join("kind"))),
            // Absent means plain; a mistyped kind was already reported.
            None if entry.contains_key("kind") => None,
            None => Some("plain"),
        };

        if let (Some(suffix), Some(kind)) = (suffix, kind) {
            if kind == "regex" {
                if let Err(e) = Regex::new(suffix) {
                    r.error(
                        DiagnosticCode::InvalidPattern,
                        entry_path.join("suffix"),
                        format!("is not a valid regular expression: {e}"),
                    );
                }
            }
            if let Some(first) = seen.insert((kind, suffix), i) {
                r.warning(
                    DiagnosticCode::DuplicateSuffix,
                    entry_path.join("suffix"),
                    format!("repeats the {kind} suffix '{suffix}' of entry {first}"),
                );
            }
        }

        for key in entry.keys().filter(|k| !ENTRY_KEYS.contains(&k.as_str())) {
            r.report_ignored(&entry_path, key);
        }
    }
}
