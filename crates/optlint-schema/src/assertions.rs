//! # Primitive Assertions
//!
//! Single-purpose checks that validate and report in one call. Each returns
//! whether it passed (or the checked value), so dependent checks on the same
//! node can be skipped with `&&` or `if let`.
//!
//! All assertions go through a [`Reporter`], which owns the sink for the
//! duration of one validation call.

use std::fmt;

use optlint_core::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity, SymbolPath, ValueKind};
use serde_json::{Map, Value};

/// Emits diagnostics into a sink and hosts the primitive assertions.
pub struct Reporter<'s> {
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> Reporter<'s> {
    /// Report into `sink`.
    pub fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    /// Pass a prepared diagnostic to the sink.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.sink.emit(diagnostic);
    }

    /// Emit one diagnostic at `path`.
    pub fn report(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        path: SymbolPath,
        message: impl Into<String>,
    ) {
        self.emit(Diagnostic::new(severity, code, path, message));
    }

    /// Emit an error at `path`.
    pub fn error(&mut self, code: DiagnosticCode, path: SymbolPath, message: impl Into<String>) {
        self.report(Severity::Error, code, path, message);
    }

    /// Emit a warning at `path`.
    pub fn warning(&mut self, code: DiagnosticCode, path: SymbolPath, message: impl Into<String>) {
        self.report(Severity::Warning, code, path, message);
    }

    /// Warn that `key` under `path` is not part of the recognized shape.
    pub fn report_ignored(&mut self, path: &SymbolPath, key: &str) {
        self.warning(
            DiagnosticCode::UnrecognizedKey,
            path.join(key),
            "not recognized and will be ignored",
        );
    }

    /// True iff `value` is exactly of kind `expected`.
    ///
    /// Compatible kinds are rejected: a boolean is not an integer and an
    /// integer literal is not a float.
    pub fn is_exact_type(&mut self, value: &Value, expected: ValueKind, path: &SymbolPath) -> bool {
        let actual = ValueKind::of(value);
        if actual != expected {
            self.error(
                DiagnosticCode::StructuralType,
                path.clone(),
                format!("is supposed to be {expected}, but is {actual}"),
            );
            return false;
        }
        true
    }

    /// True iff `value` is a non-empty string, array, or object.
    ///
    /// Values of other kinds are never considered empty.
    pub fn is_non_empty(&mut self, value: &Value, path: &SymbolPath, severity: Severity) -> bool {
        let empty = match value {
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        };
        if empty {
            self.report(severity, DiagnosticCode::EmptyValue, path.clone(), "is empty");
            return false;
        }
        true
    }

    /// Look up a required `key` in `container`, optionally checking its kind.
    ///
    /// Emits "not found" when absent and a type error when `expected` is
    /// given and does not match. Returns the value only when every check
    /// passed.
    pub fn require_key<'v>(
        &mut self,
        container: &'v Map<String, Value>,
        key: &str,
        path: &SymbolPath,
        expected: Option<ValueKind>,
    ) -> Option<&'v Value> {
        let key_path = path.join(key);
        let Some(value) = container.get(key) else {
            self.error(DiagnosticCode::MissingField, key_path, "not found");
            return None;
        };
        match expected {
            Some(kind) if !self.is_exact_type(value, kind, &key_path) => None,
            _ => Some(value),
        }
    }

    /// Like [`Reporter::require_key`], but absence is silent.
    pub fn optional_key<'v>(
        &mut self,
        container: &'v Map<String, Value>,
        key: &str,
        path: &SymbolPath,
        expected: ValueKind,
    ) -> Option<&'v Value> {
        let value = container.get(key)?;
        self.is_exact_type(value, expected, &path.join(key))
            .then_some(value)
    }

    /// True iff `value` equals one member of `allowed`.
    pub fn matches_one_of<T>(&mut self, value: &T, allowed: &[T], path: &SymbolPath) -> bool
    where
        T: PartialEq + fmt::Display,
    {
        if allowed.contains(value) {
            return true;
        }
        let options = allowed
            .iter()
            .map(|a| format!("'{a}'"))
            .collect::<Vec<_>>()
            .join(", ");
        self.error(
            DiagnosticCode::EnumViolation,
            path.clone(),
            format!("does not have supported option. Found '{value}'; expected one of [{options}]"),
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optlint_core::CollectingSink;
    use serde_json::json;

    fn path() -> SymbolPath {
        SymbolPath::key("options").index(0)
    }

    #[test]
    fn exact_type_rejects_boolean_for_integer() {
        let mut sink = CollectingSink::new();
        let ok = Reporter::new(&mut sink).is_exact_type(&json!(true), ValueKind::Integer, &path());
        assert!(!ok);
        assert_eq!(
            sink.lines(),
            vec!["[ERROR] -> 'options' -> '0' is supposed to be integer, but is boolean"]
        );
    }

    #[test]
    fn exact_type_rejects_integer_for_float() {
        let mut sink = CollectingSink::new();
        let ok = Reporter::new(&mut sink).is_exact_type(&json!(1), ValueKind::Float, &path());
        assert!(!ok);
        assert_eq!(sink.with_code(DiagnosticCode::StructuralType).len(), 1);
    }

    #[test]
    fn exact_type_accepts_match() {
        let mut sink = CollectingSink::new();
        let mut r = Reporter::new(&mut sink);
        assert!(r.is_exact_type(&json!(1.5), ValueKind::Float, &path()));
        assert!(r.is_exact_type(&json!({}), ValueKind::Object, &path()));
        assert!(sink.is_empty());
    }

    #[test]
    fn non_empty_uses_caller_severity() {
        let mut sink = CollectingSink::new();
        let mut r = Reporter::new(&mut sink);
        assert!(!r.is_non_empty(&json!([]), &path(), Severity::Warning));
        assert!(!r.is_non_empty(&json!(""), &path(), Severity::Error));
        assert!(r.is_non_empty(&json!("x"), &path(), Severity::Error));
        assert!(r.is_non_empty(&json!(0), &path(), Severity::Error));

        let severities: Vec<Severity> = sink.diagnostics().iter().map(|d| d.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn require_key_missing_and_mistyped() {
        let node = json!({"identifier": 7});
        let map = node.as_object().unwrap();
        let mut sink = CollectingSink::new();
        let mut r = Reporter::new(&mut sink);

        assert!(r.require_key(map, "kind", &path(), None).is_none());
        assert!(r
            .require_key(map, "identifier", &path(), Some(ValueKind::String))
            .is_none());
        assert_eq!(r.require_key(map, "identifier", &path(), None), Some(&json!(7)));

        assert_eq!(
            sink.lines(),
            vec![
                "[ERROR] -> 'options' -> '0' -> 'kind' not found",
                "[ERROR] -> 'options' -> '0' -> 'identifier' is supposed to be string, but is integer",
            ]
        );
    }

    #[test]
    fn optional_key_is_silent_when_absent() {
        let node = json!({"label": 3});
        let map = node.as_object().unwrap();
        let mut sink = CollectingSink::new();
        let mut r = Reporter::new(&mut sink);
        assert!(r.optional_key(map, "help", &path(), ValueKind::String).is_none());
        assert!(r.optional_key(map, "label", &path(), ValueKind::String).is_none());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].code, DiagnosticCode::StructuralType);
    }

    #[test]
    fn matches_one_of_lists_allowed_set() {
        let mut sink = CollectingSink::new();
        let mut r = Reporter::new(&mut sink);
        assert!(r.matches_one_of(&"plain", &["plain", "regex"], &path()));
        assert!(!r.matches_one_of(&"glob", &["plain", "regex"], &path()));
        assert_eq!(
            sink.lines(),
            vec![
                "[ERROR] -> 'options' -> '0' does not have supported option. \
                 Found 'glob'; expected one of ['plain', 'regex']"
            ]
        );
    }

    #[test]
    fn report_ignored_message() {
        let mut sink = CollectingSink::new();
        Reporter::new(&mut sink).report_ignored(&SymbolPath::root(), "foo");
        assert_eq!(
            sink.lines(),
            vec!["[WARNING] -> 'foo' not recognized and will be ignored"]
        );
    }
}
