//! # Diagnostics
//!
//! One reported problem in a schema document: a severity, a taxonomy code,
//! the symbolic path it concerns, and a message.
//!
//! `Display` renders the line exactly as it is written to the sink:
//!
//! ```text
//! [ERROR] -> 'options' -> '0' -> 'range' is in invalid format
//! [WARNING] -> 'options' -> '0' -> 'colour' not recognized and will be ignored
//! ```

use std::fmt;

use serde::Serialize;

use crate::path::SymbolPath;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal; the schema is usable but something is probably wrong.
    Warning,
    /// The schema is malformed.
    Error,
}

impl Severity {
    /// Line prefix for this severity.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Warning => "[WARNING]",
            Self::Error => "[ERROR]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// What class of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A node, entry, or key holds the wrong concrete kind.
    StructuralType,
    /// A required key is absent.
    MissingField,
    /// A `range` pair is malformed, misordered, or out of bounds.
    RangeFormat,
    /// A `default` lies outside an otherwise well-formed `range`.
    RangeViolation,
    /// A value is not among its allowed set.
    EnumViolation,
    /// An `identifier` value recurs in the tree.
    DuplicateIdentifier,
    /// A key is not part of the recognized shape of its node.
    UnrecognizedKey,
    /// A string or collection is empty.
    EmptyValue,
    /// A `regex` extension suffix does not compile.
    InvalidPattern,
    /// An extension suffix repeats an earlier entry.
    DuplicateSuffix,
    /// Subsection nesting exceeds the configured depth.
    DepthExceeded,
}

/// A single reported problem.
///
/// Serializes to a flat record for machine-readable output; `path` is
/// omitted for document-level findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Taxonomy code.
    pub code: DiagnosticCode,
    /// Location in the document. `None` for document-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<SymbolPath>,
    /// Human-readable description, rendered after the path.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic at `path`.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        path: SymbolPath,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            path: Some(path),
            message: message.into(),
        }
    }

    /// Build an error at `path`.
    pub fn error(code: DiagnosticCode, path: SymbolPath, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, path, message)
    }

    /// Build a warning at `path`.
    pub fn warning(code: DiagnosticCode, path: SymbolPath, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, path, message)
    }

    /// Returns true for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} {} {}", self.severity, path, self.message),
            None => write!(f, "{} {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_line_format() {
        let d = Diagnostic::error(
            DiagnosticCode::RangeFormat,
            SymbolPath::key("options").index(0).join("range"),
            "is in invalid format",
        );
        assert_eq!(
            d.to_string(),
            "[ERROR] -> 'options' -> '0' -> 'range' is in invalid format"
        );
        assert!(d.is_error());
    }

    #[test]
    fn warning_line_format() {
        let d = Diagnostic::warning(
            DiagnosticCode::UnrecognizedKey,
            SymbolPath::key("foo"),
            "not recognized and will be ignored",
        );
        assert_eq!(
            d.to_string(),
            "[WARNING] -> 'foo' not recognized and will be ignored"
        );
        assert!(!d.is_error());
    }

    #[test]
    fn pathless_diagnostic() {
        let d = Diagnostic {
            severity: Severity::Error,
            code: DiagnosticCode::StructuralType,
            path: None,
            message: "document is empty".to_string(),
        };
        assert_eq!(d.to_string(), "[ERROR] document is empty");
    }

    #[test]
    fn serializes_as_flat_record() {
        let d = Diagnostic::error(
            DiagnosticCode::DuplicateIdentifier,
            SymbolPath::key("options").index(1).join("identifier"),
            "is not unique",
        );
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            serde_json::json!({
                "severity": "error",
                "code": "duplicate_identifier",
                "path": ["options", "1", "identifier"],
                "message": "is not unique"
            })
        );
    }

    #[test]
    fn pathless_record_omits_path() {
        let d = Diagnostic {
            severity: Severity::Warning,
            code: DiagnosticCode::EmptyValue,
            path: None,
            message: "is empty".to_string(),
        };
        let value = serde_json::to_value(&d).unwrap();
        assert!(value.get("path").is_none());
        assert_eq!(value["severity"], "warning");
    }

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Error > Severity::Warning);
    }
}
