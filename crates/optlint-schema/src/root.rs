//! # Root Schema Validation
//!
//! Entry points for the two document shapes:
//!
//! - **Format schemas** describe a file format plugin: `loadingOptions` and
//!   `savingOptions` option lists, an `extensions` list, and the
//!   `outputExtension` written files receive.
//! - **Algorithm schemas** describe a processing algorithm: one `options`
//!   list.
//!
//! The two option lists of a format schema are validated independently;
//! an identifier may appear once in each.

use std::fmt;
use std::str::FromStr;

use optlint_core::{
    Diagnostic, DiagnosticCode, DiagnosticSink, LintConfig, LintError, Severity, SymbolPath,
    ValueKind,
};
use serde_json::{Map, Value};

use crate::assertions::Reporter;
use crate::extensions::check_extensions;
use crate::tree::OptionTreeValidator;

const LOADING_OPTIONS: &str = "loadingOptions";
const SAVING_OPTIONS: &str = "savingOptions";
const EXTENSIONS: &str = "extensions";
const OUTPUT_EXTENSION: &str = "outputExtension";
const OPTIONS: &str = "options";

/// Which root shape a document has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// File format plugin schema.
    Format,
    /// Processing algorithm schema.
    Algorithm,
}

impl SchemaKind {
    /// The kind's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Algorithm => "algorithm",
        }
    }

    /// Top-level keys this shape recognizes.
    pub fn root_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Format => &[LOADING_OPTIONS, SAVING_OPTIONS, EXTENSIONS, OUTPUT_EXTENSION],
            Self::Algorithm => &[OPTIONS],
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "format" => Ok(Self::Format),
            "algorithm" => Ok(Self::Algorithm),
            other => Err(LintError::Config(format!(
                "unknown schema kind '{other}'; expected 'format' or 'algorithm'"
            ))),
        }
    }
}

/// Validates whole schema documents under one [`LintConfig`].
#[derive(Debug, Clone, Default)]
pub struct SchemaLinter {
    config: LintConfig,
}

impl SchemaLinter {
    /// A linter applying `config`.
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Validate `document` as a schema of the given kind.
    pub fn lint(&self, kind: SchemaKind, document: &Value, sink: &mut dyn DiagnosticSink) {
        match kind {
            SchemaKind::Format => self.lint_format(document, sink),
            SchemaKind::Algorithm => self.lint_algorithm(document, sink),
        }
    }

    /// Validate a format schema.
    pub fn lint_format(&self, document: &Value, sink: &mut dyn DiagnosticSink) {
        tracing::debug!("validating format schema");
        let mut r = Reporter::new(sink);
        let Some(root) = root_object(document, &mut r) else {
            return;
        };

        let tree = OptionTreeValidator::new(&self.config);
        for key in [LOADING_OPTIONS, SAVING_OPTIONS] {
            let path = SymbolPath::key(key);
            if let Some(list) = optional_list(root, key, &path, &mut r) {
                tree.validate_with(list, &path, &mut r);
            }
        }

        let path = SymbolPath::key(EXTENSIONS);
        if let Some(list) = optional_list(root, EXTENSIONS, &path, &mut r) {
            check_extensions(list, &path, &mut r);
        }

        if let Some(output) =
            r.require_key(root, OUTPUT_EXTENSION, &SymbolPath::root(), Some(ValueKind::String))
        {
            r.is_non_empty(output, &SymbolPath::key(OUTPUT_EXTENSION), Severity::Error);
        }

        report_unknown_root_keys(root, SchemaKind::Format, &mut r);
    }

    /// Validate an algorithm schema.
    pub fn lint_algorithm(&self, document: &Value, sink: &mut dyn DiagnosticSink) {
        tracing::debug!("validating algorithm schema");
        let mut r = Reporter::new(sink);
        let Some(root) = root_object(document, &mut r) else {
            return;
        };

        if let Some(list) = r
            .require_key(root, OPTIONS, &SymbolPath::root(), Some(ValueKind::Array))
            .and_then(Value::as_array)
        {
            OptionTreeValidator::new(&self.config).validate_with(
                list,
                &SymbolPath::key(OPTIONS),
                &mut r,
            );
        }

        report_unknown_root_keys(root, SchemaKind::Algorithm, &mut r);
    }
}

/// Validate a format schema with the default configuration.
pub fn validate_format_schema(document: &Value, sink: &mut dyn DiagnosticSink) {
    SchemaLinter::default().lint_format(document, sink);
}

/// Validate an algorithm schema with the default configuration.
pub fn validate_algorithm_schema(document: &Value, sink: &mut dyn DiagnosticSink) {
    SchemaLinter::default().lint_algorithm(document, sink);
}

fn root_object<'v>(document: &'v Value, r: &mut Reporter<'_>) -> Option<&'v Map<String, Value>> {
    if let Value::Object(root) = document {
        return Some(root);
    }
    r.emit(Diagnostic {
        severity: Severity::Error,
        code: DiagnosticCode::StructuralType,
        path: None,
        message: format!(
            "document is supposed to be object, but is {}",
            ValueKind::of(document)
        ),
    });
    None
}

fn optional_list<'v>(
    root: &'v Map<String, Value>,
    key: &str,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
) -> Option<&'v [Value]> {
    let value = root.get(key)?;
    if !r.is_exact_type(value, ValueKind::Array, path) {
        return None;
    }
    value.as_array().map(Vec::as_slice)
}

fn report_unknown_root_keys(root: &Map<String, Value>, kind: SchemaKind, r: &mut Reporter<'_>) {
    let known = kind.root_keys();
    for key in root.keys().filter(|k| !known.contains(&k.as_str())) {
        r.report_ignored(&SymbolPath::root(), key);
    }
}
