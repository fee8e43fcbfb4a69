//! # optlint-schema: Option Schema Validation
//!
//! Validates the declarative option schemas that image-processing plugins
//! ship to describe their tunable parameters.
//!
//! ## Entry points
//!
//! - [`SchemaLinter::lint_format`] / [`validate_format_schema`]: format
//!   plugin schemas (`loadingOptions`, `savingOptions`, `extensions`,
//!   `outputExtension`).
//! - [`SchemaLinter::lint_algorithm`] / [`validate_algorithm_schema`]:
//!   algorithm schemas (`options`).
//! - [`OptionTreeValidator`] and [`validate_extensions`] for validating a
//!   single list.
//!
//! ## Contract
//!
//! Input is an already-decoded `serde_json::Value`. Output is the ordered
//! stream of diagnostics pushed into the caller's
//! [`DiagnosticSink`](optlint_core::DiagnosticSink). Entry points return
//! nothing: validation never fails and never stops early, and silence means
//! the schema is well formed.

pub mod assertions;
pub mod extensions;
pub mod identifiers;
pub mod option;
pub mod range;
pub mod root;
pub mod tree;

pub use assertions::Reporter;
pub use extensions::{validate_extensions, EXTENSION_KINDS};
pub use identifiers::{Duplicate, IdentifierRegistry};
pub use option::{NodeShape, OptionKind};
pub use range::{Bounds, RangeDefect};
pub use root::{validate_algorithm_schema, validate_format_schema, SchemaKind, SchemaLinter};
pub use tree::OptionTreeValidator;
