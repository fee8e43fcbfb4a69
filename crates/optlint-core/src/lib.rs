//! # optlint-core: Foundational Types for optlint
//!
//! Leaf crate of the optlint workspace. Defines the vocabulary every
//! validator speaks: exact value kinds, symbolic breadcrumb paths, the
//! diagnostic record and the sinks that receive it, and the lint
//! configuration shared by the library and the CLI.
//!
//! ## Key Design Principles
//!
//! 1. **Exact kinds, never coercion.** [`ValueKind`] distinguishes
//!    `boolean`, `integer` and `float`. A boolean is never an integer and
//!    an integer literal is never a float.
//!
//! 2. **Diagnostics are data.** Validators emit [`Diagnostic`] values into a
//!    [`DiagnosticSink`]; rendering to `[ERROR]`/`[WARNING]` lines happens in
//!    `Display`, so tests can inspect codes and paths directly.
//!
//! 3. **No verdict from the validator.** The validator returns nothing.
//!    Callers that need a verdict count diagnostics with a [`Tally`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `optlint-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod kind;
pub mod path;
pub mod sink;

pub use config::{DuplicatePolicy, LintConfig, DEFAULT_MAX_DEPTH};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use error::LintError;
pub use kind::ValueKind;
pub use path::SymbolPath;
pub use sink::{CollectingSink, DiagnosticSink, Tally, WriterSink};
