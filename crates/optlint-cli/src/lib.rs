//! # optlint-cli: Option Schema Linter CLI
//!
//! Loads schema files from disk and hands the decoded documents to
//! `optlint-schema`. Diagnostics go to stderr, one line each; logs go
//! through `tracing`.
//!
//! ## Subcommands
//!
//! - `format`: check format plugin schemas
//! - `algorithm`: check algorithm schemas
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here.
//! - The validator reports, it does not judge. The exit status is derived
//!   here from the diagnostic tally (see [`check::Outcome::exit_code`]).

pub mod check;
pub mod load;

pub use check::{resolve_config, run_check, run_check_with, CheckArgs, Outcome};
pub use load::{load_document, parse_document, DocumentFormat};
