//! # Check Subcommands
//!
//! `optlint format FILE...` and `optlint algorithm FILE...`. Every file is
//! loaded, linted, and tallied; a file that fails to load is logged and
//! counted, and the remaining files are still checked.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use optlint_core::{DuplicatePolicy, LintConfig, Tally, WriterSink};
use optlint_schema::{SchemaKind, SchemaLinter};

use crate::load::load_document;

/// Every file is clean.
pub const EXIT_CLEAN: u8 = 0;
/// At least one error, or a warning under `--deny-warnings`.
pub const EXIT_FINDINGS: u8 = 1;
/// At least one file could not be read or decoded.
pub const EXIT_LOAD_FAILURE: u8 = 2;

/// Arguments shared by both check subcommands.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema files to check (JSON, or YAML by `.yaml`/`.yml` extension).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Aggregate result of checking a batch of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Diagnostics emitted across all files.
    pub tally: Tally,
    /// Files that were checked.
    pub checked: usize,
    /// Files that could not be loaded.
    pub load_failures: usize,
}

impl Outcome {
    /// Process exit status. Load failures dominate findings.
    pub fn exit_code(&self, deny_warnings: bool) -> u8 {
        if self.load_failures > 0 {
            EXIT_LOAD_FAILURE
        } else if self.tally.has_errors() || (deny_warnings && self.tally.warnings > 0) {
            EXIT_FINDINGS
        } else {
            EXIT_CLEAN
        }
    }
}

/// Build the effective configuration: the file at `config_path` (or the
/// defaults), then command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    deny_warnings: bool,
    duplicates: Option<DuplicatePolicy>,
) -> Result<LintConfig> {
    let mut config = match config_path {
        Some(path) => LintConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LintConfig::default(),
    };
    if deny_warnings {
        config.deny_warnings = true;
    }
    if let Some(policy) = duplicates {
        config.duplicate_policy = policy;
    }
    tracing::debug!(
        duplicates = %config.duplicate_policy,
        max_depth = config.max_depth,
        deny_warnings = config.deny_warnings,
        "resolved configuration"
    );
    Ok(config)
}

/// Check `args.files` as `kind` schemas, writing diagnostics to stderr.
pub fn run_check(kind: SchemaKind, args: &CheckArgs, config: LintConfig) -> Result<u8> {
    let deny_warnings = config.deny_warnings;
    let outcome = run_check_with(kind, &args.files, config, std::io::stderr())?;

    println!(
        "{kind} schemas: {} checked, {} error(s), {} warning(s), {} unreadable",
        outcome.checked, outcome.tally.errors, outcome.tally.warnings, outcome.load_failures
    );
    Ok(outcome.exit_code(deny_warnings))
}

/// Check `files` as `kind` schemas, writing diagnostics to `out`.
pub fn run_check_with<W: Write>(
    kind: SchemaKind,
    files: &[PathBuf],
    config: LintConfig,
    mut out: W,
) -> Result<Outcome> {
    let linter = SchemaLinter::new(config);
    let mut outcome = Outcome::default();

    for path in files {
        let document = match load_document(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(path = %path.display(), "cannot load schema: {e}");
                outcome.load_failures += 1;
                continue;
            }
        };

        let mut sink = WriterSink::new(&mut out);
        linter.lint(kind, &document, &mut sink);
        let tally = sink
            .finish()
            .with_context(|| format!("failed to write diagnostics for {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            errors = tally.errors,
            warnings = tally.warnings,
            "checked {kind} schema"
        );

        outcome.checked += 1;
        outcome.tally = outcome.tally.merge(tally);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(errors: usize, warnings: usize, load_failures: usize) -> Outcome {
        Outcome {
            tally: Tally { errors, warnings },
            checked: 1,
            load_failures,
        }
    }

    #[test]
    fn exit_code_clean() {
        assert_eq!(outcome(0, 0, 0).exit_code(false), EXIT_CLEAN);
        assert_eq!(outcome(0, 0, 0).exit_code(true), EXIT_CLEAN);
    }

    #[test]
    fn exit_code_warnings_only_fail_when_denied() {
        assert_eq!(outcome(0, 3, 0).exit_code(false), EXIT_CLEAN);
        assert_eq!(outcome(0, 3, 0).exit_code(true), EXIT_FINDINGS);
    }

    #[test]
    fn exit_code_errors() {
        assert_eq!(outcome(1, 0, 0).exit_code(false), EXIT_FINDINGS);
    }

    #[test]
    fn exit_code_load_failure_dominates() {
        assert_eq!(outcome(4, 1, 1).exit_code(false), EXIT_LOAD_FAILURE);
    }

    #[test]
    fn resolve_config_overrides() {
        let config = resolve_config(None, true, Some(DuplicatePolicy::Consolidated)).unwrap();
        assert!(config.deny_warnings);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Consolidated);

        let config = resolve_config(None, false, None).unwrap();
        assert_eq!(config, LintConfig::default());
    }
}
