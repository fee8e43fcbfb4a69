//! # Lint Configuration
//!
//! Knobs that change how findings are reported, never which documents are
//! well formed. Loaded from YAML by the CLI (`--config`), with command-line
//! flags taking precedence.
//!
//! ```yaml
//! duplicate_policy: consolidated
//! max_depth: 16
//! deny_warnings: true
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// Default bound on subsection nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// When duplicate identifiers are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Re-scan after every node; a duplicate is reported again after each
    /// later node of the same call.
    #[default]
    Progressive,
    /// Report each duplicated identifier once, when the call finishes.
    Consolidated,
}

impl DuplicatePolicy {
    /// Name as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progressive => "progressive",
            Self::Consolidated => "consolidated",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "progressive" => Ok(Self::Progressive),
            "consolidated" => Ok(Self::Consolidated),
            other => Err(LintError::Config(format!(
                "unknown duplicate policy '{other}'; expected 'progressive' or 'consolidated'"
            ))),
        }
    }
}

/// Reporting configuration for one lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Duplicate-identifier reporting policy.
    pub duplicate_policy: DuplicatePolicy,
    /// Deepest subsection nesting that is descended into.
    pub max_depth: usize,
    /// Treat warnings as failures when deriving an exit status.
    pub deny_warnings: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            deny_warnings: false,
        }
    }
}

impl LintConfig {
    /// Parse a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Yaml` for malformed YAML or unknown keys, and
    /// `LintError::Config` for a zero `max_depth`.
    pub fn from_yaml_str(content: &str) -> Result<Self, LintError> {
        // An empty file is the default configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    fn check(&self) -> Result<(), LintError> {
        if self.max_depth == 0 {
            return Err(LintError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LintConfig::default();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Progressive);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.deny_warnings);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = LintConfig::from_yaml_str("duplicate_policy: consolidated\n").unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Consolidated);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(LintConfig::from_yaml_str("  \n").unwrap(), LintConfig::default());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = LintConfig::from_yaml_str("colour: red\n").unwrap_err();
        assert!(matches!(err, LintError::Yaml(_)), "got: {err}");
    }

    #[test]
    fn zero_depth_rejected() {
        let err = LintConfig::from_yaml_str("max_depth: 0\n").unwrap_err();
        assert!(matches!(err, LintError::Config(_)), "got: {err}");
    }

    #[test]
    fn policy_from_str() {
        assert_eq!(
            "consolidated".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::Consolidated
        );
        assert!("eager".parse::<DuplicatePolicy>().is_err());
        assert_eq!(DuplicatePolicy::Progressive.to_string(), "progressive");
    }
}
