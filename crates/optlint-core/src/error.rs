//! # Error Types
//!
//! Host-side failures that happen around validation: reading a schema file,
//! decoding it, or loading a lint configuration. Validation itself never
//! fails; it only emits diagnostics.

use thiserror::Error;

/// Failure while preparing a document or configuration for linting.
#[derive(Error, Debug)]
pub enum LintError {
    /// IO error reading a schema or configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document or configuration is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A YAML document uses a construct with no JSON equivalent.
    #[error("YAML-to-JSON conversion failed: {0}")]
    Conversion(String),

    /// The lint configuration is structurally valid but semantically wrong.
    #[error("configuration error: {0}")]
    Config(String),
}
