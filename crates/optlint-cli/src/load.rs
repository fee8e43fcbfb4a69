//! # Document Loading
//!
//! Reads a schema file and decodes it into a `serde_json::Value`. Files
//! named `*.yaml` / `*.yml` are parsed as YAML and converted to the
//! equivalent JSON tree; everything else is parsed as JSON.

use std::path::Path;

use optlint_core::LintError;
use serde_json::{Map, Number, Value};
use serde_yaml::value::TaggedValue;
use serde_yaml::Value as Yaml;

/// Text format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text, restricted to its JSON-compatible subset.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and decode the schema file at `path`.
///
/// # Errors
///
/// Returns `LintError::Io` if the file cannot be read, and `LintError::Json`,
/// `LintError::Yaml` or `LintError::Conversion` if it cannot be decoded.
pub fn load_document(path: &Path) -> Result<Value, LintError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

/// Decode schema text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, LintError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => {
            let yaml: Yaml = serde_yaml::from_str(content)?;
            into_json(yaml)
        }
    }
}

/// Rebuild a YAML document as the JSON tree it denotes.
///
/// Integers stay integers and floats stay floats, so exact-kind checks see
/// the same kinds a JSON rendition of the document would produce. Tags are
/// dropped.
fn into_json(yaml: Yaml) -> Result<Value, LintError> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => json_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(into_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| Ok((json_key(k)?, into_json(v)?)))
                .collect::<Result<Map<_, _>, LintError>>()?,
        ),
        Yaml::Tagged(tagged) => {
            let TaggedValue { value, .. } = *tagged;
            into_json(value)?
        }
    })
}

fn json_number(n: &serde_yaml::Number) -> Result<Value, LintError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| LintError::Conversion(format!("number {n} has no JSON equivalent")))
}

/// JSON object keys are strings; scalar YAML keys are stringified.
fn json_key(key: Yaml) -> Result<String, LintError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Err(LintError::Conversion("null map key".to_string())),
        Yaml::Sequence(_) | Yaml::Mapping(_) | Yaml::Tagged(_) => Err(LintError::Conversion(
            "map key is not a scalar".to_string(),
        )),
    }
}
