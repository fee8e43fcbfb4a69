//! # Exact Value Kinds
//!
//! Classifies a decoded `serde_json::Value` by its own discriminant.
//!
//! JSON numbers are split into `integer` (written without a fraction or
//! exponent) and `float`. The split follows `serde_json::Number`: a number
//! is an integer when it fits `i64` or `u64`, otherwise it is a float.

use std::fmt;

use serde_json::Value;

/// The concrete kind of a decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Boolean,
    /// A number written without fraction or exponent.
    Integer,
    /// Any other number.
    Float,
    /// A string.
    String,
    /// An ordered sequence.
    Array,
    /// A string-keyed mapping.
    Object,
}

impl ValueKind {
    /// Classify `value` by its discriminant.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
