//! # Option Node Shapes
//!
//! An option node is discriminated on its `kind` string. [`OptionKind`] is
//! the discriminator; [`NodeShape`] is the decoded node, a sum type whose
//! variants borrow only the raw fields legal for that kind. Keys legal for
//! some *other* kind are not part of the shape and end up reported as
//! ignored.

use std::fmt;

use serde_json::{Map, Value};

/// Keys every option node may carry regardless of kind.
pub const COMMON_KEYS: &[&str] = &["label", "help", "description", "kind"];

/// Keys accepted as help text.
pub const HELP_KEYS: &[&str] = &["help", "description"];

/// The seven option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Visual separator with no value.
    Header,
    /// 32-bit signed integer.
    Int,
    /// Floating-point number.
    Double,
    /// Boolean toggle.
    Checkbox,
    /// Free text.
    Text,
    /// One of a fixed list of strings.
    Choice,
    /// A nested list of options, optionally toggled as a group.
    Subsection,
}

impl OptionKind {
    /// Every kind name, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "header",
        "int",
        "double",
        "checkbox",
        "text",
        "choice",
        "subsection",
    ];

    /// Parse a kind name.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "header" => Self::Header,
            "int" => Self::Int,
            "double" => Self::Double,
            "checkbox" => Self::Checkbox,
            "text" => Self::Text,
            "choice" => Self::Choice,
            "subsection" => Self::Subsection,
            _ => return None,
        })
    }

    /// The kind name as written in schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Int => "int",
            Self::Double => "double",
            Self::Checkbox => "checkbox",
            Self::Text => "text",
            Self::Choice => "choice",
            Self::Subsection => "subsection",
        }
    }

    /// Headers are the only kind without an `identifier`.
    pub fn requires_identifier(&self) -> bool {
        !matches!(self, Self::Header)
    }

    /// Kind-specific keys, excluding `identifier`.
    pub fn payload_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Header => &[],
            Self::Int | Self::Double | Self::Text => &["range", "default"],
            Self::Checkbox => &["default"],
            Self::Choice => &["values", "default"],
            Self::Subsection => &["options", "default"],
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node decoded by kind, carrying only that kind's raw fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape<'a> {
    /// `header`: no payload.
    Header,
    /// `int`: integer `range` and `default`.
    Int {
        range: Option<&'a Value>,
        default: Option<&'a Value>,
    },
    /// `double`: float `range` and `default`.
    Double {
        range: Option<&'a Value>,
        default: Option<&'a Value>,
    },
    /// `checkbox`: boolean `default`.
    Checkbox { default: Option<&'a Value> },
    /// `text`: length `range` and string `default`.
    Text {
        range: Option<&'a Value>,
        default: Option<&'a Value>,
    },
    /// `choice`: string `values` and `default`.
    Choice {
        values: Option<&'a Value>,
        default: Option<&'a Value>,
    },
    /// `subsection`: nested `options` and boolean `default`.
    Subsection {
        options: Option<&'a Value>,
        default: Option<&'a Value>,
    },
}

impl<'a> NodeShape<'a> {
    /// Pick the fields legal for `kind` out of `node`.
    pub fn decode(kind: OptionKind, node: &'a Map<String, Value>) -> Self {
        let default = node.get("default");
        match kind {
            OptionKind::Header => Self::Header,
            OptionKind::Int => Self::Int {
                range: node.get("range"),
                default,
            },
            OptionKind::Double => Self::Double {
                range: node.get("range"),
                default,
            },
            OptionKind::Checkbox => Self::Checkbox { default },
            OptionKind::Text => Self::Text {
                range: node.get("range"),
                default,
            },
            OptionKind::Choice => Self::Choice {
                values: node.get("values"),
                default,
            },
            OptionKind::Subsection => Self::Subsection {
                options: node.get("options"),
                default,
            },
        }
    }

    /// The discriminator this shape was decoded from.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Header => OptionKind::Header,
            Self::Int { .. } => OptionKind::Int,
            Self::Double { .. } => OptionKind::Double,
            Self::Checkbox { .. } => OptionKind::Checkbox,
            Self::Text { .. } => OptionKind::Text,
            Self::Choice { .. } => OptionKind::Choice,
            Self::Subsection { .. } => OptionKind::Subsection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_round_trip() {
        for name in OptionKind::NAMES {
            let kind = OptionKind::parse(name).unwrap();
            assert_eq!(kind.as_str(), *name);
        }
        assert_eq!(OptionKind::parse("float"), None);
        assert_eq!(OptionKind::parse("Int"), None);
    }

    #[test]
    fn only_header_lacks_identifier() {
        let without: Vec<&str> = OptionKind::NAMES
            .iter()
            .filter(|n| !OptionKind::parse(n).unwrap().requires_identifier())
            .copied()
            .collect();
        assert_eq!(without, vec!["header"]);
    }

    #[test]
    fn decode_borrows_only_legal_fields() {
        let node = json!({"kind": "checkbox", "default": true, "range": [0, 1]});
        let shape = NodeShape::decode(OptionKind::Checkbox, node.as_object().unwrap());
        assert_eq!(
            shape,
            NodeShape::Checkbox {
                default: Some(&json!(true))
            }
        );
        assert_eq!(shape.kind(), OptionKind::Checkbox);
    }

    #[test]
    fn decode_subsection() {
        let node = json!({"kind": "subsection", "options": []});
        let shape = NodeShape::decode(OptionKind::Subsection, node.as_object().unwrap());
        match shape {
            NodeShape::Subsection { options, default } => {
                assert_eq!(options, Some(&json!([])));
                assert!(default.is_none());
            }
            other => panic!("expected subsection, got {other:?}"),
        }
    }

    #[test]
    fn payload_keys_match_shapes() {
        assert!(OptionKind::Header.payload_keys().is_empty());
        assert_eq!(OptionKind::Choice.payload_keys(), &["values", "default"]);
        assert_eq!(OptionKind::Subsection.payload_keys(), &["options", "default"]);
    }
}
