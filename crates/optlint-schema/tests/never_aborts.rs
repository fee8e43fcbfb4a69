//! Property tests: validation returns normally for any decoded document and
//! only ever reports through the sink.

use optlint_core::{CollectingSink, DiagnosticCode, LintConfig, SymbolPath};
use optlint_schema::{OptionTreeValidator, SchemaKind, SchemaLinter};
use proptest::prelude::*;
use serde_json::Value;

/// Arbitrary JSON, biased toward the keys and kind names schemas use so
/// that deep validator branches are reached.
fn schema_like_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| serde_json::json!(f)),
        prop_oneof![
            Just("header"),
            Just("int"),
            Just("double"),
            Just("checkbox"),
            Just("text"),
            Just("choice"),
            Just("subsection"),
            Just("regex"),
            Just("plain"),
            Just(""),
            Just("("),
        ]
        .prop_map(|s| Value::String(s.to_string())),
    ];
    let key = prop_oneof![
        Just("kind"),
        Just("identifier"),
        Just("label"),
        Just("help"),
        Just("range"),
        Just("default"),
        Just("values"),
        Just("options"),
        Just("suffix"),
        Just("loadingOptions"),
        Just("savingOptions"),
        Just("extensions"),
        Just("outputExtension"),
        Just("extra"),
    ]
    .prop_map(str::to_string);
    leaf.prop_recursive(5, 96, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(key.clone(), inner, 0..6).prop_map(|m| {
                let map: serde_json::Map<String, Value> = m.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    /// Format validation returns for any document.
    #[test]
    fn format_validation_never_aborts(doc in schema_like_value()) {
        let mut sink = CollectingSink::new();
        SchemaLinter::default().lint(SchemaKind::Format, &doc, &mut sink);
        for d in sink.diagnostics() {
            let line = d.to_string();
            prop_assert!(line.starts_with("[ERROR] ") || line.starts_with("[WARNING] "));
        }
    }

    /// Algorithm validation returns for any document.
    #[test]
    fn algorithm_validation_never_aborts(doc in schema_like_value()) {
        let mut sink = CollectingSink::new();
        SchemaLinter::default().lint(SchemaKind::Algorithm, &doc, &mut sink);
        prop_assert!(sink.tally().total() == sink.len());
    }

    /// Unrecognized keys are only ever warnings.
    #[test]
    fn unrecognized_keys_are_warnings(list in prop::collection::vec(schema_like_value(), 0..8)) {
        let config = LintConfig::default();
        let mut sink = CollectingSink::new();
        OptionTreeValidator::new(&config).validate(&list, &SymbolPath::key("options"), &mut sink);
        for d in sink.with_code(DiagnosticCode::UnrecognizedKey) {
            prop_assert!(!d.is_error());
        }
    }
}
