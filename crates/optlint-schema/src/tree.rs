//! # Option Tree Validation
//!
//! Walks an option list depth-first, checking every node against the rules
//! of its `kind` and descending into `subsection` nodes. One
//! [`IdentifierRegistry`] is threaded through the whole walk so that
//! `identifier` uniqueness holds across every nesting level.
//!
//! Validation never stops early. A broken node is reported and its siblings
//! are still checked; within a node, each check's result only gates the
//! checks that depend on it (a malformed `range` suppresses the
//! default-in-range check, nothing else).
//!
//! ## Duplicate identifiers
//!
//! Under [`DuplicatePolicy::Progressive`] the registry is re-scanned after
//! every node at every level, so an identifier that is already duplicated
//! is reported again after each later node. Under
//! [`DuplicatePolicy::Consolidated`] each duplicated identifier is reported
//! once, after the walk.

use std::collections::BTreeSet;

use optlint_core::{
    DiagnosticCode, DiagnosticSink, DuplicatePolicy, LintConfig, Severity, SymbolPath, ValueKind,
};
use serde_json::{Map, Value};

use crate::assertions::Reporter;
use crate::identifiers::IdentifierRegistry;
use crate::option::{NodeShape, OptionKind, COMMON_KEYS, HELP_KEYS};
use crate::range::{float_range, int_range, Bounds, RangeDefect};

/// Outcome of checking a node's `range`.
enum RangeCheck<T> {
    Absent,
    Valid(Bounds<T>),
    Malformed,
}

/// Recursive validator for option lists.
#[derive(Debug, Clone, Copy)]
pub struct OptionTreeValidator<'c> {
    config: &'c LintConfig,
}

impl<'c> OptionTreeValidator<'c> {
    /// A validator applying `config`.
    pub fn new(config: &'c LintConfig) -> Self {
        Self { config }
    }

    /// Validate a top-level option list rooted at `path`.
    ///
    /// Starts a fresh identifier registry; two calls never share
    /// uniqueness.
    pub fn validate(&self, options: &[Value], path: &SymbolPath, sink: &mut dyn DiagnosticSink) {
        let mut reporter = Reporter::new(sink);
        self.validate_with(options, path, &mut reporter);
    }

    /// [`OptionTreeValidator::validate`] for callers that already hold a
    /// [`Reporter`].
    pub fn validate_with(&self, options: &[Value], path: &SymbolPath, reporter: &mut Reporter<'_>) {
        tracing::debug!(path = %path, nodes = options.len(), "validating option list");
        let mut ids = IdentifierRegistry::new();
        self.check_options(options, path, &mut ids, reporter, 0);
        if self.config.duplicate_policy == DuplicatePolicy::Consolidated {
            ids.report_duplicates(reporter);
        }
    }

    fn check_options(
        &self,
        options: &[Value],
        path: &SymbolPath,
        ids: &mut IdentifierRegistry,
        r: &mut Reporter<'_>,
        depth: usize,
    ) {
        for (i, node) in options.iter().enumerate() {
            self.check_node(node, &path.index(i), ids, r, depth);
        }
    }

    fn check_node(
        &self,
        node: &Value,
        path: &SymbolPath,
        ids: &mut IdentifierRegistry,
        r: &mut Reporter<'_>,
        depth: usize,
    ) {
        if !r.is_exact_type(node, ValueKind::Object, path) {
            return;
        }
        let Some(node) = node.as_object() else {
            return;
        };

        if let Some(label) = r.optional_key(node, "label", path, ValueKind::String) {
            r.is_non_empty(label, &path.join("label"), Severity::Error);
        }
        for key in HELP_KEYS {
            if let Some(help) = r.optional_key(node, key, path, ValueKind::String) {
                r.is_non_empty(help, &path.join(*key), Severity::Error);
            }
        }

        let mut unused: BTreeSet<&str> = node
            .keys()
            .map(String::as_str)
            .filter(|k| !COMMON_KEYS.contains(k))
            .collect();

        if let Some(kind) = self.check_kind(node, path, r) {
            if kind.requires_identifier() {
                unused.remove("identifier");
                self.check_identifier(node, path, ids, r);
            }
            for key in kind.payload_keys() {
                unused.remove(key);
            }
            self.check_shape(NodeShape::decode(kind, node), path, ids, r, depth);
        }

        if self.config.duplicate_policy == DuplicatePolicy::Progressive {
            ids.report_duplicates(r);
        }

        for key in unused {
            r.report_ignored(path, key);
        }
    }

    fn check_kind(
        &self,
        node: &Map<String, Value>,
        path: &SymbolPath,
        r: &mut Reporter<'_>,
    ) -> Option<OptionKind> {
        let name = r
            .require_key(node, "kind", path, Some(ValueKind::String))?
            .as_str()?;
        if !r.matches_one_of(&name, OptionKind::NAMES, &path.join("kind")) {
            return None;
        }
        OptionKind::parse(name)
    }

    fn check_identifier(
        &self,
        node: &Map<String, Value>,
        path: &SymbolPath,
        ids: &mut IdentifierRegistry,
        r: &mut Reporter<'_>,
    ) {
        let Some(identifier) = r.require_key(node, "identifier", path, Some(ValueKind::String))
        else {
            return;
        };
        let id_path = path.join("identifier");
        if r.is_non_empty(identifier, &id_path, Severity::Error) {
            if let Some(id) = identifier.as_str() {
                ids.record(id, id_path);
            }
        }
    }

    fn check_shape(
        &self,
        shape: NodeShape<'_>,
        path: &SymbolPath,
        ids: &mut IdentifierRegistry,
        r: &mut Reporter<'_>,
        depth: usize,
    ) {
        match shape {
            NodeShape::Header => {}
            NodeShape::Int { range, default } => {
                let bounds = check_range(range, path, r, int_range);
                check_int_default(default, bounds, path, r);
            }
            NodeShape::Double { range, default } => {
                let bounds = check_range(range, path, r, float_range);
                check_double_default(default, bounds, path, r);
            }
            NodeShape::Checkbox { default } => {
                check_bool_default(default, path, r);
            }
            NodeShape::Text { range, default } => {
                let bounds = check_range(range, path, r, int_range);
                check_text_default(default, bounds, path, r);
            }
            NodeShape::Choice { values, default } => {
                check_choice(values, default, path, r);
            }
            NodeShape::Subsection { options, default } => {
                self.check_subsection(options, path, ids, r, depth);
                check_bool_default(default, path, r);
            }
        }
    }

    fn check_subsection(
        &self,
        options: Option<&Value>,
        path: &SymbolPath,
        ids: &mut IdentifierRegistry,
        r: &mut Reporter<'_>,
        depth: usize,
    ) {
        let options_path = path.join("options");
        let Some(options) = options else {
            r.error(DiagnosticCode::MissingField, options_path, "not found");
            return;
        };
        if !r.is_exact_type(options, ValueKind::Array, &options_path) {
            return;
        }
        let Some(nested) = options.as_array() else {
            return;
        };
        if depth + 1 > self.config.max_depth {
            r.error(
                DiagnosticCode::DepthExceeded,
                options_path,
                format!(
                    "nests deeper than {} levels and will not be checked",
                    self.config.max_depth
                ),
            );
            return;
        }
        tracing::debug!(path = %path, nodes = nested.len(), depth = depth + 1, "entering subsection");
        self.check_options(nested, &path.descend(), ids, r, depth + 1);
    }
}

fn check_range<T>(
    range: Option<&Value>,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
    parse: fn(&[Value]) -> Result<Bounds<T>, RangeDefect>,
) -> RangeCheck<T> {
    let Some(range) = range else {
        return RangeCheck::Absent;
    };
    let range_path = path.join("range");
    if !r.is_exact_type(range, ValueKind::Array, &range_path) {
        return RangeCheck::Malformed;
    }
    let Some(pair) = range.as_array() else {
        return RangeCheck::Malformed;
    };
    match parse(pair) {
        Ok(bounds) => RangeCheck::Valid(bounds),
        Err(defect) => {
            r.error(
                DiagnosticCode::RangeFormat,
                range_path,
                format!("is in invalid format: {defect}"),
            );
            RangeCheck::Malformed
        }
    }
}

fn not_in_range<T: std::fmt::Display>(
    r: &mut Reporter<'_>,
    path: &SymbolPath,
    found: impl std::fmt::Display,
    bounds: &Bounds<T>,
) {
    r.error(
        DiagnosticCode::RangeViolation,
        path.join("default"),
        format!("not in range: {found} is outside {bounds}"),
    );
}

fn check_int_default(
    default: Option<&Value>,
    bounds: RangeCheck<i32>,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
) {
    let Some(default) = default else { return };
    if matches!(bounds, RangeCheck::Malformed) {
        return;
    }
    if !r.is_exact_type(default, ValueKind::Integer, &path.join("default")) {
        return;
    }
    if let RangeCheck::Valid(bounds) = bounds {
        let low = i64::from(bounds.low);
        let high = i64::from(bounds.high);
        let inside = default.as_i64().is_some_and(|v| low <= v && v <= high);
        if !inside {
            not_in_range(r, path, default, &bounds);
        }
    }
}

fn check_double_default(
    default: Option<&Value>,
    bounds: RangeCheck<f64>,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
) {
    let Some(default) = default else { return };
    if matches!(bounds, RangeCheck::Malformed) {
        return;
    }
    if !r.is_exact_type(default, ValueKind::Float, &path.join("default")) {
        return;
    }
    if let RangeCheck::Valid(bounds) = bounds {
        if !default.as_f64().is_some_and(|v| bounds.contains(v)) {
            not_in_range(r, path, default, &bounds);
        }
    }
}

fn check_text_default(
    default: Option<&Value>,
    bounds: RangeCheck<i32>,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
) {
    let Some(default) = default else { return };
    if matches!(bounds, RangeCheck::Malformed) {
        return;
    }
    if !r.is_exact_type(default, ValueKind::String, &path.join("default")) {
        return;
    }
    if let (RangeCheck::Valid(bounds), Some(text)) = (bounds, default.as_str()) {
        let length = text.chars().count();
        let inside = i64::try_from(length)
            .is_ok_and(|n| i64::from(bounds.low) <= n && n <= i64::from(bounds.high));
        if !inside {
            not_in_range(r, path, format!("length {length}"), &bounds);
        }
    }
}

fn check_bool_default(default: Option<&Value>, path: &SymbolPath, r: &mut Reporter<'_>) {
    if let Some(default) = default {
        r.is_exact_type(default, ValueKind::Boolean, &path.join("default"));
    }
}

fn check_choice(
    values: Option<&Value>,
    default: Option<&Value>,
    path: &SymbolPath,
    r: &mut Reporter<'_>,
) {
    let values_path = path.join("values");
    let allowed: Option<Vec<&str>> = match values {
        None => None,
        Some(values) if r.is_exact_type(values, ValueKind::Array, &values_path) => {
            let items = values.as_array().map(Vec::as_slice).unwrap_or_default();
            r.is_non_empty(values, &values_path, Severity::Warning);
            let mut strings = Vec::with_capacity(items.len());
            let mut all_strings = true;
            for (i, item) in items.iter().enumerate() {
                if r.is_exact_type(item, ValueKind::String, &values_path.index(i)) {
                    strings.extend(item.as_str());
                } else {
                    all_strings = false;
                }
            }
            all_strings.then_some(strings)
        }
        Some(_) => None,
    };

    let Some(default) = default else { return };
    let default_path = path.join("default");
    if !r.is_exact_type(default, ValueKind::String, &default_path) {
        return;
    }
    // Values absent or malformed: membership cannot be judged.
    if let (Some(allowed), Some(chosen)) = (allowed, default.as_str()) {
        r.matches_one_of(&chosen, &allowed, &default_path);
    }
}
