//! # Identifier Registry
//!
//! Accumulates every `identifier` recorded during one validation call,
//! across all subsection levels, and finds the values that occur more than
//! once. A fresh registry is created per top-level option list.

use std::collections::HashMap;

use optlint_core::{DiagnosticCode, SymbolPath};

use crate::assertions::Reporter;

/// A duplicated identifier found by [`IdentifierRegistry::duplicates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate<'a> {
    /// The repeated value.
    pub identifier: &'a str,
    /// How many times it has been recorded.
    pub count: usize,
    /// Path of the most recent occurrence.
    pub latest: &'a SymbolPath,
}

/// Identifiers recorded so far, in recording order.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    entries: Vec<(String, SymbolPath)>,
}

impl IdentifierRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence. Repeats are kept; detecting them is the point.
    pub fn record(&mut self, identifier: impl Into<String>, path: SymbolPath) {
        self.entries.push((identifier.into(), path));
    }

    /// Every value recorded more than once, ordered by first occurrence.
    pub fn duplicates(&self) -> Vec<Duplicate<'_>> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut found: Vec<Duplicate<'_>> = Vec::new();
        for (identifier, path) in &self.entries {
            let slot = *seen.entry(identifier.as_str()).or_insert_with(|| {
                found.push(Duplicate {
                    identifier,
                    count: 0,
                    latest: path,
                });
                found.len() - 1
            });
            found[slot].count += 1;
            found[slot].latest = path;
        }
        found.retain(|d| d.count > 1);
        found
    }

    /// Emit one error per duplicated value currently in the registry.
    pub fn report_duplicates(&self, reporter: &mut Reporter<'_>) {
        for dup in self.duplicates() {
            reporter.error(
                DiagnosticCode::DuplicateIdentifier,
                dup.latest.clone(),
                format!(
                    "is not unique: identifier '{}' is declared {} times",
                    dup.identifier, dup.count
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optlint_core::CollectingSink;

    fn at(i: usize) -> SymbolPath {
        SymbolPath::key("options").index(i).join("identifier")
    }

    #[test]
    fn unique_identifiers_have_no_duplicates() {
        let mut ids = IdentifierRegistry::new();
        ids.record("a", at(0));
        ids.record("b", at(1));
        assert!(ids.duplicates().is_empty());
    }

    #[test]
    fn duplicates_ordered_by_first_occurrence() {
        let mut ids = IdentifierRegistry::new();
        ids.record("b", at(0));
        ids.record("a", at(1));
        ids.record("a", at(2));
        ids.record("b", at(3));
        ids.record("b", at(4));

        let dups = ids.duplicates();
        assert_eq!(dups.len(), 2);
        assert_eq!(dups[0].identifier, "b");
        assert_eq!(dups[0].count, 3);
        assert_eq!(dups[0].latest, &at(4));
        assert_eq!(dups[1].identifier, "a");
        assert_eq!(dups[1].count, 2);
    }

    #[test]
    fn report_names_identifier_and_latest_path() {
        let mut ids = IdentifierRegistry::new();
        ids.record("x", at(0));
        ids.record("x", at(1));

        let mut sink = CollectingSink::new();
        ids.report_duplicates(&mut Reporter::new(&mut sink));
        assert_eq!(
            sink.lines(),
            vec![
                "[ERROR] -> 'options' -> '1' -> 'identifier' is not unique: \
                 identifier 'x' is declared 2 times"
            ]
        );
    }
}
