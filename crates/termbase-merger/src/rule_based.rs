//! Deterministic rule-based merge

use termbase_domain::{ColumnNames, ConsolidatedRecord, MergeMethod, MergeProvenance, Record};

/// Separator between distinct definitions
pub const DEFINITION_SEPARATOR: &str = " | ";

/// Separator between distinct URLs
pub const URL_SEPARATOR: &str = "; ";

/// Collapses a group without any external call
///
/// - term: longest non-empty value, first occurrence wins ties
/// - definition: distinct non-empty values in first-seen order, joined with `" | "`
/// - url: distinct non-empty values in first-seen order, joined with `"; "`
///
/// A single-member group passes through unchanged.
#[derive(Debug, Clone)]
pub struct RuleBasedMerger {
    columns: ColumnNames,
}

impl RuleBasedMerger {
    /// Create a merger for the configured columns
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    /// Configured columns
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Merge the members of one group
    pub fn merge(&self, records: &[&Record]) -> ConsolidatedRecord {
        if let [only] = records {
            return ConsolidatedRecord::passthrough(only);
        }

        let term = longest_value(records, &self.columns.term);
        let definition = distinct_values(records, &self.columns.definition).join(DEFINITION_SEPARATOR);
        let url = distinct_values(records, &self.columns.url).join(URL_SEPARATOR);

        ConsolidatedRecord::merged(
            vec![
                (self.columns.term.clone(), term),
                (self.columns.definition.clone(), definition),
                (self.columns.url.clone(), url),
            ],
            MergeProvenance {
                sources_merged: records.len(),
                method: MergeMethod::Basic,
            },
        )
    }
}

fn longest_value(records: &[&Record], column: &str) -> String {
    let mut best = "";
    for record in records {
        let value = record.value(column);
        if value.chars().count() > best.chars().count() {
            best = value;
        }
    }
    best.to_string()
}

fn distinct_values<'a>(records: &[&'a Record], column: &str) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for record in records {
        let value = record.value(column);
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, definition: &str, url: &str) -> Record {
        Record::new(
            "test.csv",
            [("term", term), ("definition", definition), ("url", url)],
        )
    }

    fn merger() -> RuleBasedMerger {
        RuleBasedMerger::new(ColumnNames::default())
    }

    #[test]
    fn test_http_example() {
        let a = record("HTTP", "Hypertext Transfer Protocol", "");
        let b = record("http", "Hypertext transfer protocol - a network protocol", "");

        let merged = merger().merge(&[&a, &b]);

        assert_eq!(merged.field("term"), "HTTP");
        assert_eq!(
            merged.field("definition"),
            "Hypertext Transfer Protocol | Hypertext transfer protocol - a network protocol"
        );
        assert_eq!(merged.field("url"), "");
        assert_eq!(merged.get("sources_merged").as_deref(), Some("2"));
        assert_eq!(merged.get("merge_method").as_deref(), Some("basic"));
    }

    #[test]
    fn test_longest_term_wins() {
        let a = record("TCP", "x", "");
        let b = record("TCP/IP", "y", "");
        let c = record("tcp", "z", "");

        let merged = merger().merge(&[&a, &b, &c]);
        assert_eq!(merged.field("term"), "TCP/IP");
    }

    #[test]
    fn test_first_term_wins_ties() {
        let a = record("abc", "", "");
        let b = record("ABC", "", "");

        assert_eq!(merger().merge(&[&a, &b]).field("term"), "abc");
        assert_eq!(merger().merge(&[&b, &a]).field("term"), "ABC");
    }

    #[test]
    fn test_exact_dedup_and_empty_skipping() {
        let a = record("x", "Same", "https://a");
        let b = record("x", "", "https://a");
        let c = record("x", "Same", "https://b");
        let d = record("x", "same", "");

        let merged = merger().merge(&[&a, &b, &c, &d]);
        assert_eq!(merged.field("definition"), "Same | same");
        assert_eq!(merged.field("url"), "https://a; https://b");
        assert_eq!(merged.get("sources_merged").as_deref(), Some("4"));
    }

    #[test]
    fn test_singleton_passes_through() {
        let a = Record::new(
            "a.csv",
            [("term", "DNS"), ("definition", "Domain Name System"), ("extra", "kept")],
        );

        let merged = merger().merge(&[&a]);
        assert_eq!(merged.provenance(), None);
        assert_eq!(merged.field("extra"), "kept");
        assert_eq!(merged.columns(), vec!["term", "definition", "extra"]);
    }

    #[test]
    fn test_merged_columns_are_fixed() {
        let a = Record::new("a.csv", [("term", "A"), ("definition", "d"), ("extra", "1")]);
        let b = Record::new("b.csv", [("term", "a"), ("definition", "d"), ("extra", "2")]);

        let merged = merger().merge(&[&a, &b]);
        assert_eq!(
            merged.columns(),
            vec!["term", "definition", "url", "sources_merged", "merge_method"]
        );
    }

    #[test]
    fn test_deterministic() {
        let a = record("HTTP", "one", "u1");
        let b = record("HTTPS", "two", "u2");

        let first = merger().merge(&[&a, &b]);
        let second = merger().merge(&[&a, &b]);
        assert_eq!(first, second);
    }
}
