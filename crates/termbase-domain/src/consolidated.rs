//! Consolidated records - the output unit of a run

use crate::record::Record;
use std::fmt;

/// Output column carrying the number of input records merged
pub const SOURCES_MERGED_COLUMN: &str = "sources_merged";

/// Output column carrying the backend's confidence in a service-assisted merge
pub const MERGE_CONFIDENCE_COLUMN: &str = "merge_confidence";

/// Output column marking a rule-based merge
pub const MERGE_METHOD_COLUMN: &str = "merge_method";

/// Value of `merge_method` for rule-based merges
pub const BASIC_MERGE_METHOD: &str = "basic";

/// Confidence reported by the merge backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeConfidence {
    /// Members clearly describe the same entry
    High,
    /// Members probably describe the same entry
    Medium,
    /// Merge is a best effort
    Low,
}

impl MergeConfidence {
    /// Lower-case name as written to the output
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeConfidence::High => "high",
            MergeConfidence::Medium => "medium",
            MergeConfidence::Low => "low",
        }
    }

    /// Parse a confidence label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(MergeConfidence::High),
            "medium" => Some(MergeConfidence::Medium),
            "low" => Some(MergeConfidence::Low),
            _ => None,
        }
    }
}

impl fmt::Display for MergeConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a group was collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Deterministic rule-based merge
    Basic,
    /// Merge produced by the external text-generation backend
    Assisted(MergeConfidence),
}

/// Provenance attached to a merged record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeProvenance {
    /// Number of input records collapsed into this one
    pub sources_merged: usize,

    /// Strategy that produced the record
    pub method: MergeMethod,
}

/// One record of the consolidated knowledge base
///
/// Singleton groups pass through with their original columns and no
/// provenance; merged groups carry a [`MergeProvenance`] which surfaces as the
/// trailing `sources_merged` and `merge_confidence`/`merge_method` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedRecord {
    fields: Vec<(String, String)>,
    provenance: Option<MergeProvenance>,
}

impl ConsolidatedRecord {
    /// Carry an unmerged record through unchanged
    pub fn passthrough(record: &Record) -> Self {
        Self {
            fields: record.fields().to_vec(),
            provenance: None,
        }
    }

    /// Build a merged record from its data columns and provenance
    pub fn merged(fields: Vec<(String, String)>, provenance: MergeProvenance) -> Self {
        Self {
            fields,
            provenance: Some(provenance),
        }
    }

    /// Value of a column, including the provenance columns
    pub fn get(&self, column: &str) -> Option<String> {
        if let Some((_, value)) = self.fields.iter().find(|(name, _)| name == column) {
            return Some(value.clone());
        }

        let provenance = self.provenance?;
        match (column, provenance.method) {
            (SOURCES_MERGED_COLUMN, _) => Some(provenance.sources_merged.to_string()),
            (MERGE_METHOD_COLUMN, MergeMethod::Basic) => Some(BASIC_MERGE_METHOD.to_string()),
            (MERGE_CONFIDENCE_COLUMN, MergeMethod::Assisted(confidence)) => {
                Some(confidence.as_str().to_string())
            }
            _ => None,
        }
    }

    /// Data column value without allocation; empty when absent
    pub fn field(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Column names in output order: data columns, then provenance columns
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.fields.iter().map(|(name, _)| name.clone()).collect();

        if let Some(provenance) = self.provenance {
            columns.push(SOURCES_MERGED_COLUMN.to_string());
            columns.push(
                match provenance.method {
                    MergeMethod::Basic => MERGE_METHOD_COLUMN,
                    MergeMethod::Assisted(_) => MERGE_CONFIDENCE_COLUMN,
                }
                .to_string(),
            );
        }

        columns
    }

    /// Values laid out in the given column order; unknown columns are empty
    pub fn row(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|column| self.get(column).unwrap_or_default())
            .collect()
    }

    /// Merge provenance, `None` for passthrough records
    pub fn provenance(&self) -> Option<MergeProvenance> {
        self.provenance
    }

    /// Whether the record came out of a service-assisted merge
    pub fn is_assisted(&self) -> bool {
        matches!(
            self.provenance,
            Some(MergeProvenance {
                method: MergeMethod::Assisted(_),
                ..
            })
        )
    }
}
