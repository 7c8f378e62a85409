//! Configured column names for the term/definition/url triple

/// Names of the three columns the consolidator understands
///
/// Every other column is carried through untouched on unmerged records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Column holding the term (records with an empty term are discarded)
    pub term: String,

    /// Column holding the definition
    pub definition: String,

    /// Column holding reference URLs
    pub url: String,
}

impl ColumnNames {
    /// Create a column mapping
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            url: url.into(),
        }
    }

    /// Validate that no column name is blank
    pub fn validate(&self) -> Result<(), String> {
        for (label, name) in [
            ("term_column", &self.term),
            ("definition_column", &self.definition),
            ("url_column", &self.url),
        ] {
            if name.trim().is_empty() {
                return Err(format!("{} must not be empty", label));
            }
        }
        Ok(())
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self::new("term", "definition", "url")
    }
}
