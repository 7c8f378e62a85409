//! Prompt construction for service-assisted merges

use termbase_domain::consolidated::{MERGE_CONFIDENCE_COLUMN, SOURCES_MERGED_COLUMN};
use termbase_domain::{ColumnNames, Record};

/// Builds the merge request for one duplicate group
pub struct MergePromptBuilder<'a> {
    columns: &'a ColumnNames,
    records: &'a [&'a Record],
}

impl<'a> MergePromptBuilder<'a> {
    /// Create a prompt builder for the given group members
    pub fn new(columns: &'a ColumnNames, records: &'a [&'a Record]) -> Self {
        Self { columns, records }
    }

    /// Build the complete merge prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ROLE_PREAMBLE);
        prompt.push_str(&format!(
            " Below are {} similar entries that need to be merged into one optimal record.\n\n",
            self.records.len()
        ));

        prompt.push_str("RECORDS TO MERGE:\n");
        for (i, record) in self.records.iter().enumerate() {
            prompt.push_str(&format!("Entry {}:\n", i + 1));
            prompt.push_str(&format!(
                "Term: {}\n",
                record.get(&self.columns.term).unwrap_or("N/A")
            ));
            prompt.push_str(&format!(
                "Definition: {}\n",
                record.get(&self.columns.definition).unwrap_or("N/A")
            ));
            let url = record.value(&self.columns.url);
            if !url.is_empty() {
                prompt.push_str(&format!("URL: {}\n", url));
            }
            let source = match record.source_file() {
                "" => "Unknown",
                source => source,
            };
            prompt.push_str(&format!("Source: {}\n\n", source));
        }

        prompt.push_str(MERGE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&self.response_template());

        prompt
    }

    /// The exact JSON object the backend is asked to return
    fn response_template(&self) -> String {
        format!(
            "{{\n  \"{}\": \"merged term here\",\n  \"{}\": \"merged definition here\",\n  \"{}\": \"url1; url2; url3\",\n  \"{}\": {},\n  \"{}\": \"high|medium|low\"\n}}",
            self.columns.term,
            self.columns.definition,
            self.columns.url,
            SOURCES_MERGED_COLUMN,
            self.records.len(),
            MERGE_CONFIDENCE_COLUMN,
        )
    }
}

const ROLE_PREAMBLE: &str = "You are an expert at consolidating knowledge base entries.";

const MERGE_INSTRUCTIONS: &str = r#"INSTRUCTIONS:
1. Create the best possible merged entry
2. Choose the most accurate and clear term name
3. Combine definitions to create one comprehensive, clear definition
4. Include all relevant URLs, separated by semicolons
5. Respond ONLY with valid JSON in this exact format:"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, definition: &str, url: &str, source: &str) -> Record {
        Record::new(
            source,
            [("term", term), ("definition", definition), ("url", url)],
        )
    }

    #[test]
    fn test_prompt_enumerates_entries() {
        let a = record("HTTP", "Hypertext Transfer Protocol", "https://a.example", "a.csv");
        let b = record("http", "Hypertext transfer protocol", "", "b.csv");
        let members = vec![&a, &b];
        let columns = ColumnNames::default();

        let prompt = MergePromptBuilder::new(&columns, &members).build();

        assert!(prompt.contains("Below are 2 similar entries"));
        assert!(prompt.contains("Entry 1:\nTerm: HTTP\nDefinition: Hypertext Transfer Protocol\nURL: https://a.example\nSource: a.csv\n"));
        assert!(prompt.contains("Entry 2:\nTerm: http\nDefinition: Hypertext transfer protocol\nSource: b.csv\n"));
    }

    #[test]
    fn test_prompt_omits_empty_url() {
        let a = record("DNS", "Domain Name System", "", "a.csv");
        let members = vec![&a];
        let columns = ColumnNames::default();

        let prompt = MergePromptBuilder::new(&columns, &members).build();
        assert!(!prompt.contains("URL: "));
    }

    #[test]
    fn test_prompt_marks_missing_values() {
        let a = Record::new("", [("term", "TLS")]);
        let members = vec![&a];
        let columns = ColumnNames::default();

        let prompt = MergePromptBuilder::new(&columns, &members).build();
        assert!(prompt.contains("Definition: N/A\n"));
        assert!(prompt.contains("Source: Unknown\n"));
    }

    #[test]
    fn test_template_uses_configured_columns() {
        let a = record("x", "y", "", "a.csv");
        let b = record("x", "y", "", "b.csv");
        let c = record("x", "y", "", "c.csv");
        let members = vec![&a, &b, &c];
        let columns = ColumnNames::new("name", "description", "link");

        let prompt = MergePromptBuilder::new(&columns, &members).build();

        assert!(prompt.contains("\"name\": \"merged term here\""));
        assert!(prompt.contains("\"description\": \"merged definition here\""));
        assert!(prompt.contains("\"link\": \"url1; url2; url3\""));
        assert!(prompt.contains("\"sources_merged\": 3,"));
        assert!(prompt.contains("\"merge_confidence\": \"high|medium|low\"\n}"));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
    }
}
