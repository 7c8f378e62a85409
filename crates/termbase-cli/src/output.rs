//! Output formatting for the CLI.

use crate::error::Result;
use crate::pipeline::RunOutcome;
use colored::*;
use std::fs;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format the run statistics as a table.
    ///
    /// Backend counters are shown only when the run was service-assisted.
    pub fn format_report(&self, outcome: &RunOutcome) -> String {
        let stats = &outcome.stats;

        let mut rows = vec![
            ("Records read", stats.records_read.to_string()),
            ("Duplicate pairs", stats.duplicate_pairs.to_string()),
            ("Near-duplicate groups", stats.near_duplicate_groups.to_string()),
        ];
        if outcome.service_assisted {
            rows.push(("AI-merged records", stats.ai_merged.to_string()));
            rows.push(("Fallback merges", stats.fallback_merges.to_string()));
            rows.push(("Skipped (budget)", stats.skipped_groups.to_string()));
        }
        rows.push(("Final unique records", stats.final_unique.to_string()));
        rows.push(("Size reduction", format!("{:.1}%", stats.size_reduction())));
        if outcome.service_assisted {
            rows.push(("API calls", stats.api_calls.to_string()));
            rows.push(("Estimated cost", format!("${:.4}", stats.estimated_cost)));
        }

        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (label, value) in &rows {
            builder.push_record([label.to_string(), value.clone()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the warnings raised during the run, one per line.
    pub fn format_warnings(&self, outcome: &RunOutcome) -> Option<String> {
        if outcome.warnings.is_empty() {
            return None;
        }

        let lines: Vec<String> = outcome
            .warnings
            .iter()
            .map(|warning| self.warning(warning))
            .collect();
        Some(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Write the run outcome as pretty-printed JSON.
pub fn write_json_report(outcome: &RunOutcome, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use termbase_merger::RunStatistics;

    fn outcome(service_assisted: bool) -> RunOutcome {
        RunOutcome {
            stats: RunStatistics {
                records_read: 4,
                duplicate_pairs: 1,
                final_unique: 3,
                api_calls: 1,
                estimated_cost: 0.0123,
                ..RunStatistics::default()
            },
            warnings: vec!["AI merge failed for group 0, using basic merge: timeout".to_string()],
            output_file: PathBuf::from("out.csv"),
            service_assisted,
        }
    }

    #[test]
    fn test_report_table() {
        let formatter = Formatter::new(false);
        let output = formatter.format_report(&outcome(true));
        assert!(output.contains("Metric"));
        assert!(output.contains("Records read"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("$0.0123"));
    }

    #[test]
    fn test_rule_based_report_hides_backend_rows() {
        let formatter = Formatter::new(false);
        let output = formatter.format_report(&outcome(false));
        assert!(output.contains("Final unique records"));
        assert!(!output.contains("API calls"));
        assert!(!output.contains("Estimated cost"));
    }

    #[test]
    fn test_warnings() {
        let formatter = Formatter::new(false);
        let warnings = formatter.format_warnings(&outcome(true)).unwrap();
        assert!(warnings.starts_with("⚠ AI merge failed"));

        let mut quiet = outcome(true);
        quiet.warnings.clear();
        assert!(formatter.format_warnings(&quiet).is_none());
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        write_json_report(&outcome(true), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["stats"]["records_read"], 4);
        assert_eq!(value["stats"]["final_unique"], 3);
        assert_eq!(value["service_assisted"], true);
        assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
    }
}
