//! Output Writer
//!
//! Sorts consolidated records by term, ignoring case, and writes them as CSV
//! with the header taken from the first record after sorting.

use crate::error::IoError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use termbase_domain::ConsolidatedRecord;
use tracing::info;

/// Writes the consolidated knowledge base
#[derive(Debug, Clone)]
pub struct OutputWriter {
    term_column: String,
}

impl OutputWriter {
    /// Create a writer that sorts on `term_column`
    pub fn new(term_column: impl Into<String>) -> Self {
        Self {
            term_column: term_column.into(),
        }
    }

    /// Sort ascending by term, case-insensitively; ties keep their order
    pub fn sort(&self, records: &mut [ConsolidatedRecord]) {
        records.sort_by_cached_key(|record| record.field(&self.term_column).to_lowercase());
    }

    /// Sort `records` and write them to `path`
    ///
    /// Returns the number of data rows written.
    pub fn write(&self, records: &mut [ConsolidatedRecord], path: &Path) -> Result<usize, IoError> {
        if records.is_empty() {
            return Err(IoError::Output("No records to write".to_string()));
        }

        self.sort(records);

        let file = File::create(path).map_err(|e| {
            IoError::Output(format!("Cannot write to output file {}: {}", path.display(), e))
        })?;
        let written = self.write_to(records, file)?;

        info!("Wrote {} records to {}", written, path.display());
        Ok(written)
    }

    /// Write records in their current order to any writer
    pub fn write_to<W: Write>(&self, records: &[ConsolidatedRecord], out: W) -> Result<usize, IoError> {
        let first = records
            .first()
            .ok_or_else(|| IoError::Output("No records to write".to_string()))?;
        let columns = first.columns();

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(record.row(&columns))?;
        }
        writer.flush()?;

        Ok(records.len())
    }
}
