//! Record Ingestor
//!
//! Reads every `.csv` file of a directory into one [`RecordSet`], in sorted
//! path order and row order within each file.

use crate::error::IoError;
use std::fs;
use std::path::{Path, PathBuf};
use termbase_domain::{ColumnNames, Record, RecordSet};
use tracing::{debug, info, warn};

/// Reads CSV files into records
#[derive(Debug, Clone)]
pub struct Ingestor {
    columns: ColumnNames,
}

/// Outcome of reading one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Rows accepted as records
    pub accepted: usize,
    /// Rows with the wrong field count or a CSV syntax error
    pub malformed: usize,
    /// Rows whose term was empty
    pub empty_term: usize,
}

impl Ingestor {
    /// Create an ingestor for the configured columns
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    /// Read every CSV file under `directory`
    ///
    /// A missing directory is created, after which the call still fails
    /// with [`IoError::NoInput`].
    pub fn ingest_directory(&self, directory: &Path) -> Result<RecordSet, IoError> {
        if !directory.exists() {
            fs::create_dir_all(directory)?;
            warn!(
                "Created input directory {}; add CSV files and run again",
                directory.display()
            );
            return Err(IoError::NoInput {
                directory: directory.to_path_buf(),
                created: true,
            });
        }

        let files = csv_files(directory)?;
        if files.is_empty() {
            return Err(IoError::NoInput {
                directory: directory.to_path_buf(),
                created: false,
            });
        }

        info!("Found {} CSV files in {}", files.len(), directory.display());

        let mut records = RecordSet::new();
        for path in &files {
            match self.ingest_file(path, &mut records) {
                Ok(summary) => info!(
                    "Loaded {} records from {} ({} malformed, {} without term)",
                    summary.accepted,
                    display_name(path),
                    summary.malformed,
                    summary.empty_term
                ),
                Err(e) => warn!("Skipping {}: {}", display_name(path), e),
            }
        }

        info!("Total records loaded: {}", records.len());
        Ok(records)
    }

    /// Append the records of one file to `records`
    ///
    /// Fails only if the file cannot be opened or has no readable header row.
    pub fn ingest_file(&self, path: &Path, records: &mut RecordSet) -> Result<FileSummary, IoError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = reader.records();
        let header = match rows.next() {
            Some(row) => row?,
            None => return Err(empty_file(path)),
        };

        let headers: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = if i == 0 { name.trim_start_matches('\u{feff}') } else { name };
                name.trim().to_string()
            })
            .collect();

        let source = display_name(path);
        let mut summary = FileSummary::default();

        for (line, row) in rows.enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    debug!("{} row {}: {}", source, line + 2, e);
                    summary.malformed += 1;
                    continue;
                }
            };

            if row.len() != headers.len() {
                debug!(
                    "{} row {}: expected {} fields, found {}",
                    source,
                    line + 2,
                    headers.len(),
                    row.len()
                );
                summary.malformed += 1;
                continue;
            }

            let record = Record::new(
                source.clone(),
                headers.iter().map(String::as_str).zip(row.iter()),
            );

            if record.value(&self.columns.term).trim().is_empty() {
                summary.empty_term += 1;
                continue;
            }

            records.push(record);
            summary.accepted += 1;
        }

        Ok(summary)
    }
}

/// CSV files directly under `directory`, sorted by path
///
/// The extension match ignores case.
pub fn csv_files(directory: &Path) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn empty_file(path: &Path) -> IoError {
    IoError::Io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("{} has no header row", path.display()),
    ))
}
