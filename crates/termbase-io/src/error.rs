//! Error types for CSV input and output

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input or writing output
#[derive(Error, Debug)]
pub enum IoError {
    /// The input directory holds no CSV files
    #[error("No CSV files found in {}", directory.display())]
    NoInput {
        /// Directory that was searched
        directory: PathBuf,
        /// Whether the directory had to be created first
        created: bool,
    },

    /// The output cannot be written
    #[error("Output error: {0}")]
    Output(String),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
