//! Termbase CSV Input and Output
//!
//! Reads the input extracts into a [`RecordSet`](termbase_domain::RecordSet)
//! and writes the consolidated knowledge base back out.
//!
//! # Input
//!
//! - Every file with a `.csv` extension (any case) directly under the input
//!   directory, in sorted path order
//! - First row is the header; names are trimmed
//! - Rows whose field count differs from the header are skipped
//! - Rows with an empty term are skipped
//!
//! # Output
//!
//! Records sorted by term ignoring case (stable), header taken from the
//! first record.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use termbase_domain::ColumnNames;
//! use termbase_io::Ingestor;
//!
//! let ingestor = Ingestor::new(ColumnNames::default());
//! let records = ingestor.ingest_directory(Path::new("./csv_files")).unwrap();
//! println!("Loaded {} records", records.len());
//! ```

#![warn(missing_docs)]

mod error;
pub mod ingest;
pub mod writer;

pub use error::IoError;
pub use ingest::{csv_files, FileSummary, Ingestor};
pub use writer::OutputWriter;
