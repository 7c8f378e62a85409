//! Termbase Domain Layer
//!
//! Core data model for the knowledge-base consolidator. Like every domain
//! crate in this workspace it carries no third-party runtime dependencies;
//! parsing, HTTP and CSV concerns live in the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **Record**: one parsed CSV row, column name to value, tagged with its source file
//! - **RecordSet**: records in file-read order (order drives clustering and tie-breaks)
//! - **Group**: indices into a RecordSet; all groups of a run partition `[0, N)`
//! - **ConsolidatedRecord**: the single record a group collapses into, plus merge provenance
//!
//! ## Data Flow
//!
//! ```text
//! CSV files → RecordSet → Groups → ConsolidatedRecords → CSV + statistics
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod columns;
pub mod consolidated;
pub mod group;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use columns::ColumnNames;
pub use consolidated::{ConsolidatedRecord, MergeConfidence, MergeMethod, MergeProvenance};
pub use group::{verify_partition, Group};
pub use record::{Record, RecordSet};
