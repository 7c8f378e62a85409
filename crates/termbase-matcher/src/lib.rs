//! Termbase Matcher
//!
//! Fuzzy duplicate detection for the consolidator.
//!
//! The Matcher provides:
//! - A normalized edit-distance similarity score in `[0, 1]`
//! - A record-level predicate: two records are similar when either their
//!   terms or their definitions reach the configured threshold
//! - The cluster builder that partitions a [`RecordSet`] into duplicate groups
//!
//! # Examples
//!
//! ```
//! use termbase_domain::{ColumnNames, Record, RecordSet};
//! use termbase_matcher::{ClusterBuilder, MatcherConfig};
//!
//! let records: RecordSet = vec![
//!     Record::new("a.csv", [("term", "HTTP"), ("definition", "Hypertext Transfer Protocol")]),
//!     Record::new("b.csv", [("term", "http"), ("definition", "Web protocol")]),
//!     Record::new("b.csv", [("term", "FTP"), ("definition", "File Transfer Protocol")]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let builder = ClusterBuilder::new(MatcherConfig::default(), ColumnNames::default()).unwrap();
//! let groups = builder.build(&records);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].indices(), &[0, 1]);
//! ```
//!
//! [`RecordSet`]: termbase_domain::RecordSet

#![warn(missing_docs)]

mod cluster;
mod config;
mod error;
mod similarity;

pub use cluster::{ClusterBuilder, RecordMatcher};
pub use config::{ClusterPolicy, MatcherConfig};
pub use error::MatcherError;
pub use similarity::similarity;
