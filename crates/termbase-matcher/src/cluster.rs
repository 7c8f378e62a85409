//! Duplicate group construction

use crate::config::{ClusterPolicy, MatcherConfig};
use crate::similarity::similarity;
use crate::MatcherError;
use std::collections::VecDeque;
use termbase_domain::{verify_partition, ColumnNames, Group, Record, RecordSet};
use tracing::{debug, info};

/// Seeds between progress lines
const PROGRESS_INTERVAL: usize = 100;

/// Record-level similarity predicate
///
/// Two records are similar when the better of their term similarity and
/// their definition similarity reaches the threshold. Either field alone can
/// trigger a match.
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    threshold: f64,
    columns: ColumnNames,
}

impl RecordMatcher {
    /// Create a matcher, rejecting thresholds outside `[0, 1]`
    pub fn new(threshold: f64, columns: ColumnNames) -> Result<Self, MatcherError> {
        MatcherConfig::with_threshold(threshold).validate()?;
        Ok(Self { threshold, columns })
    }

    /// Best of term and definition similarity
    pub fn score(&self, a: &Record, b: &Record) -> f64 {
        let term = similarity(a.value(&self.columns.term), b.value(&self.columns.term));
        let definition = similarity(
            a.value(&self.columns.definition),
            b.value(&self.columns.definition),
        );
        term.max(definition)
    }

    /// Whether two records belong in the same group
    pub fn are_similar(&self, a: &Record, b: &Record) -> bool {
        self.score(a, b) >= self.threshold
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Partitions a record set into duplicate groups
///
/// The default [`ClusterPolicy::Seed`] scan is greedy and single-pass: an
/// unassigned index seeds a group and claims every later unassigned index
/// similar to the seed. Membership is checked against the seed only, so
/// groups are not transitively closed. Comparisons are O(N²).
pub struct ClusterBuilder {
    matcher: RecordMatcher,
    policy: ClusterPolicy,
}

impl ClusterBuilder {
    /// Create a builder from configuration
    pub fn new(config: MatcherConfig, columns: ColumnNames) -> Result<Self, MatcherError> {
        Ok(Self {
            matcher: RecordMatcher::new(config.similarity_threshold, columns)?,
            policy: config.policy,
        })
    }

    /// The record predicate in use
    pub fn matcher(&self) -> &RecordMatcher {
        &self.matcher
    }

    /// Build groups in seed-discovery order
    ///
    /// The result always partitions `[0, records.len())`.
    pub fn build(&self, records: &RecordSet) -> Vec<Group> {
        let total = records.len();
        let mut assigned = vec![false; total];
        let mut groups = Vec::new();

        for seed in 0..total {
            if assigned[seed] {
                continue;
            }
            assigned[seed] = true;

            let group = match self.policy {
                ClusterPolicy::Seed => self.grow_from_seed(records, seed, &mut assigned),
                ClusterPolicy::Transitive => self.grow_transitively(records, seed, &mut assigned),
            };
            groups.push(group);

            if seed % PROGRESS_INTERVAL == 0 {
                let progress = seed as f64 / total as f64 * 100.0;
                debug!("Clustering progress: {:.1}% ({}/{})", progress, seed, total);
            }
        }

        let duplicate_groups = groups.iter().filter(|g| !g.is_singleton()).count();
        info!(
            "Built {} groups from {} records ({} with duplicates)",
            groups.len(),
            total,
            duplicate_groups
        );

        debug_assert_eq!(verify_partition(&groups, total), Ok(()));
        groups
    }

    fn grow_from_seed(&self, records: &RecordSet, seed: usize, assigned: &mut [bool]) -> Group {
        let mut group = Group::seeded(seed);

        for candidate in (seed + 1)..records.len() {
            if assigned[candidate] {
                continue;
            }
            if self.matcher.are_similar(&records[seed], &records[candidate]) {
                group.push(candidate);
                assigned[candidate] = true;
            }
        }

        group
    }

    fn grow_transitively(
        &self,
        records: &RecordSet,
        seed: usize,
        assigned: &mut [bool],
    ) -> Group {
        let mut group = Group::seeded(seed);
        let mut frontier = VecDeque::from([seed]);

        while let Some(member) = frontier.pop_front() {
            for candidate in (seed + 1)..records.len() {
                if assigned[candidate] {
                    continue;
                }
                if self.matcher.are_similar(&records[member], &records[candidate]) {
                    group.push(candidate);
                    assigned[candidate] = true;
                    frontier.push_back(candidate);
                }
            }
        }

        group
    }
}
