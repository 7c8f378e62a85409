//! Duplicate groups - index sets into a RecordSet

use crate::record::{Record, RecordSet};

/// A set of record indices judged to describe the same entry
///
/// The first member is the seed that opened the group; remaining members are
/// in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<usize>,
}

impl Group {
    /// Open a group with its seed index
    pub fn seeded(seed: usize) -> Self {
        Self {
            members: vec![seed],
        }
    }

    /// Build a group from explicit indices (first is the seed)
    pub fn from_indices(members: Vec<usize>) -> Self {
        Self { members }
    }

    /// Add a member index
    pub fn push(&mut self, index: usize) {
        self.members.push(index);
    }

    /// Index that opened this group
    pub fn seed(&self) -> usize {
        self.members[0]
    }

    /// Member indices, seed first
    pub fn indices(&self) -> &[usize] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for groups built by the cluster builder
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A group of one record passes through unmerged
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Resolve member indices against the record set
    pub fn records<'a>(&self, records: &'a RecordSet) -> Vec<&'a Record> {
        self.members.iter().map(|&i| &records[i]).collect()
    }
}

/// Check that `groups` partition `[0, len)`
///
/// Every index must appear in exactly one group and no group may be empty.
pub fn verify_partition(groups: &[Group], len: usize) -> Result<(), String> {
    let mut seen = vec![false; len];

    for (g, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(format!("group {} is empty", g));
        }
        for &index in group.indices() {
            if index >= len {
                return Err(format!("group {} references index {} (len {})", g, index, len));
            }
            if seen[index] {
                return Err(format!("index {} appears in more than one group", index));
            }
            seen[index] = true;
        }
    }

    match seen.iter().position(|assigned| !assigned) {
        Some(missing) => Err(format!("index {} is not in any group", missing)),
        None => Ok(()),
    }
}
