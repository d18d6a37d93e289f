use crate::assessment::AssessmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;

pub const HISTORY_CAPACITY: usize = 10;
pub const HISTORY_VERSION: u32 = 1;

/// Completed assessments for one session, newest first.
///
/// Holds at most [`HISTORY_CAPACITY`] records; pushing onto a full history
/// evicts the oldest one. Records are only ever appended or evicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub version: u32,
    #[serde(default)]
    records: VecDeque<AssessmentRecord>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            records: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Add a record as the newest entry. Returns the evicted record, if any.
    pub fn push(&mut self, record: AssessmentRecord) -> Option<AssessmentRecord> {
        self.records.push_front(record);
        if self.records.len() > HISTORY_CAPACITY {
            let evicted = self.records.pop_back();
            if let Some(ref old) = evicted {
                info!(name = %old.display_name(), "evicted oldest assessment from history");
            }
            evicted
        } else {
            None
        }
    }

    /// Record at `index`, 0 being the newest
    pub fn get(&self, index: usize) -> Option<&AssessmentRecord> {
        self.records.get(index)
    }

    pub fn latest(&self) -> Option<&AssessmentRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Drop the oldest records beyond capacity. Returns how many were dropped.
    pub(crate) fn truncate_to_capacity(&mut self) -> usize {
        let excess = self.records.len().saturating_sub(HISTORY_CAPACITY);
        self.records.truncate(HISTORY_CAPACITY);
        excess
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a AssessmentRecord;
    type IntoIter = std::collections::vec_deque::Iter<'a, AssessmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
