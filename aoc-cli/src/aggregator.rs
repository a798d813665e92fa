//! Re-orders results streamed from parallel workers.
//!
//! Workers finish in any order but output should read year by year, day by
//! day, part by part. The aggregator knows which keys to expect and releases
//! a result only once every smaller expected key has been released.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Ordering key for results, ascending by year, then day, then part
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    /// Keys not yet released
    expected: BTreeSet<ResultKey>,
    /// Results received ahead of their turn
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer `result` and return everything that is now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.expected.first() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.expected.remove(&next);
            ready.push(result);
        }
        ready
    }

    /// Everything still buffered, in order, regardless of gaps
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let pending = std::mem::take(&mut self.pending);
        for key in pending.keys() {
            self.expected.remove(key);
        }
        pending.into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
