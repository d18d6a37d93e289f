use super::ring::History;
use crate::assessment::AssessmentRecord;
use crate::scoring::{aggregate, DashboardStats};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A session's history shared between threads.
///
/// One writer appends at a time; readers see whatever prefix of the
/// history was committed when they took the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<RwLock<History>>,
}

impl SharedHistory {
    pub fn new(history: History) -> Self {
        Self {
            inner: Arc::new(RwLock::new(history)),
        }
    }

    // A panicked writer cannot leave a half-pushed record behind, so a
    // poisoned lock still guards a valid history.
    fn read(&self) -> RwLockReadGuard<'_, History> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, History> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a completed assessment. Returns the evicted record, if any.
    pub fn append(&self, record: AssessmentRecord) -> Option<AssessmentRecord> {
        self.write().push(record)
    }

    /// Copy of the current history
    pub fn snapshot(&self) -> History {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Dashboard averages over the current history
    pub fn stats(&self) -> DashboardStats {
        aggregate(&*self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentInput, InputParameters, MetalType, ProductionRoute};
    use crate::history::HISTORY_CAPACITY;
    use std::collections::BTreeMap;
    use std::thread;

    fn record(carbon: f64) -> AssessmentRecord {
        let input = AssessmentInput {
            name: None,
            metal_type: MetalType::Copper,
            production_route: ProductionRoute::Primary,
            quantity: 1.0,
            parameters: InputParameters::default(),
        };
        let mut results = BTreeMap::new();
        results.insert("carbon_footprint".to_string(), carbon);
        AssessmentRecord::from_input(input, results)
    }

    #[test]
    fn test_append_and_stats() {
        let shared = SharedHistory::default();
        assert!(shared.is_empty());
        shared.append(record(10.0));
        shared.append(record(30.0));
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.stats().average_carbon_footprint, 20.0);
    }

    #[test]
    fn test_concurrent_appends_respect_capacity() {
        let shared = SharedHistory::default();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let writer = shared.clone();
                thread::spawn(move || {
                    for i in 0..5 {
                        writer.append(record((t * 10 + i) as f64));
                    }
                })
            })
            .collect();

        let reader = shared.clone();
        let observed = thread::spawn(move || reader.snapshot().len());

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(observed.join().unwrap() <= HISTORY_CAPACITY);
        assert_eq!(shared.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedHistory::default();
        shared.append(record(1.0));
        let snapshot = shared.snapshot();
        shared.append(record(2.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(shared.len(), 2);
    }
}
