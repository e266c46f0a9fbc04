use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::SourceError;
use crate::models::CertificationRecord;

/// Immutable snapshot of the fetched records. Replaced whole, never merged.
#[derive(Debug, Clone)]
pub struct RecordStore {
    snapshot: Arc<[CertificationRecord]>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordStore {
    pub fn new(records: Vec<CertificationRecord>) -> Self {
        Self {
            snapshot: records.into(),
        }
    }

    pub fn records(&self) -> &[CertificationRecord] {
        &self.snapshot
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn replace(&mut self, records: Vec<CertificationRecord>) {
        self.snapshot = records.into();
    }

    /// Keeps the current snapshot when the load failed.
    pub fn apply_fetch(&mut self, result: Result<Vec<CertificationRecord>, SourceError>) -> bool {
        match result {
            Ok(records) => {
                self.replace(records);
                true
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept = self.len(),
                    "record load failed, keeping previous snapshot"
                );
                false
            }
        }
    }

    /// Distinct non-empty countries, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.snapshot
            .iter()
            .map(|record| record.country.as_str())
            .filter(|country| !country.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct certification years, sorted. Undated records are ignored.
    pub fn years(&self) -> Vec<i32> {
        self.snapshot
            .iter()
            .filter_map(CertificationRecord::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;

    fn store() -> RecordStore {
        RecordStore::new(vec![
            sample_record("r1", "A", "Italy", "2024-01-15", "Onshore"),
            sample_record("r2", "B", "", "2022-02-20", "Offshore"),
            sample_record("r3", "A", "France", "bad", "Onshore"),
            sample_record("r4", "A", "Italy", "2024-05-01", "Onshore"),
        ])
    }

    #[test]
    fn facets_are_distinct_and_sorted() {
        let store = store();
        assert_eq!(store.countries(), vec!["France", "Italy"]);
        assert_eq!(store.years(), vec![2022, 2024]);
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut store = store();
        let applied = store.apply_fetch(Err(SourceError::UnexpectedShape("boom".to_string())));
        assert!(!applied);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn successful_load_replaces_snapshot() {
        let mut store = store();
        let applied = store.apply_fetch(Ok(vec![sample_record(
            "r9", "C", "Peru", "2021-03-03", "Offshore",
        )]));
        assert!(applied);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, "r9");
    }

    #[test]
    fn default_store_is_empty() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert!(store.countries().is_empty());
        assert!(store.years().is_empty());
    }
}
