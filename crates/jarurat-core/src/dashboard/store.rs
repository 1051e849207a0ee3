//! Ordered, id-unique patient store.

use std::collections::HashSet;

use tracing::warn;

use crate::models::PatientRecord;

/// Canonical ordered collection of patient records.
///
/// Ids are unique. The store never shrinks: it is replaced wholesale by a
/// load and grows at the front on each creation.
#[derive(Debug, Default)]
pub struct PatientStore {
    records: Vec<PatientRecord>,
    ids: HashSet<u64>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, id: u64) -> Option<&PatientRecord> {
        if !self.contains(id) {
            return None;
        }
        self.records.iter().find(|p| p.id == id)
    }

    /// Replace the contents, keeping source order.
    ///
    /// A repeated id keeps its first occurrence. Returns the number of
    /// records dropped.
    pub fn replace_all(&mut self, records: Vec<PatientRecord>) -> usize {
        self.records.clear();
        self.ids.clear();

        let mut dropped = 0;
        for record in records {
            if self.ids.insert(record.id) {
                self.records.push(record);
            } else {
                warn!(id = record.id, "dropping source record with duplicate id");
                dropped += 1;
            }
        }
        dropped
    }

    /// Insert at the front. The caller guarantees the id is unused.
    pub fn prepend(&mut self, record: PatientRecord) {
        debug_assert!(!self.contains(record.id));
        self.ids.insert(record.id);
        self.records.insert(0, record);
    }
}

/// Issues ids for locally created records.
///
/// Ids are milliseconds since the Unix epoch, bumped so that each one is
/// strictly greater than the last one issued and not already taken.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id that `store` does not contain.
    pub fn next_id(&mut self, store: &PatientStore) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_after(now, store)
    }

    fn next_after(&mut self, now: u64, store: &PatientStore) -> u64 {
        let mut id = now.max(self.last.saturating_add(1));
        while store.contains(id) {
            id = id.saturating_add(1);
        }
        self.last = id;
        id
    }
}
