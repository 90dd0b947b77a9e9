//! Shared result collection for an enrichment run.
//!
//! Every worker appends through [`ResultCollection::merge`]. The lock is held
//! for the push only, never across a lookup or an extraction.

use parking_lot::Mutex;

use super::domain::IdentifierRecord;

/// Unordered collection of records, safe to append to from many tasks.
#[derive(Debug, Default)]
pub struct ResultCollection {
    records: Mutex<Vec<IdentifierRecord>>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sized for `capacity` records up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append one record.
    pub fn merge(&self, record: IdentifierRecord) {
        self.records.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<IdentifierRecord> {
        self.records.lock().clone()
    }

    /// Consume the collection once all writers are done.
    pub fn into_records(self) -> Vec<IdentifierRecord> {
        self.records.into_inner()
    }
}
