//! In-memory journal log
//!
//! Holds the activity rows produced during a unit of work. Persisting the
//! rows is the external data layer's concern; the log only guarantees
//! monotonically increasing versions per entity.

use std::collections::HashMap;

use cq_core::traits::Id;

use crate::journal::{CauseType, Journal, JournalVersion, JournableType};

#[derive(Debug, Default)]
pub struct JournalLog {
    entries: Vec<Journal>,
    versions: HashMap<Id, JournalVersion>,
}

impl JournalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next version for an entity, advancing the counter.
    fn next_version(&mut self, journable_id: Id) -> JournalVersion {
        let version = self
            .versions
            .get(&journable_id)
            .map(JournalVersion::next)
            .unwrap_or_else(JournalVersion::initial);
        self.versions.insert(journable_id, version);
        version
    }

    /// Record one activity row for an entity.
    pub fn record(
        &mut self,
        journable_type: JournableType,
        journable_id: Id,
        cause: CauseType,
        notes: impl Into<String>,
    ) -> &Journal {
        let version = self.next_version(journable_id);
        let mut journal = Journal::new(journable_type, journable_id, version);
        journal.cause = cause;
        journal.notes = Some(notes.into());

        self.entries.push(journal);
        self.entries.last().expect("entry just pushed")
    }

    pub fn entries(&self) -> &[Journal] {
        &self.entries
    }

    pub fn entries_for(&self, journable_id: Id) -> impl Iterator<Item = &Journal> {
        self.entries
            .iter()
            .filter(move |j| j.journable_id == journable_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
