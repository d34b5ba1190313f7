//! Journal model

use chrono::{DateTime, Utc};
use cq_core::traits::Id;
use serde::{Deserialize, Serialize};

/// What kind of entity a journal row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournableType {
    Project,
    QualificationObject,
    QualificationStage,
}

impl JournableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::QualificationObject => "QualificationObject",
            Self::QualificationStage => "QualificationStage",
        }
    }
}

/// Per-entity journal version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JournalVersion(pub i32);

impl JournalVersion {
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// What caused a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CauseType {
    /// Manual operator action
    #[default]
    UserAction,
    /// Stage workflow side effect (aggregate refresh, instantiation)
    Workflow,
    /// System-initiated change
    SystemChange,
}

/// An activity-log row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub journable_type: JournableType,
    pub journable_id: Id,
    pub version: JournalVersion,
    /// Operator from the external user directory, when known
    pub actor_id: Option<Id>,
    pub cause: CauseType,
    /// Short description of what happened (e.g. "stage started")
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Journal {
    pub fn new(journable_type: JournableType, journable_id: Id, version: JournalVersion) -> Self {
        Self {
            journable_type,
            journable_id,
            version,
            actor_id: None,
            cause: CauseType::default(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.version.0 == 1
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_ref().map_or(false, |n| !n.trim().is_empty())
    }
}

/// Builder for journal entries
pub struct JournalBuilder {
    journal: Journal,
}

impl JournalBuilder {
    pub fn object(id: Id, version: JournalVersion) -> Self {
        Self {
            journal: Journal::new(JournableType::QualificationObject, id, version),
        }
    }

    pub fn stage(id: Id, version: JournalVersion) -> Self {
        Self {
            journal: Journal::new(JournableType::QualificationStage, id, version),
        }
    }

    pub fn project(id: Id, version: JournalVersion) -> Self {
        Self {
            journal: Journal::new(JournableType::Project, id, version),
        }
    }

    pub fn actor(mut self, actor_id: Id) -> Self {
        self.journal.actor_id = Some(actor_id);
        self
    }

    pub fn cause(mut self, cause: CauseType) -> Self {
        self.journal.cause = cause;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.journal.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> Journal {
        self.journal
    }
}
