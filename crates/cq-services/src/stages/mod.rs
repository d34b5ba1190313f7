//! Stage services

mod add;
mod delete;
mod set_attributes;
mod transition;

pub use add::AddStageService;
pub use delete::DeleteStageService;
pub use set_attributes::SetStageAttributesService;
pub use transition::TransitionStageService;

use cq_core::types::Assignee;

/// Editable stage attributes outside the state machine
#[derive(Debug, Clone, Default)]
pub struct StageParams {
    pub estimated_duration: Option<i64>,
    pub assignee: Option<Assignee>,
    pub clear_assignee: bool,
    pub notes: Option<String>,
}

impl StageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, days: i64) -> Self {
        self.estimated_duration = Some(days);
        self
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn without_assignee(mut self) -> Self {
        self.clear_assignee = true;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
