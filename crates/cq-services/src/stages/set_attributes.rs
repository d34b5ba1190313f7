//! Set-attributes service for stages
//!
//! Edits that live outside the state machine: estimated duration (with
//! planned-end recompute), assignee, notes. A duration edit never cascades
//! to other stages' planned dates.

use chrono::Duration;
use cq_contracts::base::Contract;
use cq_contracts::stages::UpdateStageContract;
use cq_core::traits::Id;
use cq_journals::{CauseType, JournalLog, JournableType};
use cq_models::qualification_object::QualificationObject;
use cq_workflow::progress::refresh_aggregates;

use super::StageParams;
use crate::result::ServiceResult;

pub struct SetStageAttributesService<'a> {
    journal: Option<&'a mut JournalLog>,
}

impl<'a> SetStageAttributesService<'a> {
    pub fn new() -> Self {
        Self { journal: None }
    }

    pub fn with_journal(mut self, journal: &'a mut JournalLog) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Execute the update
    pub fn call(
        self,
        object: &mut QualificationObject,
        stage_id: Id,
        params: &StageParams,
    ) -> ServiceResult<QualificationObject> {
        let Some(index) = object.stages.iter().position(|s| s.id == stage_id) else {
            return ServiceResult::failure_with_base_error(format!(
                "stage {} not found on object {}",
                stage_id, object.id
            ));
        };

        let mut contract = UpdateStageContract::new();
        if let Some(days) = params.estimated_duration {
            contract = contract.with_duration_change(days);
        }
        if let Err(errors) = contract.validate(&object.stages[index]) {
            return ServiceResult::failure(errors);
        }

        let stage = &mut object.stages[index];

        if let Some(days) = params.estimated_duration {
            stage.estimated_duration = days;
            if let Some(planned_start) = stage.planned_start_date {
                stage.planned_end_date = Some(planned_start + Duration::days(days));
            }
        }

        if params.clear_assignee {
            stage.assignee = None;
        } else if let Some(ref assignee) = params.assignee {
            stage.assignee = Some(assignee.clone());
        }

        if let Some(ref notes) = params.notes {
            stage.notes = Some(notes.clone());
        }

        stage.touch();
        let stage_name = stage.name.clone();
        refresh_aggregates(object);

        tracing::debug!("stage {} attributes updated on object {}", stage_name, object.id);

        if let Some(journal) = self.journal {
            journal.record(
                JournableType::QualificationStage,
                stage_id,
                CauseType::UserAction,
                format!("stage \"{}\" attributes updated", stage_name),
            );
        }

        ServiceResult::success(object.clone())
    }
}

impl<'a> Default for SetStageAttributesService<'a> {
    fn default() -> Self {
        Self::new()
    }
}
