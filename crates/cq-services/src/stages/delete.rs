//! Delete-stage service
//!
//! Removes exactly one stage. Required stages are protected by contract.

use cq_contracts::base::Contract;
use cq_contracts::stages::DeleteStageContract;
use cq_core::traits::Id;
use cq_journals::{CauseType, JournalLog, JournableType};
use cq_models::qualification_object::QualificationObject;
use cq_workflow::progress::refresh_aggregates;

use crate::result::ServiceResult;

pub struct DeleteStageService<'a> {
    journal: Option<&'a mut JournalLog>,
}

impl<'a> DeleteStageService<'a> {
    pub fn new() -> Self {
        Self { journal: None }
    }

    pub fn with_journal(mut self, journal: &'a mut JournalLog) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Execute the delete operation
    pub fn call(
        self,
        object: &mut QualificationObject,
        stage_id: Id,
    ) -> ServiceResult<QualificationObject> {
        let Some(index) = object.stages.iter().position(|s| s.id == stage_id) else {
            return ServiceResult::failure_with_base_error(format!(
                "stage {} not found on object {}",
                stage_id, object.id
            ));
        };

        if let Err(errors) = DeleteStageContract::new().validate(&object.stages[index]) {
            return ServiceResult::failure(errors);
        }

        let removed = object.stages.remove(index);
        refresh_aggregates(object);

        tracing::debug!("stage {} removed from object {}", removed.name, object.id);

        if let Some(journal) = self.journal {
            journal.record(
                JournableType::QualificationObject,
                object.id,
                CauseType::UserAction,
                format!("stage \"{}\" deleted", removed.name),
            );
        }

        ServiceResult::success(object.clone())
    }
}

impl<'a> Default for DeleteStageService<'a> {
    fn default() -> Self {
        Self::new()
    }
}
