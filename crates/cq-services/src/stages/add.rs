//! Add-stage service
//!
//! Adds a stage of an unused catalog type. The new stage's planned window
//! is appended after the planned end of the currently-last required stage,
//! or starts today when the object has no required stages yet.

use chrono::{NaiveDate, Utc};
use cq_contracts::base::Contract;
use cq_contracts::stages::AddStageContract;
use cq_journals::{CauseType, JournalLog, JournableType};
use cq_models::qualification_object::QualificationObject;
use cq_models::stage::{QualificationStage, StageType};
use cq_workflow::catalog;
use cq_workflow::progress::refresh_aggregates;
use cq_workflow::schedule::appended_stage_window;

use crate::result::ServiceResult;

pub struct AddStageService<'a> {
    journal: Option<&'a mut JournalLog>,
    today: Option<NaiveDate>,
}

impl<'a> AddStageService<'a> {
    pub fn new() -> Self {
        Self {
            journal: None,
            today: None,
        }
    }

    pub fn with_journal(mut self, journal: &'a mut JournalLog) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Pin "today" for the fallback planned window (defaults to today).
    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Execute the add operation
    pub fn call(
        self,
        object: &mut QualificationObject,
        stage_type: StageType,
    ) -> ServiceResult<QualificationObject> {
        if let Err(errors) = AddStageContract::new(object).validate(&stage_type) {
            return ServiceResult::failure(errors);
        }

        let Some(template) = catalog::template_for(stage_type) else {
            return ServiceResult::failure_with_error("type", "is not part of the stage catalog");
        };

        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let window = appended_stage_window(&object.stages, template.estimated_duration, today);
        let stage = QualificationStage::from_template(object.id, template, window);
        let stage_name = stage.name.clone();

        object.stages.push(stage);
        refresh_aggregates(object);

        tracing::debug!("stage {} added to object {}", stage_name, object.id);

        if let Some(journal) = self.journal {
            journal.record(
                JournableType::QualificationObject,
                object.id,
                CauseType::UserAction,
                format!("stage \"{}\" added", stage_name),
            );
        }

        ServiceResult::success(object.clone())
    }
}

impl<'a> Default for AddStageService<'a> {
    fn default() -> Self {
        Self::new()
    }
}
