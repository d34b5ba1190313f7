//! Transition service for stages
//!
//! Applies one state-machine event to one stage of an object, then
//! refreshes the object aggregates. The whole object is the unit of
//! atomicity: validation runs before any mutation, so on failure the
//! object is untouched and there is nothing to persist.

use chrono::{DateTime, Utc};
use cq_contracts::base::Contract;
use cq_contracts::stages::TransitionStageContract;
use cq_core::traits::Id;
use cq_journals::{CauseType, JournalLog, JournableType};
use cq_models::qualification_object::QualificationObject;
use cq_workflow::progress::refresh_aggregates;
use cq_workflow::transition::{apply_event, StageEvent};

use crate::result::ServiceResult;

pub struct TransitionStageService<'a> {
    journal: Option<&'a mut JournalLog>,
    now: Option<DateTime<Utc>>,
}

impl<'a> TransitionStageService<'a> {
    pub fn new() -> Self {
        Self {
            journal: None,
            now: None,
        }
    }

    /// Record an activity row for the transition in the given log.
    pub fn with_journal(mut self, journal: &'a mut JournalLog) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Pin the transition instant (defaults to now).
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Execute the transition
    pub fn call(
        self,
        object: &mut QualificationObject,
        stage_id: Id,
        event: StageEvent,
    ) -> ServiceResult<QualificationObject> {
        let Some(index) = object.stages.iter().position(|s| s.id == stage_id) else {
            return ServiceResult::failure_with_base_error(format!(
                "stage {} not found on object {}",
                stage_id, object.id
            ));
        };

        let validation =
            TransitionStageContract::new(&object.stages, event).validate(&object.stages[index]);
        if let Err(errors) = validation {
            return ServiceResult::failure(errors);
        }

        let now = self.now.unwrap_or_else(Utc::now);
        apply_event(&mut object.stages[index], event, now);
        refresh_aggregates(object);

        let stage = &object.stages[index];
        tracing::debug!(
            "stage {} ({}) {}: object now {} at {}%",
            stage.name,
            stage.stage_type.as_str(),
            event.as_str(),
            object.overall_status.as_str(),
            object.overall_progress
        );

        if let Some(journal) = self.journal {
            journal.record(
                JournableType::QualificationStage,
                stage_id,
                CauseType::UserAction,
                format!("stage \"{}\": {}", stage.name, event.as_str()),
            );
        }

        ServiceResult::success(object.clone())
    }
}

impl<'a> Default for TransitionStageService<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cq_models::qualification_object::{ObjectType, OverallStatus};
    use cq_models::stage::StageStatus;
    use cq_workflow::schedule::build_stages;

    fn object() -> QualificationObject {
        let mut object = QualificationObject::new(ObjectType::RefrigeratorChamber, "Chamber 3");
        object.stages = build_stages(object.id, NaiveDate::from_ymd_opt(2024, 1, 1));
        refresh_aggregates(&mut object);
        object
    }

    #[test]
    fn test_start_first_stage_updates_aggregates() {
        let mut object = object();
        let first = object.stages_by_order()[0].id;

        let result = TransitionStageService::new().call(&mut object, first, StageEvent::Start);
        assert!(result.is_success());

        assert_eq!(object.overall_status, OverallStatus::InProgress);
        assert_eq!(object.overall_progress, 0);
        assert_eq!(object.stage(first).unwrap().status, StageStatus::InProgress);
    }

    #[test]
    fn test_gated_start_leaves_object_untouched() {
        let mut object = object();
        let second = object.stages_by_order()[1].id;
        let before = object.clone();

        let result = TransitionStageService::new().call(&mut object, second, StageEvent::Start);
        assert!(result.is_failure());
        assert!(result
            .full_messages()
            .iter()
            .any(|m| m.contains("previous required stages not completed")));

        assert_eq!(object.stage(second).unwrap().status, StageStatus::Pending);
        assert_eq!(object.overall_status, before.overall_status);
        assert_eq!(object.updated_at, before.updated_at);
    }

    #[test]
    fn test_unknown_stage_rejected() {
        let mut object = object();
        let result = TransitionStageService::new().call(
            &mut object,
            cq_core::traits::new_id(),
            StageEvent::Start,
        );
        assert!(result.is_failure());
    }

    #[test]
    fn test_pause_forces_object_paused() {
        let mut object = object();
        let first = object.stages_by_order()[0].id;

        TransitionStageService::new()
            .call(&mut object, first, StageEvent::Start)
            .unwrap();
        TransitionStageService::new()
            .call(&mut object, first, StageEvent::Pause)
            .unwrap();

        assert_eq!(object.overall_status, OverallStatus::Paused);
    }

    #[test]
    fn test_journal_records_transition() {
        let mut journal = JournalLog::new();
        let mut object = object();
        let first = object.stages_by_order()[0].id;

        let result = TransitionStageService::new()
            .with_journal(&mut journal)
            .call(&mut object, first, StageEvent::Start);
        assert!(result.is_success());

        assert_eq!(journal.len(), 1);
        let entry = journal.entries_for(first).next().unwrap();
        assert!(entry.notes.as_deref().unwrap().contains("start"));
    }

    #[test]
    fn test_rejected_transition_records_no_journal() {
        let mut journal = JournalLog::new();
        let mut object = object();
        let second = object.stages_by_order()[1].id;

        let result = TransitionStageService::new()
            .with_journal(&mut journal)
            .call(&mut object, second, StageEvent::Start);
        assert!(result.is_failure());
        assert!(journal.is_empty());
    }
}
