//! Stage status state machine
//!
//! `pending -> in_progress -> completed`, with `paused` reachable from
//! `in_progress` and back, and an explicit `reset` escape hatch from
//! `completed` back to `pending`. Only the `start` transition is gated on
//! sibling stages; the workflow is linear but manually operated.

use chrono::{DateTime, Utc};
use cq_core::error::{QualError, QualResult};
use cq_core::types::elapsed_days_ceil;
use cq_models::stage::{QualificationStage, StageStatus};
use serde::{Deserialize, Serialize};

/// Operator-initiated stage transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageEvent {
    Start,
    Complete,
    Pause,
    Resume,
    Reset,
}

impl StageEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Reset => "reset",
        }
    }
}

/// Gate for starting a stage: the stage itself must be pending and every
/// required stage with a strictly smaller `order` must be completed.
pub fn can_start(stage: &QualificationStage, siblings: &[QualificationStage]) -> bool {
    if stage.status != StageStatus::Pending {
        return false;
    }
    siblings
        .iter()
        .filter(|s| s.is_required && s.order < stage.order)
        .all(|s| s.status == StageStatus::Completed)
}

/// Check whether `event` is legal for `stage` right now. Detects every
/// violation before any mutation happens.
pub fn check_event(
    stage: &QualificationStage,
    siblings: &[QualificationStage],
    event: StageEvent,
) -> QualResult<()> {
    let reject = |message: String| {
        Err(QualError::InvalidTransition { message })
    };

    match event {
        StageEvent::Start => {
            if stage.status != StageStatus::Pending {
                return reject(format!(
                    "cannot start stage \"{}\" from status {}",
                    stage.name,
                    stage.status.as_str()
                ));
            }
            if !can_start(stage, siblings) {
                return reject(format!(
                    "cannot start stage \"{}\": previous required stages not completed",
                    stage.name
                ));
            }
            Ok(())
        }
        StageEvent::Complete | StageEvent::Pause => {
            if stage.status != StageStatus::InProgress {
                return reject(format!(
                    "cannot {} stage \"{}\" from status {}",
                    event.as_str(),
                    stage.name,
                    stage.status.as_str()
                ));
            }
            Ok(())
        }
        StageEvent::Resume => {
            if stage.status != StageStatus::Paused {
                return reject(format!(
                    "cannot resume stage \"{}\" from status {}",
                    stage.name,
                    stage.status.as_str()
                ));
            }
            Ok(())
        }
        StageEvent::Reset => {
            if stage.status != StageStatus::Completed {
                return reject(format!(
                    "cannot reset stage \"{}\" from status {}",
                    stage.name,
                    stage.status.as_str()
                ));
            }
            Ok(())
        }
    }
}

/// Apply a checked event to the stage, recording actual dates.
///
/// Callers must run `check_event` first; this function only performs the
/// side effects of a legal transition.
pub fn apply_event(stage: &mut QualificationStage, event: StageEvent, now: DateTime<Utc>) {
    match event {
        StageEvent::Start => {
            stage.status = StageStatus::InProgress;
            if stage.start_date.is_none() {
                stage.start_date = Some(now);
            }
        }
        StageEvent::Complete => {
            stage.status = StageStatus::Completed;
            if stage.end_date.is_none() {
                stage.end_date = Some(now);
            }
            if let (Some(start), Some(end)) = (stage.start_date, stage.end_date) {
                stage.actual_duration = Some(elapsed_days_ceil(start, end));
            }
        }
        StageEvent::Pause => {
            stage.status = StageStatus::Paused;
        }
        StageEvent::Resume => {
            stage.status = StageStatus::InProgress;
        }
        StageEvent::Reset => {
            stage.status = StageStatus::Pending;
            stage.start_date = None;
            stage.end_date = None;
            stage.actual_duration = None;
        }
    }
    stage.touch();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::build_stages;
    use chrono::NaiveDate;
    use cq_core::traits::new_id;

    fn stages() -> Vec<QualificationStage> {
        build_stages(new_id(), NaiveDate::from_ymd_opt(2024, 1, 1))
    }

    fn complete_first_n(stages: &mut [QualificationStage], n: usize) {
        let now = Utc::now();
        for stage in stages.iter_mut().take(n) {
            apply_event(stage, StageEvent::Start, now);
            apply_event(stage, StageEvent::Complete, now);
        }
    }

    #[test]
    fn test_gate_blocks_out_of_order_start() {
        let stages = stages();

        // stage with order 2 while order 1 is still pending
        assert!(!can_start(&stages[1], &stages));
        let err = check_event(&stages[1], &stages, StageEvent::Start).unwrap_err();
        assert!(matches!(err, QualError::InvalidTransition { .. }));

        // first stage has no predecessors
        assert!(can_start(&stages[0], &stages));
    }

    #[test]
    fn test_gate_opens_once_predecessors_complete() {
        let mut stages = stages();
        complete_first_n(&mut stages, 1);

        assert!(can_start(&stages[1], &stages));
        assert!(check_event(&stages[1], &stages, StageEvent::Start).is_ok());

        // but order 3 is still blocked
        assert!(!can_start(&stages[2], &stages));
    }

    #[test]
    fn test_start_records_start_date_once() {
        let mut stages = stages();
        let first_start = Utc::now();
        apply_event(&mut stages[0], StageEvent::Start, first_start);
        assert_eq!(stages[0].status, StageStatus::InProgress);
        assert_eq!(stages[0].start_date, Some(first_start));

        // pause/resume does not move the recorded start
        apply_event(&mut stages[0], StageEvent::Pause, Utc::now());
        assert_eq!(stages[0].status, StageStatus::Paused);
        apply_event(&mut stages[0], StageEvent::Resume, Utc::now());
        assert_eq!(stages[0].status, StageStatus::InProgress);
        assert_eq!(stages[0].start_date, Some(first_start));
    }

    #[test]
    fn test_complete_computes_actual_duration() {
        let mut stages = stages();
        let started = Utc::now();
        apply_event(&mut stages[0], StageEvent::Start, started);
        apply_event(
            &mut stages[0],
            StageEvent::Complete,
            started + chrono::Duration::days(2) + chrono::Duration::hours(3),
        );

        assert_eq!(stages[0].status, StageStatus::Completed);
        assert_eq!(stages[0].actual_duration, Some(3));
        assert!(stages[0].end_date.is_some());
    }

    #[test]
    fn test_pause_only_from_in_progress() {
        let stages = stages();
        let err = check_event(&stages[0], &stages, StageEvent::Pause).unwrap_err();
        assert!(matches!(err, QualError::InvalidTransition { .. }));

        let err = check_event(&stages[0], &stages, StageEvent::Resume).unwrap_err();
        assert!(matches!(err, QualError::InvalidTransition { .. }));
    }

    #[test]
    fn test_reset_restores_pending_and_clears_actuals() {
        let mut stages = stages();
        let now = Utc::now();
        apply_event(&mut stages[0], StageEvent::Start, now);
        apply_event(&mut stages[0], StageEvent::Complete, now);

        let name = stages[0].name.clone();
        let order = stages[0].order;
        let estimated = stages[0].estimated_duration;

        assert!(check_event(&stages[0], &stages, StageEvent::Reset).is_ok());
        apply_event(&mut stages[0], StageEvent::Reset, Utc::now());

        assert_eq!(stages[0].status, StageStatus::Pending);
        assert!(stages[0].start_date.is_none());
        assert!(stages[0].end_date.is_none());
        assert!(stages[0].actual_duration.is_none());

        // identity and planning fields survive the reset
        assert_eq!(stages[0].name, name);
        assert_eq!(stages[0].order, order);
        assert_eq!(stages[0].estimated_duration, estimated);
    }

    #[test]
    fn test_reset_rejected_unless_completed() {
        let stages = stages();
        let err = check_event(&stages[0], &stages, StageEvent::Reset).unwrap_err();
        assert!(matches!(err, QualError::InvalidTransition { .. }));
    }

    #[test]
    fn test_double_start_rejected() {
        let mut stages = stages();
        apply_event(&mut stages[0], StageEvent::Start, Utc::now());

        let err = check_event(&stages[0], &stages, StageEvent::Start).unwrap_err();
        assert!(matches!(err, QualError::InvalidTransition { .. }));
    }
}
