//! Stage instantiation and planned-date scheduling
//!
//! Planned windows are computed from cumulative catalog durations off a
//! single base date, never from a neighbouring stage's (possibly edited)
//! dates, so by construction the end of stage N coincides with the start
//! of stage N+1.

use chrono::{Duration, NaiveDate, Utc};
use cq_core::config::WorkflowConfig;
use cq_core::traits::Id;
use cq_core::types::DateRange;
use cq_models::stage::{QualificationStage, StageStatus};

use crate::catalog;

/// Build the initial stage set for a qualification object.
///
/// The base date defaults to today. Pure function: persistence of the
/// resulting stages is the caller's responsibility.
pub fn build_stages(object_id: Id, base_start_date: Option<NaiveDate>) -> Vec<QualificationStage> {
    build_stages_with_config(object_id, base_start_date, &WorkflowConfig::default())
}

/// Build the initial stage set, applying per-type duration overrides from
/// configuration over the catalog defaults.
pub fn build_stages_with_config(
    object_id: Id,
    base_start_date: Option<NaiveDate>,
    config: &WorkflowConfig,
) -> Vec<QualificationStage> {
    let base = base_start_date.unwrap_or_else(|| Utc::now().date_naive());

    let mut offset_days: i64 = 0;
    catalog::schedulable_templates()
        .map(|template| {
            let duration = config
                .duration_overrides
                .get(template.stage_type.as_str())
                .copied()
                .unwrap_or(template.estimated_duration);

            let start = base + Duration::days(offset_days);
            let end = start + Duration::days(duration);
            offset_days += duration;

            let mut stage = QualificationStage::from_template(
                object_id,
                template,
                DateRange::new(Some(start), Some(end)),
            );
            stage.estimated_duration = duration;
            stage
        })
        .collect()
}

/// Planned window for a stage added after instantiation: it starts at the
/// planned end of the currently-last required stage (by `order`), or today
/// if there is none.
pub fn appended_stage_window(
    stages: &[QualificationStage],
    duration: i64,
    today: NaiveDate,
) -> DateRange {
    let start = stages
        .iter()
        .filter(|s| s.is_required)
        .max_by_key(|s| s.order)
        .and_then(|s| s.planned_end_date)
        .unwrap_or(today);

    DateRange::new(Some(start), Some(start + Duration::days(duration)))
}

/// The next required stage waiting to be worked on, by `order`.
pub fn next_pending_stage(stages: &[QualificationStage]) -> Option<&QualificationStage> {
    stages
        .iter()
        .filter(|s| s.is_required && s.status == StageStatus::Pending)
        .min_by_key(|s| s.order)
}
