//! Update-stage contract
//!
//! Guards attribute edits that happen outside the state machine. Only the
//! attributes actually being changed are validated, so editing the notes
//! of a zero-duration pseudo-stage stays legal.

use cq_core::error::ValidationErrors;
use cq_models::stage::QualificationStage;

use crate::base::{Contract, ValidationResult};

pub struct UpdateStageContract {
    changed_duration: Option<i64>,
}

impl UpdateStageContract {
    pub fn new() -> Self {
        Self {
            changed_duration: None,
        }
    }

    /// Declare a pending estimated-duration change to validate.
    pub fn with_duration_change(mut self, days: i64) -> Self {
        self.changed_duration = Some(days);
        self
    }

    fn validate_duration(&self, errors: &mut ValidationErrors) {
        if let Some(days) = self.changed_duration {
            if days < 1 {
                errors.add("estimatedDuration", "must be at least 1 day");
            }
        }
    }
}

impl Default for UpdateStageContract {
    fn default() -> Self {
        Self::new()
    }
}

impl Contract<QualificationStage> for UpdateStageContract {
    fn validate(&self, _stage: &QualificationStage) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_duration(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_core::traits::new_id;
    use cq_core::types::DateRange;
    use cq_models::stage::{StageTemplate, StageType};

    fn stage() -> QualificationStage {
        let template = StageTemplate {
            stage_type: StageType::ReportPreparation,
            name: "Report preparation",
            description: "",
            estimated_duration: 5,
            order: 6,
            is_required: true,
        };
        QualificationStage::from_template(new_id(), &template, DateRange::default())
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        for days in [0, -3] {
            let contract = UpdateStageContract::new().with_duration_change(days);
            let result = contract.validate(&stage());
            assert!(result.is_err());
            assert!(result.unwrap_err().has_error("estimatedDuration"));
        }
    }

    #[test]
    fn test_positive_duration_accepted() {
        let contract = UpdateStageContract::new().with_duration_change(10);
        assert!(contract.validate(&stage()).is_ok());
    }

    #[test]
    fn test_no_duration_change_is_valid() {
        let contract = UpdateStageContract::new();
        assert!(contract.validate(&stage()).is_ok());
    }
}
