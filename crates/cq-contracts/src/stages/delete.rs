//! Delete-stage contract
//!
//! Required stages form the canonical workflow backbone and cannot be
//! removed; optional stages may be deleted freely.

use cq_core::error::ValidationErrors;
use cq_models::stage::QualificationStage;

use crate::base::{Contract, ValidationResult};

pub struct DeleteStageContract;

impl DeleteStageContract {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeleteStageContract {
    fn default() -> Self {
        Self::new()
    }
}

impl Contract<QualificationStage> for DeleteStageContract {
    fn validate(&self, stage: &QualificationStage) -> ValidationResult {
        if stage.is_required {
            let mut errors = ValidationErrors::new();
            errors.add_base(format!(
                "stage \"{}\" is required and cannot be deleted",
                stage.name
            ));
            return Err(errors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_core::traits::new_id;
    use cq_core::types::DateRange;
    use cq_models::stage::{StageTemplate, StageType};

    fn stage(required: bool) -> QualificationStage {
        let template = StageTemplate {
            stage_type: if required {
                StageType::TestingExecution
            } else {
                StageType::Closed
            },
            name: "stage",
            description: "",
            estimated_duration: 1,
            order: 1,
            is_required: required,
        };
        QualificationStage::from_template(new_id(), &template, DateRange::default())
    }

    #[test]
    fn test_required_stage_is_protected() {
        let contract = DeleteStageContract::new();
        let result = contract.validate(&stage(true));
        assert!(result.is_err());
        assert!(!result.unwrap_err().base_errors.is_empty());
    }

    #[test]
    fn test_optional_stage_may_be_deleted() {
        let contract = DeleteStageContract::new();
        assert!(contract.validate(&stage(false)).is_ok());
    }
}
