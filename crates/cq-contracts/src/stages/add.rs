//! Add-stage contract
//!
//! A stage may be added only for a catalog type the object does not
//! already carry; duplicate types per object are disallowed. Membership in
//! the catalog itself is guaranteed by `StageType` being a closed enum.

use cq_core::error::ValidationErrors;
use cq_models::qualification_object::QualificationObject;
use cq_models::stage::StageType;

use crate::base::{Contract, ValidationResult};

pub struct AddStageContract<'a> {
    object: &'a QualificationObject,
}

impl<'a> AddStageContract<'a> {
    pub fn new(object: &'a QualificationObject) -> Self {
        Self { object }
    }

    fn validate_unused_type(&self, stage_type: StageType, errors: &mut ValidationErrors) {
        if self.object.has_stage_type(stage_type) {
            errors.add(
                "type",
                format!("{} already exists on this object", stage_type.as_str()),
            );
        }
    }
}

impl<'a> Contract<StageType> for AddStageContract<'a> {
    fn validate(&self, stage_type: &StageType) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_unused_type(*stage_type, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
