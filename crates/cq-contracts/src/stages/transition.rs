//! Transition contract
//!
//! Wraps the state-machine legality check (including the start gate) in
//! the contract interface, so services reject an illegal transition the
//! same way they reject any other invalid write.

use cq_core::error::ValidationErrors;
use cq_models::stage::QualificationStage;
use cq_workflow::transition::{check_event, StageEvent};

use crate::base::{Contract, ValidationResult};

pub struct TransitionStageContract<'a> {
    siblings: &'a [QualificationStage],
    event: StageEvent,
}

impl<'a> TransitionStageContract<'a> {
    pub fn new(siblings: &'a [QualificationStage], event: StageEvent) -> Self {
        Self { siblings, event }
    }
}

impl<'a> Contract<QualificationStage> for TransitionStageContract<'a> {
    fn validate(&self, stage: &QualificationStage) -> ValidationResult {
        match check_event(stage, self.siblings, self.event) {
            Ok(()) => Ok(()),
            Err(err) => {
                let mut errors = ValidationErrors::new();
                errors.add_base(err.to_string());
                Err(errors)
            }
        }
    }
}
