//! # cq-services
//!
//! Business logic services for climaqual-rs. One service per operation;
//! each validates through its contract, mutates only on success, and
//! refreshes the object aggregates before returning, so the caller always
//! hands an internally consistent object to the persistence layer.

pub mod objects;
pub mod result;
pub mod stages;

pub use objects::{CreateObjectParams, CreateQualificationObjectService};
pub use result::ServiceResult;
pub use stages::{
    AddStageService, DeleteStageService, SetStageAttributesService, StageParams,
    TransitionStageService,
};
