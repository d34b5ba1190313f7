//! # cq-models
//!
//! Domain models for climaqual-rs.
//!
//! This crate contains the entity structs the workflow core operates on.
//! Each model implements the core traits from `cq-core` (Entity,
//! Identifiable, Timestamped). Translation between these structs and the
//! relational row representation is the persistence layer's concern.

pub use cq_core::traits::{Entity, Id, Identifiable, Timestamped};

pub mod project;
pub mod qualification_object;
pub mod stage;

pub use project::Project;
pub use qualification_object::{ObjectType, OverallStatus, QualificationObject, TechnicalParameters};
pub use stage::{QualificationStage, StageStatus, StageTemplate, StageType};
