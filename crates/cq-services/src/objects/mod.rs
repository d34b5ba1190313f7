//! Qualification object services

mod create;

pub use create::{CreateObjectParams, CreateQualificationObjectService};
