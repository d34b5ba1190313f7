//! # cq-contracts
//!
//! Validation contracts for climaqual-rs. Each mutating operation has a
//! contract that detects every rule violation before any state changes;
//! services run the contract first and mutate only on success.

pub mod base;
pub mod stages;

pub use base::{Contract, ValidationResult};
pub use stages::{
    AddStageContract, DeleteStageContract, TransitionStageContract, UpdateStageContract,
};
