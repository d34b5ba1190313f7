//! # cq-journals
//!
//! Simple activity-log rows for climaqual-rs: one journal entry per
//! successful mutation, versioned per entity. Append-only; there is no
//! replay or compensation.

pub mod journal;
pub mod log;

pub use journal::{CauseType, Journal, JournalBuilder, JournalVersion, JournableType};
pub use log::JournalLog;
