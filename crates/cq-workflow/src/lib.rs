//! # cq-workflow
//!
//! The qualification-stage workflow model: the catalog of stage templates,
//! the instantiator that turns the catalog into a concrete stage set for an
//! object, the stage status state machine with its start gate, and the
//! object-level progress/status aggregator.
//!
//! Everything in this crate is synchronous, pure computation over in-memory
//! collections; persistence is the caller's concern.

pub mod catalog;
pub mod progress;
pub mod schedule;
pub mod transition;

pub use catalog::{template_for, STAGE_TEMPLATES};
pub use progress::{calculate_progress, calculate_status, refresh_aggregates};
pub use schedule::{appended_stage_window, build_stages, build_stages_with_config, next_pending_stage};
pub use transition::{apply_event, can_start, check_event, StageEvent};
