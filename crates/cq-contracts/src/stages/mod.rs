//! Stage operation contracts

mod add;
mod delete;
mod transition;
mod update;

pub use add::AddStageContract;
pub use delete::DeleteStageContract;
pub use transition::TransitionStageContract;
pub use update::UpdateStageContract;
