//! Project model
//!
//! Projects own qualification objects; the ownership relation itself lives
//! in the external persistence layer, so the model here is deliberately
//! thin.

use chrono::{DateTime, Utc};
use cq_core::traits::{new_id, Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,

    /// URL-safe slug
    #[validate(length(min = 1, max = 100))]
    pub identifier: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: Option<String>,

    /// Whether the project is active (not archived)
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            identifier: identifier.into(),
            name: name.into(),
            description: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn archived(&self) -> bool {
        !self.active
    }

    /// Generate a valid identifier from a name
    pub fn identifier_from_name(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    }
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Project {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Project {
    const TYPE_NAME: &'static str = "Project";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_new() {
        let project = Project::new("cold-chain-2024", "Cold chain 2024");
        assert_eq!(project.identifier, "cold-chain-2024");
        assert!(project.active);
        assert!(!project.archived());
    }

    #[test]
    fn test_identifier_from_name() {
        assert_eq!(Project::identifier_from_name("Cold Chain 2024"), "cold-chain-2024");
        assert_eq!(Project::identifier_from_name("  Spaces  "), "spaces");
    }
}
