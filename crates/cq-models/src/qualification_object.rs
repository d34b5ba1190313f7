//! Qualification object model

use chrono::{DateTime, Utc};
use cq_core::traits::{new_id, Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::stage::{QualificationStage, StageStatus, StageType};

/// Kind of physical asset or location undergoing qualification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Room,
    Automobile,
    RefrigeratorChamber,
    Refrigerator,
    Freezer,
    Thermocontainer,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Automobile => "automobile",
            Self::RefrigeratorChamber => "refrigerator_chamber",
            Self::Refrigerator => "refrigerator",
            Self::Freezer => "freezer",
            Self::Thermocontainer => "thermocontainer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Room => "Room",
            Self::Automobile => "Automobile",
            Self::RefrigeratorChamber => "Refrigerator chamber",
            Self::Refrigerator => "Refrigerator",
            Self::Freezer => "Freezer",
            Self::Thermocontainer => "Thermocontainer",
        }
    }
}

/// Derived object-level status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Paused => "Paused",
        }
    }
}

/// Type-specific attributes (area, VIN, serial number, ...). Loosely
/// validated; no workflow coupling.
pub type TechnicalParameters = serde_json::Map<String, serde_json::Value>;

/// A physical asset or location undergoing the qualification workflow.
///
/// The object exclusively owns its `stages` collection; `overall_status`
/// and `overall_progress` are derived from it and refreshed after every
/// stage mutation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QualificationObject {
    pub id: Id,

    /// Owning project, managed by the external persistence layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Id>,

    #[serde(rename = "type")]
    pub object_type: ObjectType,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: Option<String>,

    pub stages: Vec<QualificationStage>,

    pub overall_status: OverallStatus,

    /// Completion percentage, 0..=100
    pub overall_progress: i32,

    #[serde(default)]
    pub technical_parameters: TechnicalParameters,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QualificationObject {
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            project_id: None,
            object_type,
            name: name.into(),
            description: None,
            stages: Vec::new(),
            overall_status: OverallStatus::NotStarted,
            overall_progress: 0,
            technical_parameters: TechnicalParameters::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stage(&self, stage_id: Id) -> Option<&QualificationStage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn stage_mut(&mut self, stage_id: Id) -> Option<&mut QualificationStage> {
        self.stages.iter_mut().find(|s| s.id == stage_id)
    }

    pub fn has_stage_type(&self, stage_type: StageType) -> bool {
        self.stages.iter().any(|s| s.stage_type == stage_type)
    }

    /// Stages ordered by their `order` rank
    pub fn stages_by_order(&self) -> Vec<&QualificationStage> {
        let mut stages: Vec<&QualificationStage> = self.stages.iter().collect();
        stages.sort_by_key(|s| s.order);
        stages
    }

    pub fn required_stages(&self) -> impl Iterator<Item = &QualificationStage> {
        self.stages.iter().filter(|s| s.is_required)
    }

    pub fn completed_required_count(&self) -> usize {
        self.required_stages()
            .filter(|s| s.status == StageStatus::Completed)
            .count()
    }

    /// Sum of planned durations over the required backbone, in days
    pub fn total_estimated_duration(&self) -> i64 {
        self.required_stages().map(|s| s.estimated_duration).sum()
    }

    /// Refresh `updated_at`; call after every mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for QualificationObject {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for QualificationObject {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for QualificationObject {
    const TYPE_NAME: &'static str = "QualificationObject";
}
