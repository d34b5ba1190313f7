//! Qualification stage model

use chrono::{DateTime, NaiveDate, Utc};
use cq_core::traits::{new_id, Entity, Id, Identifiable, Timestamped};
use cq_core::types::{Assignee, DateRange};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stage archetype identifier.
///
/// `Closed` and `Paused` are pseudo-stages: they exist for status labeling
/// and are never part of the required workflow backbone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    DocumentationCollection,
    ProtocolPreparation,
    EquipmentSetup,
    TestingExecution,
    DataExtraction,
    ReportPreparation,
    ReportApproval,
    DocumentationFinalization,
    Closed,
    Paused,
}

impl StageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentationCollection => "documentation_collection",
            Self::ProtocolPreparation => "protocol_preparation",
            Self::EquipmentSetup => "equipment_setup",
            Self::TestingExecution => "testing_execution",
            Self::DataExtraction => "data_extraction",
            Self::ReportPreparation => "report_preparation",
            Self::ReportApproval => "report_approval",
            Self::DocumentationFinalization => "documentation_finalization",
            Self::Closed => "closed",
            Self::Paused => "paused",
        }
    }

    /// Parse from the wire/slug representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "documentation_collection" => Some(Self::DocumentationCollection),
            "protocol_preparation" => Some(Self::ProtocolPreparation),
            "equipment_setup" => Some(Self::EquipmentSetup),
            "testing_execution" => Some(Self::TestingExecution),
            "data_extraction" => Some(Self::DataExtraction),
            "report_preparation" => Some(Self::ReportPreparation),
            "report_approval" => Some(Self::ReportApproval),
            "documentation_finalization" => Some(Self::DocumentationFinalization),
            "closed" => Some(Self::Closed),
            "paused" => Some(Self::Paused),
            _ => None,
        }
    }
}

/// Stage lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Paused,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Paused => "Paused",
        }
    }
}

/// Immutable catalog entry defining one stage archetype.
#[derive(Debug, Clone, Copy)]
pub struct StageTemplate {
    pub stage_type: StageType,
    pub name: &'static str,
    pub description: &'static str,
    /// Default duration in days
    pub estimated_duration: i64,
    /// Canonical rank in the workflow sequence
    pub order: i32,
    /// Whether this stage counts toward progress/status and is protected
    /// from deletion
    pub is_required: bool,
}

/// One step of the qualification workflow applied to one object.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QualificationStage {
    pub id: Id,
    pub object_id: Id,

    #[serde(rename = "type")]
    pub stage_type: StageType,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: String,

    pub status: StageStatus,

    /// Planned duration in days, editable by the operator
    pub estimated_duration: i64,

    /// Rank in the workflow sequence. Sequencing always compares `order`,
    /// never collection position.
    pub order: i32,

    pub is_required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,

    /// Scheduled window, computed at instantiation
    pub planned_start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,

    /// Actual instants, recorded on status transitions
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    /// Elapsed days once the stage completes
    pub actual_duration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QualificationStage {
    /// Instantiate a stage from a catalog template with a planned window.
    pub fn from_template(object_id: Id, template: &StageTemplate, planned: DateRange) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            object_id,
            stage_type: template.stage_type,
            name: template.name.to_string(),
            description: template.description.to_string(),
            status: StageStatus::Pending,
            estimated_duration: template.estimated_duration,
            order: template.order,
            is_required: template.is_required,
            assignee: None,
            planned_start_date: planned.start_date,
            planned_end_date: planned.end_date,
            start_date: None,
            end_date: None,
            actual_duration: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn planned_window(&self) -> DateRange {
        DateRange::new(self.planned_start_date, self.planned_end_date)
    }

    /// A stage is overdue when its planned end has passed and it has not
    /// completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.planned_end_date {
            Some(end) => end < today && self.status != StageStatus::Completed,
            None => false,
        }
    }

    /// Refresh `updated_at`; call after every field mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for QualificationStage {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for QualificationStage {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for QualificationStage {
    const TYPE_NAME: &'static str = "QualificationStage";
}
