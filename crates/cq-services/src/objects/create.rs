//! Create service for qualification objects
//!
//! Builds the object, instantiates its stage set from the catalog, and
//! computes the initial aggregates, so the caller always persists a
//! consistent object.

use chrono::NaiveDate;
use cq_core::config::WorkflowConfig;
use cq_core::traits::Id;
use cq_journals::{CauseType, JournalLog, JournableType};
use cq_models::qualification_object::{ObjectType, QualificationObject, TechnicalParameters};
use cq_workflow::progress::refresh_aggregates;
use cq_workflow::schedule::build_stages_with_config;
use validator::Validate;

use crate::result::ServiceResult;

/// Creation parameters
#[derive(Debug, Clone)]
pub struct CreateObjectParams {
    pub object_type: ObjectType,
    pub name: String,
    pub description: Option<String>,
    pub project_id: Option<Id>,
    pub technical_parameters: TechnicalParameters,
    /// Base date for the planned schedule; defaults to today
    pub base_start_date: Option<NaiveDate>,
}

impl CreateObjectParams {
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        Self {
            object_type,
            name: name.into(),
            description: None,
            project_id: None,
            technical_parameters: TechnicalParameters::new(),
            base_start_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_project_id(mut self, project_id: Id) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_technical_parameters(mut self, parameters: TechnicalParameters) -> Self {
        self.technical_parameters = parameters;
        self
    }

    pub fn with_base_start_date(mut self, base: NaiveDate) -> Self {
        self.base_start_date = Some(base);
        self
    }
}

pub struct CreateQualificationObjectService<'a> {
    journal: Option<&'a mut JournalLog>,
    config: Option<&'a WorkflowConfig>,
}

impl<'a> CreateQualificationObjectService<'a> {
    pub fn new() -> Self {
        Self {
            journal: None,
            config: None,
        }
    }

    pub fn with_journal(mut self, journal: &'a mut JournalLog) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Apply deployment duration overrides when instantiating stages.
    pub fn with_config(mut self, config: &'a WorkflowConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Execute the create operation
    pub fn call(self, params: CreateObjectParams) -> ServiceResult<QualificationObject> {
        let mut object = QualificationObject::new(params.object_type, params.name);
        object.description = params.description;
        object.project_id = params.project_id;
        object.technical_parameters = params.technical_parameters;

        if let Err(errors) = object.validate() {
            return ServiceResult::failure(errors.into());
        }

        let default_config = WorkflowConfig::default();
        let config = self.config.unwrap_or(&default_config);
        object.stages = build_stages_with_config(object.id, params.base_start_date, config);
        refresh_aggregates(&mut object);

        tracing::info!(
            "qualification object {} ({}) created with {} stages",
            object.name,
            object.object_type.as_str(),
            object.stages.len()
        );

        if let Some(journal) = self.journal {
            journal.record(
                JournableType::QualificationObject,
                object.id,
                CauseType::Workflow,
                format!("created with {} stages", object.stages.len()),
            );
        }

        ServiceResult::success(object)
    }
}

impl<'a> Default for CreateQualificationObjectService<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_models::qualification_object::OverallStatus;
    use cq_models::stage::StageStatus;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_create_instantiates_full_stage_set() {
        let params = CreateObjectParams::new(ObjectType::Room, "Warehouse A")
            .with_description("Main storage hall")
            .with_base_start_date(base_date());

        let result = CreateQualificationObjectService::new().call(params);
        assert!(result.is_success());

        let object = result.unwrap();
        assert_eq!(object.stages.len(), 9);
        assert!(object.stages.iter().all(|s| s.status == StageStatus::Pending));
        assert_eq!(object.overall_status, OverallStatus::NotStarted);
        assert_eq!(object.overall_progress, 0);
        assert!(object.stages.iter().all(|s| s.object_id == object.id));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let params = CreateObjectParams::new(ObjectType::Refrigerator, "");
        let result = CreateQualificationObjectService::new().call(params);

        assert!(result.is_failure());
        assert!(result.errors().has_error("name"));
    }

    #[test]
    fn test_create_applies_duration_overrides() {
        let mut config = WorkflowConfig::default();
        config
            .duration_overrides
            .insert("testing_execution".to_string(), 14);

        let params = CreateObjectParams::new(ObjectType::RefrigeratorChamber, "Chamber 1")
            .with_base_start_date(base_date());
        let object = CreateQualificationObjectService::new()
            .with_config(&config)
            .call(params)
            .unwrap();

        let testing = object
            .stages
            .iter()
            .find(|s| s.stage_type.as_str() == "testing_execution")
            .unwrap();
        assert_eq!(testing.estimated_duration, 14);
    }

    #[test]
    fn test_create_keeps_technical_parameters() {
        let mut parameters = TechnicalParameters::new();
        parameters.insert("area".to_string(), serde_json::json!(120.5));
        parameters.insert("climateSystem".to_string(), serde_json::json!("ClimaTech CT-4"));

        let params = CreateObjectParams::new(ObjectType::Room, "Warehouse B")
            .with_technical_parameters(parameters);
        let object = CreateQualificationObjectService::new().call(params).unwrap();

        assert_eq!(
            object.technical_parameters.get("area"),
            Some(&serde_json::json!(120.5))
        );
    }

    #[test]
    fn test_create_records_initial_journal() {
        let mut journal = JournalLog::new();
        let params = CreateObjectParams::new(ObjectType::Freezer, "F-1");
        let object = CreateQualificationObjectService::new()
            .with_journal(&mut journal)
            .call(params)
            .unwrap();

        let entry = journal.entries_for(object.id).next().unwrap();
        assert!(entry.is_initial());
        assert_eq!(entry.cause, CauseType::Workflow);
    }
}
