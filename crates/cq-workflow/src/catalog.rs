//! Stage template catalog
//!
//! The canonical, ordered definition of the qualification workflow: eight
//! required stages plus the `closed` and `paused` pseudo-stages, which
//! exist for status labeling only.

use std::collections::HashMap;

use cq_models::stage::{StageTemplate, StageType};
use once_cell::sync::Lazy;

/// The compiled-in workflow definition, in canonical order.
pub static STAGE_TEMPLATES: [StageTemplate; 10] = [
    StageTemplate {
        stage_type: StageType::DocumentationCollection,
        name: "Documentation collection",
        description: "Collect the required technical documentation and permits",
        estimated_duration: 2,
        order: 1,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::ProtocolPreparation,
        name: "Protocol preparation",
        description: "Draft the test protocol and measurement methodology",
        estimated_duration: 2,
        order: 2,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::EquipmentSetup,
        name: "Equipment setup",
        description: "Prepare the measurement equipment and place it on site",
        estimated_duration: 2,
        order: 3,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::TestingExecution,
        name: "Testing execution",
        description: "Run the tests according to the approved protocol",
        estimated_duration: 7,
        order: 4,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::DataExtraction,
        name: "Data extraction",
        description: "Retrieve and pre-process the measurement data",
        estimated_duration: 1,
        order: 5,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::ReportPreparation,
        name: "Report preparation",
        description: "Analyse the data and draft the technical report",
        estimated_duration: 5,
        order: 6,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::ReportApproval,
        name: "Report approval",
        description: "Agree the report with the customer and apply revisions",
        estimated_duration: 2,
        order: 7,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::DocumentationFinalization,
        name: "Documentation finalization",
        description: "Finalize and hand over the documentation package",
        estimated_duration: 1,
        order: 8,
        is_required: true,
    },
    StageTemplate {
        stage_type: StageType::Closed,
        name: "Closed",
        description: "The qualification is closed",
        estimated_duration: 0,
        order: 9,
        is_required: false,
    },
    StageTemplate {
        stage_type: StageType::Paused,
        name: "Paused",
        description: "The qualification is temporarily paused",
        estimated_duration: 0,
        order: 10,
        is_required: false,
    },
];

static TEMPLATES_BY_TYPE: Lazy<HashMap<StageType, &'static StageTemplate>> = Lazy::new(|| {
    STAGE_TEMPLATES.iter().map(|t| (t.stage_type, t)).collect()
});

/// Look up a catalog entry by stage type.
pub fn template_for(stage_type: StageType) -> Option<&'static StageTemplate> {
    TEMPLATES_BY_TYPE.get(&stage_type).copied()
}

/// Templates that take part in instantiation: everything except the
/// `paused` pseudo-stage. `closed` passes this filter and is instantiated
/// as a zero-duration, non-required stage; participation in gating and
/// aggregation is decided by `is_required`, never by type.
pub fn schedulable_templates() -> impl Iterator<Item = &'static StageTemplate> {
    STAGE_TEMPLATES
        .iter()
        .filter(|t| t.stage_type != StageType::Paused)
}
