//! Configuration types and loading.
//!
//! Configuration comes from environment variables; there is no config file
//! layer. Unset variables fall back to compiled-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Instance-specific settings
    pub instance: InstanceConfig,

    /// Workflow tuning
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstanceConfig {
    /// Application title
    pub app_title: String,
    /// Default locale
    pub default_locale: String,
    /// Time zone
    pub timezone: String,
    /// Date format
    pub date_format: String,
}

/// Workflow tuning knobs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WorkflowConfig {
    /// Per-stage-type overrides (days) applied over the catalog's default
    /// estimated durations when instantiating stages. Keys are stage type
    /// slugs (e.g. "testing_execution").
    pub duration_overrides: HashMap<String, i64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance: InstanceConfig {
                app_title: "Climaqual".to_string(),
                default_locale: "en".to_string(),
                timezone: "UTC".to_string(),
                date_format: "%Y-%m-%d".to_string(),
            },
            workflow: WorkflowConfig::default(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(title) = std::env::var("CLIMAQUAL_APP_TITLE") {
            config.instance.app_title = title;
        }
        if let Ok(locale) = std::env::var("CLIMAQUAL_DEFAULT_LOCALE") {
            config.instance.default_locale = locale;
        }
        if let Ok(tz) = std::env::var("TZ") {
            config.instance.timezone = tz;
        }
        if let Ok(fmt) = std::env::var("CLIMAQUAL_DATE_FORMAT") {
            config.instance.date_format = fmt;
        }

        // CLIMAQUAL_STAGE_DURATIONS="testing_execution=10,report_preparation=3"
        if let Ok(spec) = std::env::var("CLIMAQUAL_STAGE_DURATIONS") {
            config.workflow.duration_overrides = parse_duration_overrides(&spec)?;
        }

        Ok(config)
    }
}

fn parse_duration_overrides(spec: &str) -> Result<HashMap<String, i64>, ConfigError> {
    let mut overrides = HashMap::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (stage_type, days) = entry.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
            key: "CLIMAQUAL_STAGE_DURATIONS".to_string(),
            message: format!("expected type=days, got \"{}\"", entry),
        })?;

        let days: i64 = days.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "CLIMAQUAL_STAGE_DURATIONS".to_string(),
            message: format!("\"{}\" is not a number of days", days),
        })?;

        if days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "CLIMAQUAL_STAGE_DURATIONS".to_string(),
                message: format!("{} days is negative", days),
            });
        }

        overrides.insert(stage_type.trim().to_string(), days);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.instance.default_locale, "en");
        assert!(config.workflow.duration_overrides.is_empty());
    }

    #[test]
    fn test_parse_duration_overrides() {
        let overrides =
            parse_duration_overrides("testing_execution=10, report_preparation=3").unwrap();
        assert_eq!(overrides.get("testing_execution"), Some(&10));
        assert_eq!(overrides.get("report_preparation"), Some(&3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration_overrides("testing_execution").is_err());
        assert!(parse_duration_overrides("testing_execution=soon").is_err());
        assert!(parse_duration_overrides("testing_execution=-2").is_err());
    }

    #[test]
    fn test_parse_empty_spec() {
        assert!(parse_duration_overrides("").unwrap().is_empty());
    }
}
