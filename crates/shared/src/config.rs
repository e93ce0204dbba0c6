//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Organization configuration.
    #[serde(default)]
    pub organization: OrganizationConfig,
    /// Accounting calendar configuration.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Regulatory reporting configuration.
    #[serde(default)]
    pub regulatory: RegulatoryConfig,
}

/// Organization configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Short organization code embedded in transaction numbers.
    #[serde(default = "default_org_code")]
    pub code: String,
}

fn default_org_code() -> String {
    "VLT".to_string()
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            code: default_org_code(),
        }
    }
}

/// Accounting calendar configuration.
///
/// The UTC offset lives here and nowhere else; every call site derives
/// "today" through the calendar built from this value.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Fixed local offset from UTC, in whole hours.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

fn default_utc_offset_hours() -> i32 {
    8 // Western Indonesia deployment runs on UTC+8
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

/// Regulatory reporting configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegulatoryConfig {
    /// Regulator-assigned operator id stamped on every report row.
    #[serde(default)]
    pub operator_id: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VALUTA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.organization.code, "VLT");
        assert_eq!(cfg.calendar.utc_offset_hours, 8);
        assert_eq!(cfg.regulatory.operator_id, "");
    }

    #[test]
    fn test_explicit_values() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "organization": {"code": "MBA"},
                "calendar": {"utc_offset_hours": 7},
                "regulatory": {"operator_id": "OP-0042"}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.organization.code, "MBA");
        assert_eq!(cfg.calendar.utc_offset_hours, 7);
        assert_eq!(cfg.regulatory.operator_id, "OP-0042");
    }
}
