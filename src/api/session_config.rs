use serde::{Deserialize, Serialize};

use crate::core::{History, LOCAL_REGION, Parameters};
use crate::error::{WindowError, WindowResult};

pub const SESSION_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Session bootstrap configuration.
///
/// Serializable so hosts can persist the navigation setup. Missing fields
/// fall back to the same defaults as [`SessionConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default = "default_capable_of_historical_data")]
    pub capable_of_historical_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SessionConfigJsonContractV1 {
    schema_version: u32,
    config: SessionConfig,
}

fn default_capable_of_historical_data() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history: History::default(),
            parameters: Parameters::default(),
            capable_of_historical_data: default_capable_of_historical_data(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Sets the snapshot the session starts from.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_historical_data(mut self, capable: bool) -> Self {
        self.capable_of_historical_data = capable;
        self
    }

    /// Checks the history and that the initial snapshot lies inside it.
    pub fn validate(self) -> WindowResult<Self> {
        let history = self.history.validate()?;
        let parameters = self.parameters;

        if parameters.interval_offset() < history.oldest_offset() {
            return Err(WindowError::InvalidConfig(format!(
                "interval offset {} is older than history range {}",
                parameters.interval_offset(),
                history.range
            )));
        }
        if parameters.raster_baselength < 0 {
            return Err(WindowError::InvalidConfig(
                "raster baselength must be >= 0".to_owned(),
            ));
        }
        if parameters.count_threshold < 0 {
            return Err(WindowError::InvalidConfig(
                "count threshold must be >= 0".to_owned(),
            ));
        }
        if parameters.local_reference.is_some() && parameters.region != LOCAL_REGION {
            return Err(WindowError::InvalidConfig(format!(
                "local reference requires region {LOCAL_REGION}, got {}",
                parameters.region
            )));
        }
        Ok(self)
    }

    pub fn to_json_contract_v1_pretty(self) -> WindowResult<String> {
        let payload = SessionConfigJsonContractV1 {
            schema_version: SESSION_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            WindowError::InvalidConfig(format!("failed to serialize session config: {e}"))
        })
    }

    /// Accepts a bare config object or a versioned contract payload.
    ///
    /// A document carrying `schema_version` is parsed as a contract only;
    /// it never falls back to the bare shape.
    pub fn from_json_compat_str(input: &str) -> WindowResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            WindowError::InvalidConfig(format!("failed to parse session config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: SessionConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    WindowError::InvalidConfig(format!(
                        "failed to parse session config contract: {e}"
                    ))
                })?;
            if payload.schema_version != SESSION_CONFIG_JSON_SCHEMA_V1 {
                return Err(WindowError::InvalidConfig(format!(
                    "unsupported session config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                WindowError::InvalidConfig(format!("failed to parse session config json: {e}"))
            })?
        };
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use crate::core::{GLOBAL_REGION, History, LocalReference, Parameters, TimeInterval};
    use crate::error::WindowError;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn offset_beyond_history_is_rejected() {
        let config = SessionConfig::default()
            .with_history(History::new(30, 120))
            .with_parameters(Parameters {
                interval: TimeInterval::new(-180, 60),
                ..Parameters::default()
            });
        let err = config.validate().expect_err("offset too old");
        assert!(matches!(err, WindowError::InvalidConfig(_)));
    }

    #[test]
    fn local_reference_outside_local_region_is_rejected() {
        let config = SessionConfig::default().with_parameters(Parameters {
            region: GLOBAL_REGION,
            local_reference: Some(LocalReference::new(1, 2)),
            ..Parameters::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn bare_json_uses_defaults_for_missing_fields() {
        let config = SessionConfig::from_json_compat_str(
            r#"{"history":{"time_increment":15,"range":360}}"#,
        )
        .expect("parse");
        assert_eq!(config.history, History::new(15, 360));
        assert_eq!(config.parameters, Parameters::default());
        assert!(config.capable_of_historical_data);
    }

    #[test]
    fn contract_payload_round_trips() {
        let config = SessionConfig::default()
            .with_historical_data(false)
            .with_parameters(Parameters::default().with_count_threshold(3));
        let json = config.to_json_contract_v1_pretty().expect("serialize");
        assert!(json.contains("\"schema_version\": 1"));
        let parsed = SessionConfig::from_json_compat_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_contract_is_rejected_instead_of_defaulted() {
        let json = r#"{"schema_version":1,"config":{"history":{"time_increment":"bad"}}}"#;
        let err = SessionConfig::from_json_compat_str(json).expect_err("malformed contract");
        assert!(matches!(err, WindowError::InvalidConfig(_)));
        assert!(err.to_string().contains("contract"));

        let missing_config = r#"{"schema_version":1}"#;
        assert!(SessionConfig::from_json_compat_str(missing_config).is_err());
    }

    #[test]
    fn malformed_bare_config_is_rejected() {
        let json = r#"{"history":{"range":"a day"}}"#;
        assert!(SessionConfig::from_json_compat_str(json).is_err());
        assert!(SessionConfig::from_json_compat_str("not json").is_err());
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let json = r#"{"schema_version":7,"config":{}}"#;
        let err = SessionConfig::from_json_compat_str(json).expect_err("version");
        assert!(err.to_string().contains("schema version"));
    }
}
