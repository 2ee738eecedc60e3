use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::{DEFAULT_BID_URL, DEFAULT_SYNC_URL};
use crate::error::AdapterError;

pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "R2B2";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

const EMBEDDED_SETTINGS: &str = include_str!("../../../r2b2.toml");

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AdapterSettings {
    /// Bid endpoint; may be scheme-relative (`//host/path`).
    #[serde(default = "default_bid_url")]
    #[validate(custom(function = "validate_endpoint"))]
    pub bid_url: String,
    #[serde(default = "default_sync_url")]
    #[validate(custom(function = "validate_endpoint"))]
    pub sync_url: String,
    /// Marks outgoing requests as test traffic.
    #[serde(default)]
    pub debug: bool,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            bid_url: default_bid_url(),
            sync_url: default_sync_url(),
            debug: false,
        }
    }
}

fn default_bid_url() -> String {
    DEFAULT_BID_URL.to_string()
}

fn default_sync_url() -> String {
    DEFAULT_SYNC_URL.to_string()
}

fn validate_endpoint(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.starts_with("//") || trimmed.starts_with("https://") || trimmed.starts_with("http://")
    {
        Ok(())
    } else {
        Err(ValidationError::new("endpoint must be an absolute or scheme-relative URL"))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub adapter: AdapterSettings,
}

impl Settings {
    /// Loads the settings embedded at compile time, merged with `R2B2__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the merged settings cannot
    /// be deserialized or fail validation.
    pub fn new() -> Result<Self, Report<AdapterError>> {
        Self::from_toml(EMBEDDED_SETTINGS)
    }

    /// Parses a TOML document and merges `R2B2__*` environment overrides,
    /// e.g. `R2B2__ADAPTER__DEBUG=true`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the merged settings cannot
    /// be deserialized or fail validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR)
            .try_parsing(true);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(AdapterError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(AdapterError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Serializes the merged settings back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Serialization`] if TOML encoding fails.
    pub fn to_canonical_toml(&self) -> Result<String, Report<AdapterError>> {
        toml::to_string_pretty(self).change_context(AdapterError::Serialization {
            message: "Failed to serialize settings to TOML".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::SETTINGS_OVERRIDES as OVERRIDES;

    #[test]
    fn test_settings_new() {
        temp_env::with_vars_unset(OVERRIDES, || {
            let settings = Settings::new().expect("should load embedded settings");

            assert_eq!(settings.adapter.bid_url, DEFAULT_BID_URL);
            assert_eq!(settings.adapter.sync_url, DEFAULT_SYNC_URL);
            assert!(!settings.adapter.debug);
        });
    }

    #[test]
    fn test_settings_from_valid_toml() {
        temp_env::with_vars_unset(OVERRIDES, || {
            let toml_str = r#"
                [adapter]
                bid_url = "https://bid.example.com/openrtb2/bid"
                sync_url = "https://bid.example.com/cookieSync"
                debug = true
                "#;

            let settings = Settings::from_toml(toml_str).expect("should parse TOML");
            assert_eq!(
                settings.adapter.bid_url,
                "https://bid.example.com/openrtb2/bid"
            );
            assert_eq!(settings.adapter.sync_url, "https://bid.example.com/cookieSync");
            assert!(settings.adapter.debug);
        });
    }

    #[test]
    fn test_settings_defaults_when_section_missing() {
        temp_env::with_vars_unset(OVERRIDES, || {
            let settings = Settings::from_toml("").expect("should parse empty TOML");

            assert_eq!(settings.adapter.bid_url, DEFAULT_BID_URL);
            assert_eq!(settings.adapter.sync_url, DEFAULT_SYNC_URL);
            assert!(!settings.adapter.debug);
        });
    }

    #[test]
    fn test_settings_rejects_relative_endpoint() {
        let toml_str = r#"
            [adapter]
            bid_url = "openrtb2/bid"
            "#;

        let err = Settings::from_toml(toml_str).expect_err("should reject relative URL");
        assert!(
            matches!(
                err.current_context(),
                AdapterError::Configuration { .. }
            ),
            "should report a configuration error"
        );
    }

    #[test]
    fn test_settings_rejects_malformed_toml() {
        let err = Settings::from_toml("[adapter\ndebug = ").expect_err("should fail to parse");
        assert!(matches!(
            err.current_context(),
            AdapterError::Configuration { .. }
        ));
    }

    #[test]
    fn test_settings_debug_from_environment() {
        temp_env::with_var("R2B2__ADAPTER__DEBUG", Some("true"), || {
            let settings = Settings::from_toml(EMBEDDED_SETTINGS).expect("should parse TOML");
            assert!(settings.adapter.debug, "env override should enable debug");
        });
    }

    #[test]
    fn test_settings_url_from_environment() {
        temp_env::with_var(
            "R2B2__ADAPTER__SYNC_URL",
            Some("https://sync.example.com/cookieSync"),
            || {
                let settings =
                    Settings::from_toml(EMBEDDED_SETTINGS).expect("should parse TOML");
                assert_eq!(
                    settings.adapter.sync_url,
                    "https://sync.example.com/cookieSync"
                );
            },
        );
    }

    #[test]
    fn test_canonical_toml_round_trips() {
        temp_env::with_vars_unset(OVERRIDES, || {
            let settings = Settings::new().expect("should load embedded settings");
            let toml_str = settings
                .to_canonical_toml()
                .expect("should serialize settings");

            assert!(toml_str.contains("[adapter]"));
            assert!(toml_str.contains(DEFAULT_SYNC_URL));
        });
    }
}
