use std::path::Path;

use carbonreg_types::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest `base_allocation` accepted; each unit is materialized on approval.
pub const MAX_BASE_ALLOCATION: u64 = 1_000_000;

/// Registry policy knobs.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Collection name of the credit units.
    #[serde(default = "default_name")]
    pub name: String,
    /// Collection symbol of the credit units.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Units minted for a company when its credit info is approved.
    #[serde(default = "default_base_allocation")]
    pub base_allocation: u64,
    /// Lifetime number of receive-request calls per company.
    #[serde(default = "default_request_quota")]
    pub request_quota: u32,
    /// Deploying authority allowed to register surveyors; unrestricted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrator: Option<Address>,
    /// Handling of a surveyor address that is registered twice.
    #[serde(default)]
    pub duplicate_surveyors: DuplicateSurveyorPolicy,
    /// Whether company registration requires a rostered surveyor.
    #[serde(default)]
    pub require_registered_surveyor: bool,
    /// Whether a rejected company may register again.
    #[serde(default)]
    pub resubmission: ResubmissionPolicy,
}

fn default_name() -> String {
    "CarbonCredits".to_string()
}

fn default_symbol() -> String {
    "CC".to_string()
}

fn default_base_allocation() -> u64 {
    5
}

fn default_request_quota() -> u32 {
    5
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            base_allocation: default_base_allocation(),
            request_quota: default_request_quota(),
            administrator: None,
            duplicate_surveyors: DuplicateSurveyorPolicy::default(),
            require_registered_surveyor: false,
            resubmission: ResubmissionPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Loads a config from a JSON file and validates it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_allocation > MAX_BASE_ALLOCATION {
            return Err(ConfigError::OutOfRange {
                field: "base_allocation",
                value: self.base_allocation,
                max: MAX_BASE_ALLOCATION,
            });
        }
        Ok(())
    }
}

/// What `register_surveyor` does with an address already on the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateSurveyorPolicy {
    /// Append another record for the same address.
    #[default]
    Allow,
    /// Fail with `DuplicateSurveyor`.
    Reject,
}

/// Whether a rejected company may be submitted for review again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResubmissionPolicy {
    /// Re-registration with the same surveyor re-queues the company.
    #[default]
    Allow,
    /// Re-registration fails with `ResubmissionForbidden`.
    Forbid,
}

/// Errors while loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for `RegistryConfig`.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric field is outside its accepted range.
    #[error("{field} is {value}, at most {max} allowed")]
    OutOfRange {
        /// Config field name.
        field: &'static str,
        /// Configured value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },
}
