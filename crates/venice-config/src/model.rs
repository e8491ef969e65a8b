// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};
use venice_core::{Credentials, VeniceError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VeniceConfig {
    /// Venice API credentials.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Run-level execution policy.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeniceConfig {
    /// Builds run credentials. Fails when no API key is configured.
    pub fn credentials(&self) -> Result<Credentials, VeniceError> {
        let api_key = self
            .credentials
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                VeniceError::Config(
                    "no API key configured; set credentials.api_key or VENICE_API_KEY".into(),
                )
            })?;
        Ok(Credentials {
            api_key: api_key.to_string(),
            base_url: self.credentials.base_url.clone(),
        })
    }
}

/// Venice API credentials.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Overrides `https://api.venice.ai/api/v1`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Run-level execution policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Record per-item failures as error items instead of aborting the run.
    #[serde(default)]
    pub continue_on_fail: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = VeniceConfig::default();
        assert!(config.credentials.api_key.is_none());
        assert!(!config.run.continue_on_fail);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn credentials_require_a_key() {
        let config = VeniceConfig::default();
        let err = config.credentials().unwrap_err();
        assert!(err.to_string().contains("API key"));

        let mut config = VeniceConfig::default();
        config.credentials.api_key = Some("   ".into());
        assert!(config.credentials().is_err());
    }

    #[test]
    fn credentials_carry_base_url_override() {
        let mut config = VeniceConfig::default();
        config.credentials.api_key = Some("sk-1".into());
        config.credentials.base_url = Some("http://localhost:8080/api/v1".into());
        let creds = config.credentials().unwrap();
        assert_eq!(creds.api_key, "sk-1");
        assert_eq!(creds.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut config = VeniceConfig::default();
        config.credentials.api_key = Some("sk-secret".into());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<VeniceConfig>("[run]\ncontinue_on_fial = true\n");
        assert!(result.is_err());
    }
}
