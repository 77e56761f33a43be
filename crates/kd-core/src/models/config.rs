use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// A configuration value that must never reach logs or terminal output.
pub struct Secret(SecretString);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Be careful with the returned reference: it is the raw value.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Settings the deployed service needs, read once from the environment.
#[derive(Debug)]
pub struct DeploymentConfig {
    pub bot_token: Secret,
    pub database_url: Secret,
    pub owner_id: Option<String>,
    pub session_secret: Secret,
    /// True when `session_secret` was minted during this run.
    pub session_secret_generated: bool,
}

/// Non-fatal findings from validation, surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `OWNER_ID` is unset so admin commands in the bot are disabled.
    AdminDisabled,
    /// `SESSION_SECRET` was generated; it changes on every run.
    SessionSecretGenerated,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdminDisabled => {
                write!(f, "OWNER_ID is not set; admin features will be disabled")
            }
            Self::SessionSecretGenerated => write!(
                f,
                "SESSION_SECRET is not set; a random one was generated for this deployment \
                 (export SESSION_SECRET to keep sessions valid across redeploys)"
            ),
        }
    }
}

#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: DeploymentConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Optional per-project overrides read from `.kd-deploy.yaml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub build_command: Option<String>,
    #[serde(default)]
    pub run_command: Option<String>,
    #[serde(default)]
    pub platform_domain: Option<String>,
}
