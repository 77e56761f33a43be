use regex::Regex;
use std::sync::LazyLock;

use crate::error::ConfigError;

pub const DEFAULT_APP_NAME: &str = "advanced-quiz-bot";

const MAX_APP_NAME_LEN: usize = 63;

static APP_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

/// Name of the remote app, fixed for one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    name: String,
}

impl AppIdentity {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.len() > MAX_APP_NAME_LEN || !APP_NAME_RE.is_match(&name) {
            return Err(ConfigError::InvalidAppName(name));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
        }
    }
}
