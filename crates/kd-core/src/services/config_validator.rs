use crate::error::ConfigError;
use crate::models::{ConfigWarning, DeploymentConfig, Environment, Secret, ValidatedConfig};

use super::secrets::generate_session_secret;

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const OWNER_ID: &str = "OWNER_ID";
pub const SESSION_SECRET: &str = "SESSION_SECRET";

const REQUIRED: [&str; 2] = [TELEGRAM_BOT_TOKEN, DATABASE_URL];

/// Build the deployment config from an environment snapshot.
///
/// Fails when any required variable is absent or blank. A missing
/// `SESSION_SECRET` is generated, so every call without one yields a
/// different secret.
pub fn validate(env: &Environment) -> Result<ValidatedConfig, ConfigError> {
    let missing: Vec<&'static str> = REQUIRED
        .into_iter()
        .filter(|key| !env.contains(key))
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingRequired(missing));
    }

    let mut warnings = Vec::new();

    let owner_id = env.non_empty(OWNER_ID).map(str::to_string);
    if owner_id.is_none() {
        tracing::info!("{OWNER_ID} not set, admin features disabled");
        warnings.push(ConfigWarning::AdminDisabled);
    }

    let (session_secret, session_secret_generated) = match env.non_empty(SESSION_SECRET) {
        Some(value) => (Secret::new(value), false),
        None => {
            tracing::info!("{SESSION_SECRET} not set, generating one for this run");
            warnings.push(ConfigWarning::SessionSecretGenerated);
            (generate_session_secret(), true)
        }
    };

    let config = DeploymentConfig {
        // Presence checked above.
        bot_token: Secret::new(env.non_empty(TELEGRAM_BOT_TOKEN).unwrap_or_default()),
        database_url: Secret::new(env.non_empty(DATABASE_URL).unwrap_or_default()),
        owner_id,
        session_secret,
        session_secret_generated,
    };

    tracing::debug!(?warnings, "configuration validated");
    Ok(ValidatedConfig { config, warnings })
}
