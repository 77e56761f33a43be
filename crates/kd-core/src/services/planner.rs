use std::time::Duration;

use crate::models::service::PLATFORM_PORT_VAR;
use crate::models::{
    AppIdentity, DeploymentConfig, EnvVar, HealthCheck, PortMapping, ProjectFile, ScalingBounds,
    ServiceDescriptor,
};

use super::config_validator::{DATABASE_URL, OWNER_ID, SESSION_SECRET, TELEGRAM_BOT_TOKEN};

pub const DEFAULT_BUILD_COMMAND: &str = "pip install -r requirements.txt";
pub const DEFAULT_RUN_COMMAND: &str = "gunicorn --bind 0.0.0.0:$PORT main:app";
pub const DEFAULT_PLATFORM_DOMAIN: &str = "koyeb.app";

pub const HEALTH_CHECK_PATH: &str = "/health";
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(15);
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
pub const HEALTH_CHECK_GRACE_PERIOD: Duration = Duration::from_secs(30);
pub const EXTERNAL_PORT: u16 = 80;
pub const SCALING: ScalingBounds = ScalingBounds { min: 1, max: 1 };

/// Variable the deployed app reads to build links back to itself.
pub const WEB_APP_URL: &str = "WEB_APP_URL";

/// Overridable parts of the plan. Scaling, ports and health checking are
/// fixed policy and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDefaults {
    /// Service name; `None` reuses the app name.
    pub service_name: Option<String>,
    pub git_repository: Option<String>,
    pub build_command: String,
    pub run_command: String,
    pub platform_domain: String,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            service_name: None,
            git_repository: None,
            build_command: DEFAULT_BUILD_COMMAND.to_string(),
            run_command: DEFAULT_RUN_COMMAND.to_string(),
            platform_domain: DEFAULT_PLATFORM_DOMAIN.to_string(),
        }
    }
}

impl PlanDefaults {
    /// Apply values from a project file on top of the built-in defaults.
    pub fn with_project_file(mut self, file: &ProjectFile) -> Self {
        if let Some(ref name) = file.service_name {
            self.service_name = Some(name.clone());
        }
        if let Some(ref cmd) = file.build_command {
            self.build_command = cmd.clone();
        }
        if let Some(ref cmd) = file.run_command {
            self.run_command = cmd.clone();
        }
        if let Some(ref domain) = file.platform_domain {
            self.platform_domain = domain.clone();
        }
        self
    }
}

/// Assemble the service descriptor. Pure; inputs are already validated.
pub fn plan(
    config: &DeploymentConfig,
    identity: &AppIdentity,
    defaults: &PlanDefaults,
) -> ServiceDescriptor {
    let app_name = identity.name().to_string();
    let public_url = crate::models::service::public_url(&app_name, &defaults.platform_domain);

    let mut env = vec![
        EnvVar::sensitive(TELEGRAM_BOT_TOKEN, &config.bot_token),
        EnvVar::sensitive(DATABASE_URL, &config.database_url),
        EnvVar::sensitive(SESSION_SECRET, &config.session_secret),
    ];
    if let Some(ref owner) = config.owner_id {
        env.push(EnvVar::plain(OWNER_ID, owner.clone()));
    }
    env.push(EnvVar::plain(WEB_APP_URL, public_url));

    ServiceDescriptor {
        service_name: defaults
            .service_name
            .clone()
            .unwrap_or_else(|| app_name.clone()),
        app_name,
        git_repository: defaults.git_repository.clone(),
        build_command: defaults.build_command.clone(),
        run_command: defaults.run_command.clone(),
        ports: PortMapping {
            external: EXTERNAL_PORT,
            protocol: "http",
            target: PLATFORM_PORT_VAR,
        },
        health_check: HealthCheck {
            path: HEALTH_CHECK_PATH,
            port: PLATFORM_PORT_VAR,
            interval: HEALTH_CHECK_INTERVAL,
            timeout: HEALTH_CHECK_TIMEOUT,
            grace_period: HEALTH_CHECK_GRACE_PERIOD,
        },
        scaling: SCALING,
        env,
        platform_domain: defaults.platform_domain.clone(),
    }
}
