use std::fmt;
use std::time::Duration;

use super::config::Secret;

/// Placeholder the platform substitutes with the port it assigns the service.
pub const PLATFORM_PORT_VAR: &str = "$PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub external: u16,
    pub protocol: &'static str,
    pub target: &'static str,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.external, self.protocol, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    pub path: &'static str,
    pub port: &'static str,
    pub interval: Duration,
    pub timeout: Duration,
    pub grace_period: Duration,
}

impl HealthCheck {
    /// `path:port` form expected by `--health-check`.
    pub fn spec(&self) -> String {
        format!("{}:{}", self.path, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingBounds {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug)]
pub enum EnvValue {
    Plain(String),
    Sensitive(Secret),
}

/// One `--env KEY=VALUE` pair passed to the service.
#[derive(Debug)]
pub struct EnvVar {
    pub key: &'static str,
    pub value: EnvValue,
}

impl EnvVar {
    pub fn plain(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: EnvValue::Plain(value.into()),
        }
    }

    pub fn sensitive(key: &'static str, value: &Secret) -> Self {
        Self {
            key,
            value: EnvValue::Sensitive(Secret::new(value.expose())),
        }
    }

    fn assignment(&self) -> String {
        match &self.value {
            EnvValue::Plain(v) => format!("{}={v}", self.key),
            EnvValue::Sensitive(s) => format!("{}={}", self.key, s.expose()),
        }
    }

    fn redacted_assignment(&self) -> String {
        match &self.value {
            EnvValue::Plain(v) => format!("{}={v}", self.key),
            EnvValue::Sensitive(_) => format!("{}=********", self.key),
        }
    }
}

/// Everything needed to create the remote service, assembled once per run.
///
/// Fields are only set by the planner; the public URL is derived from the
/// app name and platform domain on demand.
#[derive(Debug)]
pub struct ServiceDescriptor {
    pub(crate) app_name: String,
    pub(crate) service_name: String,
    pub(crate) git_repository: Option<String>,
    pub(crate) build_command: String,
    pub(crate) run_command: String,
    pub(crate) ports: PortMapping,
    pub(crate) health_check: HealthCheck,
    pub(crate) scaling: ScalingBounds,
    pub(crate) env: Vec<EnvVar>,
    pub(crate) platform_domain: String,
}

impl ServiceDescriptor {
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn build_command(&self) -> &str {
        &self.build_command
    }

    pub fn run_command(&self) -> &str {
        &self.run_command
    }

    pub fn ports(&self) -> &PortMapping {
        &self.ports
    }

    pub fn health_check(&self) -> &HealthCheck {
        &self.health_check
    }

    pub fn scaling(&self) -> ScalingBounds {
        self.scaling
    }

    pub fn env(&self) -> &[EnvVar] {
        &self.env
    }

    pub fn public_url(&self) -> String {
        public_url(&self.app_name, &self.platform_domain)
    }

    /// `<app>/<service>` identifier used by `koyeb service get`.
    pub fn qualified_service(&self) -> String {
        format!("{}/{}", self.app_name, self.service_name)
    }

    /// Full argument vector for `koyeb service create`, secrets included.
    pub fn service_create_args(&self) -> Vec<String> {
        self.build_args(EnvVar::assignment)
    }

    /// Same as [`service_create_args`](Self::service_create_args) with
    /// sensitive values masked, for display and logs.
    pub fn redacted_args(&self) -> Vec<String> {
        self.build_args(EnvVar::redacted_assignment)
    }

    fn build_args(&self, render_env: fn(&EnvVar) -> String) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "service".into(),
            "create".into(),
            self.service_name.clone(),
            "--app".into(),
            self.app_name.clone(),
            "--type".into(),
            "web".into(),
        ];
        if let Some(ref repo) = self.git_repository {
            args.extend(["--git".into(), repo.clone()]);
        }
        args.extend([
            "--git-build-command".into(),
            self.build_command.clone(),
            "--git-run-command".into(),
            self.run_command.clone(),
            "--ports".into(),
            self.ports.to_string(),
        ]);
        for var in &self.env {
            args.push("--env".into());
            args.push(render_env(var));
        }
        args.extend([
            "--health-check".into(),
            self.health_check.spec(),
            "--health-check-interval".into(),
            self.health_check.interval.as_secs().to_string(),
            "--health-check-timeout".into(),
            self.health_check.timeout.as_secs().to_string(),
            "--health-check-grace-period".into(),
            self.health_check.grace_period.as_secs().to_string(),
            "--min-scale".into(),
            self.scaling.min.to_string(),
            "--max-scale".into(),
            self.scaling.max.to_string(),
        ]);
        args
    }
}

pub fn public_url(app_name: &str, platform_domain: &str) -> String {
    format!("https://{app_name}.{platform_domain}")
}
