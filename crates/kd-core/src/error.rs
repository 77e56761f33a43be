use std::path::PathBuf;

pub const MANUAL_INSTALL_URL: &str = "https://www.koyeb.com/docs/build-and-deploy/cli/installation";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("invalid app name '{0}': use lowercase letters, digits and hyphens (max 63 chars)")]
    InvalidAppName(String),

    #[error("invalid project file {path}: {reason}")]
    ProjectFile { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("koyeb CLI not found on PATH")]
    ToolMissing,

    #[error("koyeb CLI installation failed: {0}")]
    ToolInstallFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("koyeb CLI is not authenticated: {0}")]
    NotAuthenticated(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("failed to create app '{app}': {reason}")]
    AppCreateFailed { app: String, reason: String },

    #[error("failed to create service '{service}': {reason}")]
    ServiceCreateFailed { service: String, reason: String },

    #[error("failed to query service '{target}': {reason}")]
    StatusFailed { target: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

impl OrchestratorError {
    /// Remediation text shown to the operator under the error itself.
    pub fn hint(&self) -> String {
        match self {
            Self::Config(ConfigError::MissingRequired(fields)) => fields
                .iter()
                .map(|f| format!("export {f}=<value>"))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Config(ConfigError::InvalidAppName(_)) => {
                "pass a name such as `orchestrate advanced-quiz-bot`".to_string()
            }
            Self::Config(ConfigError::ProjectFile { path, .. }) => {
                format!("fix or remove {}", path.display())
            }
            Self::Tool(ToolError::ToolMissing) => format!(
                "install it manually from {MANUAL_INSTALL_URL} or rerun with --auto-install=true"
            ),
            Self::Tool(ToolError::ToolInstallFailed(_)) => {
                format!("install it manually from {MANUAL_INSTALL_URL}")
            }
            Self::Auth(_) => "run `koyeb login` and try again".to_string(),
            Self::Provision(ProvisionError::AppCreateFailed { app, .. }) => {
                format!("inspect existing apps with `koyeb app get {app}`")
            }
            Self::Provision(ProvisionError::ServiceCreateFailed { service, .. }) => format!(
                "the app was left in place; inspect it with `koyeb service list` or remove `{service}` before retrying"
            ),
            Self::Provision(ProvisionError::StatusFailed { .. }) => {
                "check that the app and service names are correct".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
