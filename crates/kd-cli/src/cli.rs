use std::path::PathBuf;

use clap::{ArgAction, Parser};

use kd_core::error::ConfigError;
use kd_core::models::{AppIdentity, ProjectFile};
use kd_core::services::orchestrator::RunOptions;
use kd_core::services::planner::PlanDefaults;
use kd_core::services::tool_probe::InstallPolicy;

#[derive(Debug, Parser)]
#[command(name = "orchestrate")]
#[command(about = "Deploy the quiz bot web service to Koyeb")]
#[command(version)]
pub struct Cli {
    /// Koyeb app name (defaults to advanced-quiz-bot)
    pub app_name: Option<String>,

    /// Install the koyeb CLI automatically when it is missing
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub auto_install: bool,

    /// Validate and plan, print the service command, create nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Query the state of an already deployed service instead of deploying
    #[arg(long, conflicts_with = "dry_run")]
    pub status: bool,

    /// Service name (defaults to the app name)
    #[arg(long)]
    pub service: Option<String>,

    /// Platform domain used to build the public URL
    #[arg(long)]
    pub domain: Option<String>,

    /// Git repository the service is built from
    #[arg(long, value_name = "REPO")]
    pub git: Option<String>,

    /// Project file (defaults to .kd-deploy.yaml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a debug log to .kd-orchestrate-debug.log
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Merge flags over the project file over built-in defaults.
    pub fn run_options(&self, file: &ProjectFile) -> Result<RunOptions, ConfigError> {
        let identity = match self.app_name.as_ref().or(file.app_name.as_ref()) {
            Some(name) => AppIdentity::new(name.clone())?,
            None => AppIdentity::default(),
        };

        let mut defaults = PlanDefaults::default().with_project_file(file);
        if let Some(ref service) = self.service {
            defaults.service_name = Some(service.clone());
        }
        if let Some(ref domain) = self.domain {
            defaults.platform_domain = domain.clone();
        }
        if let Some(ref repo) = self.git {
            defaults.git_repository = Some(repo.clone());
        }

        Ok(RunOptions {
            identity,
            install_policy: InstallPolicy::from(self.auto_install),
            dry_run: self.dry_run,
            defaults,
        })
    }
}
