use crate::error::{OrchestratorError, Result};
use crate::models::{
    AppIdentity, ConfigWarning, DeploymentConfig, Environment, ServiceDescriptor, Stage,
};

use super::koyeb::PlatformCli;
use super::planner::{self, PlanDefaults};
use super::provisioner::{self, AppCreation};
use super::tool_probe::{self, InstallPolicy};
use super::{auth, config_validator};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub identity: AppIdentity,
    pub install_policy: InstallPolicy,
    /// Plan and print the service command without creating anything remotely.
    pub dry_run: bool,
    pub defaults: PlanDefaults,
}

impl RunOptions {
    fn service_name(&self) -> &str {
        self.defaults
            .service_name
            .as_deref()
            .unwrap_or(self.identity.name())
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub public_url: String,
    /// `<app>/<service>`.
    pub service: String,
    /// `None` on a dry run.
    pub app: Option<AppCreation>,
    /// Redacted `service create` arguments, set on a dry run only.
    pub planned_command: Option<Vec<String>>,
}

impl Deployment {
    pub fn status_hint(&self) -> String {
        format!("koyeb service get {}", self.service)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub visited: Vec<Stage>,
    pub warnings: Vec<ConfigWarning>,
    pub outcome: Result<Deployment>,
}

impl RunReport {
    pub fn final_stage(&self) -> Stage {
        self.visited.last().copied().unwrap_or(Stage::INITIAL)
    }

    /// The stage whose step failed, if the run ended in `Failed`.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self.visited.as_slice() {
            [.., last_ok, Stage::Failed] => Some(*last_ok),
            _ => None,
        }
    }

    pub fn reached(&self, stage: Stage) -> bool {
        self.visited.contains(&stage)
    }

    pub fn exit_code(&self) -> u8 {
        self.final_stage().exit_code()
    }
}

/// Values produced by earlier stages and consumed by later ones.
#[derive(Default)]
struct RunContext {
    config: Option<DeploymentConfig>,
    warnings: Vec<ConfigWarning>,
    descriptor: Option<ServiceDescriptor>,
    app: Option<AppCreation>,
}

pub struct Orchestrator<P> {
    platform: P,
    options: RunOptions,
}

impl<P: PlatformCli> Orchestrator<P> {
    pub fn new(platform: P, options: RunOptions) -> Self {
        Self { platform, options }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Drive a full deployment. Stops at the first failing stage; nothing
    /// is retried and nothing already created is removed.
    pub async fn run(&self, env: &Environment) -> RunReport {
        let mut ctx = RunContext::default();
        let mut stage = Stage::INITIAL;
        let mut visited = vec![stage];
        let mut failure: Option<OrchestratorError> = None;

        while !stage.is_terminal() {
            tracing::info!(%stage, "entering stage");
            let succeeded = match self.step(stage, env, &mut ctx).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(%stage, error = %e, "stage failed");
                    failure = Some(e);
                    false
                }
            };
            stage = stage.advance(succeeded);
            visited.push(stage);
        }

        let outcome = match (failure, ctx.descriptor) {
            (Some(e), _) => Err(e),
            (None, Some(descriptor)) => Ok(Deployment {
                public_url: descriptor.public_url(),
                service: descriptor.qualified_service(),
                app: ctx.app,
                planned_command: self.options.dry_run.then(|| descriptor.redacted_args()),
            }),
            (None, None) => unreachable!("reporting is only reached after planning"),
        };

        RunReport {
            visited,
            warnings: ctx.warnings,
            outcome,
        }
    }

    async fn step(&self, stage: Stage, env: &Environment, ctx: &mut RunContext) -> Result<()> {
        match stage {
            Stage::Validating => {
                let validated = config_validator::validate(env)?;
                ctx.warnings = validated.warnings;
                ctx.config = Some(validated.config);
            }
            Stage::ToolChecking => {
                tool_probe::ensure_tool_present(&self.platform, self.options.install_policy)
                    .await?;
            }
            Stage::Authenticating => auth::ensure_authenticated(&self.platform).await?,
            Stage::Planning => {
                let Some(ref config) = ctx.config else {
                    unreachable!("planning is only reached after validation");
                };
                ctx.descriptor = Some(planner::plan(
                    config,
                    &self.options.identity,
                    &self.options.defaults,
                ));
            }
            Stage::CreatingApp if self.options.dry_run => {
                tracing::info!("dry run, skipping app creation");
            }
            Stage::CreatingApp => {
                let created =
                    provisioner::create_app(&self.platform, &self.options.identity).await?;
                ctx.app = Some(created);
            }
            Stage::CreatingService if self.options.dry_run => {
                tracing::info!("dry run, skipping service creation");
            }
            Stage::CreatingService => {
                let Some(ref descriptor) = ctx.descriptor else {
                    unreachable!("service creation is only reached after planning");
                };
                provisioner::create_service(&self.platform, descriptor).await?;
            }
            Stage::Reporting | Stage::Failed => {}
        }
        Ok(())
    }

    /// Check the tool and session, then query the service's state.
    pub async fn status(&self) -> Result<String> {
        tool_probe::ensure_tool_present(&self.platform, self.options.install_policy).await?;
        auth::ensure_authenticated(&self.platform).await?;
        let status = provisioner::service_status(
            &self.platform,
            self.options.identity.name(),
            self.options.service_name(),
        )
        .await?;
        Ok(status)
    }
}
