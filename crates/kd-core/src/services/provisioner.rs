use crate::error::ProvisionError;
use crate::models::{AppIdentity, ServiceDescriptor};

use super::koyeb::{CliOutput, PlatformCli};

/// How the app step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCreation {
    Created,
    /// The platform rejected creation because the name is taken; the
    /// existing app is reused.
    AlreadyExisted,
}

fn is_already_exists(output: &CliOutput) -> bool {
    let text = format!("{} {}", output.stderr, output.stdout).to_lowercase();
    text.contains("already exist")
}

/// Create the app. Re-running against an existing app is accepted.
pub async fn create_app(
    platform: &dyn PlatformCli,
    identity: &AppIdentity,
) -> Result<AppCreation, ProvisionError> {
    let app = identity.name();
    let args = ["app".to_string(), "create".to_string(), app.to_string()];
    tracing::debug!(?args, "creating app");

    let output = platform
        .run(&args)
        .await
        .map_err(|e| ProvisionError::AppCreateFailed {
            app: app.to_string(),
            reason: format!("failed to run koyeb: {e}"),
        })?;

    if output.success {
        return Ok(AppCreation::Created);
    }
    if is_already_exists(&output) {
        tracing::info!(app, "app already exists, reusing it");
        return Ok(AppCreation::AlreadyExisted);
    }
    Err(ProvisionError::AppCreateFailed {
        app: app.to_string(),
        reason: output.failure_reason(),
    })
}

/// Create the service. Any rejection, including "already exists", fails.
/// Nothing created earlier in the run is rolled back.
pub async fn create_service(
    platform: &dyn PlatformCli,
    descriptor: &ServiceDescriptor,
) -> Result<(), ProvisionError> {
    let service = descriptor.qualified_service();
    tracing::debug!(args = ?descriptor.redacted_args(), "creating service");

    let output = platform
        .run(&descriptor.service_create_args())
        .await
        .map_err(|e| ProvisionError::ServiceCreateFailed {
            service: service.clone(),
            reason: format!("failed to run koyeb: {e}"),
        })?;

    if !output.success {
        return Err(ProvisionError::ServiceCreateFailed {
            service,
            reason: output.failure_reason(),
        });
    }
    Ok(())
}

/// Query the platform for the service's current state.
pub async fn service_status(
    platform: &dyn PlatformCli,
    app: &str,
    service: &str,
) -> Result<String, ProvisionError> {
    let target = format!("{app}/{service}");
    let args = ["service".to_string(), "get".to_string(), target.clone()];

    let output = platform
        .run(&args)
        .await
        .map_err(|e| ProvisionError::StatusFailed {
            target: target.clone(),
            reason: format!("failed to run koyeb: {e}"),
        })?;

    if !output.success {
        return Err(ProvisionError::StatusFailed {
            target,
            reason: output.failure_reason(),
        });
    }
    Ok(output.stdout)
}
