use crate::error::AuthError;

use super::koyeb::PlatformCli;

/// Verify the platform CLI holds a valid session. Never attempts a login.
pub async fn ensure_authenticated(platform: &dyn PlatformCli) -> Result<(), AuthError> {
    let args = ["auth".to_string(), "check".to_string()];
    let output = platform
        .run(&args)
        .await
        .map_err(|e| AuthError::NotAuthenticated(format!("failed to run koyeb: {e}")))?;

    if !output.success {
        return Err(AuthError::NotAuthenticated(output.failure_reason()));
    }
    tracing::debug!("koyeb session valid");
    Ok(())
}
