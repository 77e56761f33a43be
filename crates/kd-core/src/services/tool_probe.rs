use std::path::PathBuf;

use crate::error::ToolError;

use super::koyeb::PlatformCli;

/// What to do when the platform CLI is not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPolicy {
    /// Fail with install guidance.
    #[default]
    Never,
    /// Run the remote install script once, then check again.
    Auto,
}

impl From<bool> for InstallPolicy {
    fn from(auto_install: bool) -> Self {
        if auto_install {
            Self::Auto
        } else {
            Self::Never
        }
    }
}

/// Make sure the platform CLI can be run, installing it if allowed.
pub async fn ensure_tool_present(
    platform: &dyn PlatformCli,
    policy: InstallPolicy,
) -> Result<PathBuf, ToolError> {
    if let Some(path) = platform.locate() {
        tracing::debug!(path = %path.display(), "koyeb CLI found");
        return Ok(path);
    }

    match policy {
        InstallPolicy::Never => {
            tracing::info!("koyeb CLI missing and auto-install disabled");
            Err(ToolError::ToolMissing)
        }
        InstallPolicy::Auto => {
            tracing::info!("koyeb CLI missing, installing");
            platform.install().await?;
            platform.locate().ok_or_else(|| {
                ToolError::ToolInstallFailed(
                    "installer finished but the koyeb binary is still not resolvable".into(),
                )
            })
        }
    }
}
