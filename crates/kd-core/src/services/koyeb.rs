use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ToolError;

pub const BINARY_NAME: &str = "koyeb";
pub const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/koyeb/koyeb-cli/master/install.sh";

/// Captured result of one platform CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    /// Short human-readable reason for a failed invocation.
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        let detail = if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        };
        match (self.code, detail.is_empty()) {
            (Some(code), true) => format!("exit {code}"),
            (Some(code), false) => format!("exit {code}: {detail}"),
            (None, true) => "terminated by signal".to_string(),
            (None, false) => format!("terminated by signal: {detail}"),
        }
    }
}

/// The deployment platform as seen through its command-line tool.
#[async_trait]
pub trait PlatformCli: Send + Sync {
    /// Path of the CLI binary, if it can be resolved.
    fn locate(&self) -> Option<PathBuf>;

    /// Install the CLI. Blocks until the installer exits.
    async fn install(&self) -> Result<(), ToolError>;

    /// Run the CLI with `args`, capturing its output.
    async fn run(&self, args: &[String]) -> std::io::Result<CliOutput>;
}

/// [`PlatformCli`] backed by the real `koyeb` binary.
#[derive(Debug, Clone)]
pub struct KoyebCli {
    home: Option<PathBuf>,
}

impl KoyebCli {
    pub fn new() -> Self {
        Self {
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// Where the install script puts the binary; usually not on PATH yet
    /// in the shell that ran the installer.
    fn install_dir_binary(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|h| h.join(".koyeb").join("bin").join(BINARY_NAME))
    }
}

impl Default for KoyebCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformCli for KoyebCli {
    fn locate(&self) -> Option<PathBuf> {
        which::which(BINARY_NAME)
            .ok()
            .or_else(|| self.install_dir_binary().filter(|p| p.is_file()))
    }

    async fn install(&self) -> Result<(), ToolError> {
        let script = format!("curl -fsSL {INSTALL_SCRIPT_URL} | sh");
        tracing::info!(url = INSTALL_SCRIPT_URL, "running koyeb install script");
        let status = Command::new("sh")
            .args(["-c", &script])
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ToolError::ToolInstallFailed(format!("failed to start sh: {e}")))?;

        if !status.success() {
            return Err(ToolError::ToolInstallFailed(format!(
                "install script failed (exit {})",
                status.code().unwrap_or(-1)
            )));
        }
        Ok(())
    }

    async fn run(&self, args: &[String]) -> std::io::Result<CliOutput> {
        let binary = self.locate().unwrap_or_else(|| PathBuf::from(BINARY_NAME));
        let output = Command::new(&binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CliOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reason_prefers_stderr() {
        let out = CliOutput {
            success: false,
            code: Some(1),
            stdout: "ignored".into(),
            stderr: "Error: app already exists\n".into(),
        };
        assert_eq!(out.failure_reason(), "exit 1: Error: app already exists");
    }

    #[test]
    fn failure_reason_falls_back_to_stdout_then_code() {
        let out = CliOutput {
            success: false,
            code: Some(2),
            stdout: "unauthorized".into(),
            stderr: String::new(),
        };
        assert_eq!(out.failure_reason(), "exit 2: unauthorized");

        let silent = CliOutput {
            code: Some(3),
            ..CliOutput::default()
        };
        assert_eq!(silent.failure_reason(), "exit 3");
    }

    #[test]
    fn install_dir_binary_is_under_home() {
        let cli = KoyebCli {
            home: Some(PathBuf::from("/home/ops")),
        };
        assert_eq!(
            cli.install_dir_binary(),
            Some(PathBuf::from("/home/ops/.koyeb/bin/koyeb"))
        );
    }

    #[test]
    fn locate_ignores_missing_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = KoyebCli {
            home: Some(dir.path().to_path_buf()),
        };
        // Only meaningful when koyeb is not installed on the test machine.
        if which::which(BINARY_NAME).is_err() {
            assert_eq!(cli.locate(), None);
        }
    }

    #[test]
    fn locate_finds_binary_in_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        let bin_dir = dir.path().join(".koyeb").join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(bin_dir.join(BINARY_NAME), "#!/bin/sh\n").unwrap();
        let cli = KoyebCli {
            home: Some(dir.path().to_path_buf()),
        };
        assert!(cli.locate().is_some());
    }
}
