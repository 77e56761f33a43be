// Each test binary compiles this module independently and uses a different
// subset of helpers, so unused-function warnings are expected.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use kd_core::error::ToolError;
use kd_core::models::Environment;
use kd_core::services::koyeb::{CliOutput, PlatformCli};

pub fn ok(stdout: &str) -> CliOutput {
    CliOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn fail(stderr: &str) -> CliOutput {
    CliOutput {
        success: false,
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Scripted stand-in for the koyeb CLI that records every invocation.
pub struct FakePlatform {
    installed: AtomicBool,
    install_result: Option<String>,
    install_provides_binary: bool,
    installs: AtomicUsize,
    auth: CliOutput,
    app_create: CliOutput,
    service_create: CliOutput,
    service_get: CliOutput,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakePlatform {
    /// Installed, logged in, and every remote call succeeds.
    pub fn healthy() -> Self {
        Self {
            installed: AtomicBool::new(true),
            install_result: None,
            install_provides_binary: true,
            installs: AtomicUsize::new(0),
            auth: ok("authenticated"),
            app_create: ok("app created"),
            service_create: ok("service created"),
            service_get: ok("HEALTHY"),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn not_installed(self) -> Self {
        self.installed.store(false, Ordering::SeqCst);
        self
    }

    pub fn install_fails(mut self, reason: &str) -> Self {
        self.install_result = Some(reason.to_string());
        self
    }

    pub fn install_leaves_binary_missing(mut self) -> Self {
        self.install_provides_binary = false;
        self
    }

    pub fn with_auth(mut self, output: CliOutput) -> Self {
        self.auth = output;
        self
    }

    pub fn with_app_create(mut self, output: CliOutput) -> Self {
        self.app_create = output;
        self
    }

    pub fn with_service_create(mut self, output: CliOutput) -> Self {
        self.service_create = output;
        self
    }

    pub fn with_service_get(mut self, output: CliOutput) -> Self {
        self.service_get = output;
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// First two words of every invocation, e.g. `"app create"`.
    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.iter().take(2).cloned().collect::<Vec<_>>().join(" "))
            .collect()
    }

    pub fn install_count(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformCli for FakePlatform {
    fn locate(&self) -> Option<PathBuf> {
        self.installed
            .load(Ordering::SeqCst)
            .then(|| PathBuf::from("/usr/local/bin/koyeb"))
    }

    async fn install(&self) -> Result<(), ToolError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if let Some(ref reason) = self.install_result {
            return Err(ToolError::ToolInstallFailed(reason.clone()));
        }
        if self.install_provides_binary {
            self.installed.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn run(&self, args: &[String]) -> std::io::Result<CliOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        let words: Vec<&str> = args.iter().take(2).map(String::as_str).collect();
        let output = match words.as_slice() {
            ["auth", "check"] => self.auth.clone(),
            ["app", "create"] => self.app_create.clone(),
            ["service", "create"] => self.service_create.clone(),
            ["service", "get"] => self.service_get.clone(),
            _ => fail("unknown command"),
        };
        Ok(output)
    }
}

const FULL_ENV: [(&str, &str); 4] = [
    ("TELEGRAM_BOT_TOKEN", "123456:telegram-token"),
    ("DATABASE_URL", "postgres://quiz:pw@db.internal/quiz"),
    ("OWNER_ID", "1001"),
    ("SESSION_SECRET", "fixed-session-secret"),
];

pub fn full_env() -> Environment {
    env_without(&[])
}

pub fn env_without(keys: &[&str]) -> Environment {
    FULL_ENV
        .into_iter()
        .filter(|(k, _)| !keys.contains(k))
        .collect()
}
