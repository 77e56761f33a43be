use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use kd_cli::cli::Cli;
use kd_cli::{logging, render};
use kd_core::models::{Environment, Stage};
use kd_core::services::koyeb::KoyebCli;
use kd_core::services::orchestrator::Orchestrator;
use kd_core::services::project_file;
use kd_core::OrchestratorError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _guard = logging::init(cli.debug);

    // Load .env before taking the snapshot; variables already exported win.
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
    let env = Environment::capture();

    let project = match cli.config {
        Some(ref path) => project_file::load(path),
        None => project_file::load_from_dir(Path::new(".")),
    };
    let options = match project.and_then(|file| cli.run_options(&file)) {
        Ok(options) => options,
        Err(e) => {
            let error = OrchestratorError::from(e);
            eprintln!("{}", render::failure(Some(Stage::Validating), &error));
            return Ok(ExitCode::FAILURE);
        }
    };

    let orchestrator = Orchestrator::new(KoyebCli::new(), options);

    if cli.status {
        return Ok(match orchestrator.status().await {
            Ok(status) => {
                println!("{status}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", render::failure(None, &e));
                ExitCode::FAILURE
            }
        });
    }

    let report = orchestrator.run(&env).await;
    if !report.warnings.is_empty() {
        eprintln!("{}", render::warnings(&report.warnings));
    }
    match report.outcome {
        Ok(ref deployment) => println!("{}", render::success(deployment)),
        Err(ref e) => eprintln!("{}", render::failure(report.failed_stage(), e)),
    }
    Ok(ExitCode::from(report.exit_code()))
}
