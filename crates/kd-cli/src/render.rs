use kd_core::models::{ConfigWarning, Stage};
use kd_core::services::koyeb::BINARY_NAME;
use kd_core::services::orchestrator::Deployment;
use kd_core::services::provisioner::AppCreation;
use kd_core::OrchestratorError;

pub fn warnings(warnings: &[ConfigWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!("warning: {w}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn success(deployment: &Deployment) -> String {
    let mut lines = Vec::new();
    match deployment.planned_command {
        Some(ref args) => {
            lines.push("Dry run: nothing was created.".to_string());
            lines.push(format!("Would run: {}", command_line(args)));
        }
        None => {
            let app = match deployment.app {
                Some(AppCreation::AlreadyExisted) => "existing app reused",
                _ => "app created",
            };
            lines.push(format!(
                "Deployment submitted for {} ({app})",
                deployment.service
            ));
        }
    }
    lines.push(format!("Public URL: {}", deployment.public_url));
    if deployment.planned_command.is_none() {
        lines.push(format!(
            "Check deployment status with: {}",
            deployment.status_hint()
        ));
    }
    lines.join("\n")
}

pub fn failure(stage: Option<Stage>, error: &OrchestratorError) -> String {
    let headline = match stage {
        Some(stage) => format!("error ({stage}): {error}"),
        None => format!("error: {error}"),
    };
    std::iter::once(headline)
        .chain(error.hint().lines().map(|l| format!("hint: {l}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a `koyeb` invocation so it can be pasted into a shell.
fn command_line(args: &[String]) -> String {
    std::iter::once(BINARY_NAME.to_string())
        .chain(args.iter().map(|a| shell_quote(a)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kd_core::error::{ConfigError, ProvisionError};

    fn deployment() -> Deployment {
        Deployment {
            public_url: "https://advanced-quiz-bot.koyeb.app".into(),
            service: "advanced-quiz-bot/advanced-quiz-bot".into(),
            app: Some(AppCreation::Created),
            planned_command: None,
        }
    }

    #[test]
    fn success_report() {
        insta::assert_snapshot!(success(&deployment()), @r"
        Deployment submitted for advanced-quiz-bot/advanced-quiz-bot (app created)
        Public URL: https://advanced-quiz-bot.koyeb.app
        Check deployment status with: koyeb service get advanced-quiz-bot/advanced-quiz-bot
        ");
    }

    #[test]
    fn success_report_for_reused_app() {
        let reused = Deployment {
            app: Some(AppCreation::AlreadyExisted),
            ..deployment()
        };
        assert!(success(&reused).contains("(existing app reused)"));
    }

    #[test]
    fn dry_run_report_quotes_arguments() {
        let planned = Deployment {
            app: None,
            planned_command: Some(
                [
                    "service",
                    "create",
                    "advanced-quiz-bot",
                    "--git-run-command",
                    "gunicorn --bind 0.0.0.0:$PORT main:app",
                    "--env",
                    "SESSION_SECRET=********",
                ]
                .map(String::from)
                .to_vec(),
            ),
            ..deployment()
        };
        insta::assert_snapshot!(success(&planned), @r"
        Dry run: nothing was created.
        Would run: koyeb service create advanced-quiz-bot --git-run-command 'gunicorn --bind 0.0.0.0:$PORT main:app' --env 'SESSION_SECRET=********'
        Public URL: https://advanced-quiz-bot.koyeb.app
        ");
    }

    #[test]
    fn failure_report_includes_stage_and_hints() {
        let error = OrchestratorError::from(ConfigError::MissingRequired(vec![
            "TELEGRAM_BOT_TOKEN",
            "DATABASE_URL",
        ]));
        insta::assert_snapshot!(failure(Some(Stage::Validating), &error), @r"
        error (validating configuration): missing required environment variables: TELEGRAM_BOT_TOKEN, DATABASE_URL
        hint: export TELEGRAM_BOT_TOKEN=<value>
        hint: export DATABASE_URL=<value>
        ");
    }

    #[test]
    fn service_failure_names_the_service_only() {
        let error = OrchestratorError::from(ProvisionError::ServiceCreateFailed {
            service: "advanced-quiz-bot/advanced-quiz-bot".into(),
            reason: "exit 1: Error: invalid port".into(),
        });
        let rendered = failure(Some(Stage::CreatingService), &error);
        assert!(rendered.starts_with("error (creating service): failed to create service"));
        assert!(rendered.contains("hint: the app was left in place"));
    }

    #[test]
    fn warnings_are_prefixed() {
        let out = warnings(&[ConfigWarning::AdminDisabled]);
        assert_eq!(
            out,
            "warning: OWNER_ID is not set; admin features will be disabled"
        );
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("plain-arg"), "plain-arg");
        assert_eq!(shell_quote(""), "''");
    }
}
