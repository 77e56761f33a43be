use std::fmt;

/// Position of a run in the provisioning sequence.
///
/// `Reporting` and `Failed` are terminal. Every other stage either advances
/// to its successor or drops straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validating,
    ToolChecking,
    Authenticating,
    Planning,
    CreatingApp,
    CreatingService,
    Reporting,
    Failed,
}

impl Stage {
    pub const INITIAL: Stage = Stage::Validating;

    /// The single transition function of the orchestrator.
    pub fn advance(self, step_succeeded: bool) -> Stage {
        if self.is_terminal() {
            return self;
        }
        if !step_succeeded {
            return Stage::Failed;
        }
        match self {
            Stage::Validating => Stage::ToolChecking,
            Stage::ToolChecking => Stage::Authenticating,
            Stage::Authenticating => Stage::Planning,
            Stage::Planning => Stage::CreatingApp,
            Stage::CreatingApp => Stage::CreatingService,
            Stage::CreatingService => Stage::Reporting,
            Stage::Reporting | Stage::Failed => self,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Reporting | Stage::Failed)
    }

    /// Process exit code for a run that stopped in this stage.
    pub fn exit_code(self) -> u8 {
        match self {
            Stage::Reporting => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Validating => "validating configuration",
            Stage::ToolChecking => "checking koyeb CLI",
            Stage::Authenticating => "checking authentication",
            Stage::Planning => "planning deployment",
            Stage::CreatingApp => "creating app",
            Stage::CreatingService => "creating service",
            Stage::Reporting => "reporting",
            Stage::Failed => "failed",
        };
        f.write_str(label)
    }
}
