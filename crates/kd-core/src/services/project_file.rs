use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::ProjectFile;

pub const PROJECT_FILENAME: &str = ".kd-deploy.yaml";

/// Load the project file from `dir`. A missing file yields the empty defaults.
pub fn load_from_dir(dir: &Path) -> Result<ProjectFile, ConfigError> {
    let path = dir.join(PROJECT_FILENAME);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no project file");
        return Ok(ProjectFile::default());
    }
    load(&path)
}

/// Load an explicitly named project file; it must exist.
pub fn load(path: &Path) -> Result<ProjectFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| project_error(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ProjectFile::default());
    }
    let file: ProjectFile = serde_yaml::from_str(&contents).map_err(|e| project_error(path, e))?;
    for (field, value) in [
        ("build_command", &file.build_command),
        ("run_command", &file.run_command),
        ("platform_domain", &file.platform_domain),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(project_error(path, format!("{field} must not be empty")));
        }
    }
    tracing::debug!(path = %path.display(), ?file, "loaded project file");
    Ok(file)
}

fn project_error(path: &Path, reason: impl ToString) -> ConfigError {
    ConfigError::ProjectFile {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}
