//! Per-invocation settings: where the project lives and which interpreter to use.

use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the registry file kept in the project directory.
pub const REGISTRY_FILE: &str = ".framepython.json";

/// Environment variable overriding the Python interpreter.
pub const PYTHON_ENV: &str = "FRAMEPYTHON_PYTHON";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "FRAMEPYTHON_LOG";

/// Settings threaded through every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub python: String,
}

impl Settings {
    /// Build settings from the optional `--project-dir` flag and the environment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no project directory was given and the current
    /// directory cannot be determined.
    pub fn from_env(project_dir: Option<PathBuf>) -> Result<Self> {
        let project_dir = match project_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Self {
            project_dir,
            python: resolve_python(std::env::var_os(PYTHON_ENV)),
        })
    }

    /// Settings for an explicit directory and interpreter.
    pub fn new(project_dir: impl Into<PathBuf>, python: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            python: python.into(),
        }
    }

    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.project_dir.join(REGISTRY_FILE)
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

/// Pick the interpreter: explicit override, then `python3`, then `python`.
#[must_use]
pub fn resolve_python(override_value: Option<OsString>) -> String {
    if let Some(value) = override_value
        && !value.is_empty()
    {
        return value.to_string_lossy().into_owned();
    }
    if which::which("python3").is_ok() {
        "python3".to_string()
    } else {
        "python".to_string()
    }
}
