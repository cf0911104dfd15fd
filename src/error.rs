//! Error type shared by every command.

use std::path::PathBuf;

/// Message printed when a command needs a registry and none exists.
pub const NO_REGISTRY_MESSAGE: &str =
    "[framepython] No project registered yet. Run --register first.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No registry file in the project directory.
    #[error("{}", NO_REGISTRY_MESSAGE)]
    RegistryMissing { path: PathBuf },

    /// The requested alias is not in the registry.
    #[error("[framepython] {0} not registered.")]
    AliasUnknown(String),

    /// `pip install` exited abnormally.
    #[error("[framepython] Failed to install {name} (pip {})", describe_exit(*code))]
    InstallFailed { name: String, code: Option<i32> },

    /// The interpreter (or another helper program) could not be started.
    #[error("[framepython] Could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[framepython] I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[framepython] Invalid registry file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
