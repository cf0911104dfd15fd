//! The project registry: aliases for registered files plus the declared dependencies.
//!
//! The registry lives in a single JSON file in the project directory:
//!
//! ```json
//! {
//!   "files": { ".FILE": "main.py", ".FILE2": "tools.py" },
//!   "dependencies": ["requests"]
//! }
//! ```
//!
//! It is only ever replaced as a whole; there is no merging of registrations.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Alias given to the first registered file.
pub const FIRST_ALIAS: &str = ".FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Alias -> path relative to the project directory, in registration order.
    #[serde(default)]
    pub files: IndexMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Registry {
    /// Look up the path registered under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasUnknown`] if the alias is not registered.
    pub fn resolve(&self, alias: &str) -> Result<&str> {
        self.files
            .get(alias)
            .map(String::as_str)
            .ok_or_else(|| Error::AliasUnknown(alias.to_string()))
    }

    /// Write the `--list` table.
    ///
    /// # Errors
    ///
    /// Returns `Err` if writing to `out` fails.
    pub fn write_listing(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "[framepython] Registered files:")?;
        for (alias, path) in &self.files {
            writeln!(out, "  {alias} -> {path}")?;
        }
        Ok(())
    }
}

/// Alias for the file at zero-based position `index`: `.FILE`, `.FILE2`, `.FILE3`, ...
#[must_use]
pub fn alias_for(index: usize) -> String {
    if index == 0 {
        FIRST_ALIAS.to_string()
    } else {
        format!("{FIRST_ALIAS}{}", index + 1)
    }
}

/// Loads and saves the registry file at a fixed path.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryMissing`] if the file does not exist, or an
    /// I/O or JSON error if it cannot be read or parsed.
    pub fn load(&self) -> Result<Registry> {
        if !self.exists() {
            return Err(Error::RegistryMissing {
                path: self.path.clone(),
            });
        }
        tracing::debug!(path = %self.path.display(), "loading registry");
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the registry file with `registry`, pretty-printed.
    ///
    /// The content goes to a temporary file next to the registry first and is
    /// then renamed over it, so readers never see a half-written registry.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or any filesystem step fails.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let json = serde_json::to_string_pretty(registry)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.flush()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            path = %self.path.display(),
            files = registry.files.len(),
            dependencies = registry.dependencies.len(),
            "saved registry"
        );
        Ok(())
    }
}
