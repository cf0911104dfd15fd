//! Project registration: scan a folder, alias its Python files, record and
//! install the dependencies, and replace the registry.

use crate::error::Result;
use crate::installer;
use crate::registry::{Registry, RegistryStore, alias_for};
use crate::toolchain::Toolchain;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Folder argument meaning "the project directory itself".
pub const CURRENT_FOLDER: &str = "current";

/// Extension of the files picked up by a scan.
pub const SOURCE_EXTENSION: &str = ".py";

const DEPENDENCY_PROMPT: &str = "Enter libraries (comma+space separated): ";

/// Map the `current` sentinel to `.`; anything else is used as given.
#[must_use]
pub fn normalize_folder(folder: &str) -> &str {
    if folder == CURRENT_FOLDER { "." } else { folder }
}

/// Python files directly inside `folder` (relative to `project_dir`), as
/// paths relative to `project_dir`, in directory listing order.
///
/// # Errors
///
/// Returns `Err` if the folder cannot be read.
pub fn scan_folder(project_dir: &Path, folder: &str) -> Result<Vec<String>> {
    let folder = normalize_folder(folder);
    let mut files = Vec::new();

    for entry in fs::read_dir(project_dir.join(folder))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // `Path::is_file` follows symlinks, so linked scripts are kept.
        if !name.ends_with(SOURCE_EXTENSION) || !entry.path().is_file() {
            continue;
        }
        files.push(relative_path(folder, &name));
    }

    tracing::debug!(folder, count = files.len(), "scanned folder");
    Ok(files)
}

fn relative_path(folder: &str, name: &str) -> String {
    if folder == "." {
        name.to_string()
    } else {
        PathBuf::from(folder).join(name).to_string_lossy().into_owned()
    }
}

/// Build a registry from scanned files, assigning aliases by position.
#[must_use]
pub fn build_registry(files: Vec<String>, dependencies: Vec<String>) -> Registry {
    Registry {
        files: files
            .into_iter()
            .enumerate()
            .map(|(index, path)| (alias_for(index), path))
            .collect(),
        dependencies,
    }
}

/// Ask for the dependency list on `input`. End of input counts as "none".
///
/// # Errors
///
/// Returns `Err` if reading or writing fails.
pub fn prompt_dependencies(
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Vec<String>> {
    write!(out, "{DEPENDENCY_PROMPT}")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(installer::parse_dependency_list(&answer))
}

/// Register `folder`, replacing whatever registry existed before.
///
/// # Errors
///
/// Returns `Err` if the folder cannot be scanned, a dependency fails to
/// install, or the registry cannot be written. The previous registry is left
/// untouched in all of these cases.
pub fn register(
    store: &RegistryStore,
    toolchain: &dyn Toolchain,
    project_dir: &Path,
    folder: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Registry> {
    let files = scan_folder(project_dir, folder)?;
    let dependencies = prompt_dependencies(input, out)?;
    let registry = build_registry(files, dependencies);

    installer::ensure_installed(toolchain, &registry.dependencies, out)?;

    store.save(&registry)?;
    writeln!(out, "[framepython] Project registered!")?;
    Ok(registry)
}
