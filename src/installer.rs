//! Dependency installation.

use crate::error::Result;
use crate::toolchain::Toolchain;
use std::io::Write;

/// Split a comma-separated answer into trimmed, non-empty package names.
#[must_use]
pub fn parse_dependency_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Install every name that is not already importable, in order.
///
/// Stops at the first failed install.
///
/// # Errors
///
/// Returns `Err` if a probe or an install fails, or writing to `out` fails.
pub fn ensure_installed(
    toolchain: &dyn Toolchain,
    names: &[String],
    out: &mut impl Write,
) -> Result<()> {
    for name in names {
        if toolchain.can_import(name)? {
            tracing::debug!(%name, "already importable");
            continue;
        }
        writeln!(out, "[framepython] Installing {name}...")?;
        out.flush()?;
        toolchain.install(name)?;
    }
    Ok(())
}
