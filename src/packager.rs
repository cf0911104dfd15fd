//! `--compile`: package one registered file into a standalone executable.

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::toolchain::Toolchain;
use std::io::Write;

/// Bundle the file registered under `alias`.
///
/// An unknown alias is reported on `out` and the bundler is not started.
/// Whether the bundler itself succeeded is not reported.
///
/// # Errors
///
/// Returns `Err` if the bundler cannot be started or writing fails.
pub fn compile_file(
    registry: &Registry,
    toolchain: &dyn Toolchain,
    alias: &str,
    out: &mut impl Write,
) -> Result<()> {
    let Ok(path) = registry.resolve(alias) else {
        writeln!(out, "{}", Error::AliasUnknown(alias.to_string()))?;
        return Ok(());
    };

    writeln!(out, "[framepython] Compiling {alias} ({path})...")?;
    out.flush()?;
    toolchain.bundle(path)
}
