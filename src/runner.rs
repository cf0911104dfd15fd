//! `--debug`: run registered files one after another, reporting any
//! exception a file raises without stopping the batch.

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::toolchain::{TargetOutcome, Toolchain};
use std::io::Write;

pub const TRACE_BANNER_START: &str = "----- ERROR TRACEBACK -----";
pub const TRACE_BANNER_END: &str = "---------------------------";

/// What happened to each file of a debug run, in run order.
#[derive(Debug, Default)]
pub struct DebugReport {
    pub attempted: Vec<String>,
    pub failed: Vec<String>,
}

/// Pick the (alias, path) pairs to run: one alias, or every registered file.
///
/// Returns `None` when `alias` is given but not registered.
#[must_use]
pub fn select_targets<'a>(
    registry: &'a Registry,
    alias: Option<&str>,
) -> Option<Vec<(&'a str, &'a str)>> {
    match alias {
        Some(alias) => {
            let (alias, path) = registry.files.get_key_value(alias)?;
            Some(vec![(alias.as_str(), path.as_str())])
        }
        None => Some(
            registry
                .files
                .iter()
                .map(|(alias, path)| (alias.as_str(), path.as_str()))
                .collect(),
        ),
    }
}

/// Run one registered file (or all of them when `alias` is `None`).
///
/// An unknown alias is reported on `out` and nothing runs.
///
/// # Errors
///
/// Returns `Err` if the interpreter cannot be started or writing fails. An
/// exception raised by a file is never an error.
pub fn debug(
    registry: &Registry,
    toolchain: &dyn Toolchain,
    alias: Option<&str>,
    out: &mut impl Write,
) -> Result<DebugReport> {
    let mut report = DebugReport::default();

    let Some(targets) = select_targets(registry, alias) else {
        let unknown = Error::AliasUnknown(alias.unwrap_or_default().to_string());
        writeln!(out, "{unknown}")?;
        return Ok(report);
    };

    for (alias, path) in targets {
        writeln!(out, "\n[framepython] Debugging {alias} ({path})")?;
        out.flush()?;

        report.attempted.push(alias.to_string());
        match toolchain.run_main(path)? {
            TargetOutcome::Completed { exit_code } => {
                tracing::debug!(alias, ?exit_code, "target finished");
            }
            TargetOutcome::Raised { trace } => {
                writeln!(out, "{TRACE_BANNER_START}")?;
                writeln!(out, "{trace}")?;
                writeln!(out, "{TRACE_BANNER_END}")?;
                report.failed.push(alias.to_string());
            }
        }
    }

    Ok(report)
}
