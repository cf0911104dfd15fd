//! Everything that talks to the Python environment: import probes, `pip`,
//! running registered files and `PyInstaller`.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Exits 0 when the module named by `sys.argv[1]` can be found.
const IMPORT_PROBE: &str = "import importlib.util, sys\n\
sys.exit(0 if importlib.util.find_spec(sys.argv[1]) is not None else 1)\n";

/// Runs `sys.argv[1]` as `__main__`; an escaping exception's traceback is
/// written to the file named by `sys.argv[2]`.
const RUN_MAIN_BOOTSTRAP: &str = r#"import runpy, sys, traceback
target, trace_path = sys.argv[1], sys.argv[2]
sys.argv = [target]
try:
    runpy.run_path(target, run_name="__main__")
except Exception:
    sys.stdout.flush()
    with open(trace_path, "w", encoding="utf-8") as trace_file:
        trace_file.write(traceback.format_exc())
    sys.exit(1)
"#;

/// How a registered file's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The file ran to completion (or exited on its own).
    Completed { exit_code: Option<i32> },
    /// The file raised an exception; `trace` is the formatted traceback.
    Raised { trace: String },
}

/// The external programs the tool orchestrates.
pub trait Toolchain {
    /// Whether `name` is already importable.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the probe cannot be run.
    fn can_import(&self, name: &str) -> Result<bool>;

    /// Install `name` with the package manager, blocking until it finishes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallFailed`] if the installer exits abnormally.
    fn install(&self, name: &str) -> Result<()>;

    /// Run the file at `path` as the main program.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the interpreter cannot be started; exceptions
    /// raised by the file are reported through [`TargetOutcome::Raised`].
    fn run_main(&self, path: &str) -> Result<TargetOutcome>;

    /// Package the file at `path` into a single executable.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the bundler cannot be started.
    fn bundle(&self, path: &str) -> Result<()>;
}

/// [`Toolchain`] backed by a Python interpreter on the host.
#[derive(Debug, Clone)]
pub struct PythonToolchain {
    python: String,
    working_dir: PathBuf,
}

impl PythonToolchain {
    pub fn new(python: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            working_dir: working_dir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.current_dir(&self.working_dir);
        cmd
    }

    fn status(&self, cmd: &mut Command) -> Result<ExitStatus> {
        tracing::debug!(command = ?cmd, "spawning");
        let status = cmd.status().map_err(|source| Error::Spawn {
            program: self.python.clone(),
            source,
        })?;
        tracing::debug!(%status, "child exited");
        Ok(status)
    }
}

impl Toolchain for PythonToolchain {
    fn can_import(&self, name: &str) -> Result<bool> {
        let mut cmd = self.command();
        cmd.arg("-c")
            .arg(IMPORT_PROBE)
            .arg(name)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(self.status(&mut cmd)?.success())
    }

    fn install(&self, name: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["-m", "pip", "install"]).arg(name);
        let status = self.status(&mut cmd)?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::InstallFailed {
                name: name.to_string(),
                code: status.code(),
            })
        }
    }

    fn run_main(&self, path: &str) -> Result<TargetOutcome> {
        let trace_dir = tempfile::tempdir()?;
        let trace_path = trace_dir.path().join("traceback.txt");

        let mut cmd = self.command();
        cmd.arg("-c").arg(RUN_MAIN_BOOTSTRAP).arg(path).arg(&trace_path);
        let status = self.status(&mut cmd)?;

        match read_trace(&trace_path)? {
            Some(trace) => Ok(TargetOutcome::Raised { trace }),
            None => Ok(TargetOutcome::Completed {
                exit_code: status.code(),
            }),
        }
    }

    fn bundle(&self, path: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["-m", "PyInstaller", "--onefile"]).arg(path);
        // Exit status is only logged, never reported.
        let _ = self.status(&mut cmd)?;
        Ok(())
    }
}

fn read_trace(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let trace = fs::read_to_string(path)?;
    Ok(Some(trace))
}
