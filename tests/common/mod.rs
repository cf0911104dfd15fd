//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Registry file name, as written by `--register`
pub const REGISTRY_FILE: &str = ".framepython.json";

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_framepython"))
}

/// Helper to create a temporary project directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to write a Python file into a project directory
pub fn create_py_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Helper to find a Python interpreter on the system
pub fn python_executable() -> Option<&'static str> {
    if which::which("python3").is_ok() {
        Some("python3")
    } else if which::which("python").is_ok() {
        Some("python")
    } else {
        None
    }
}

/// Helper to create a Command running inside `dir`
/// Sets `FRAMEPYTHON_PYTHON` to a program that does not exist, so any test
/// that accidentally reaches the interpreter fails loudly; override it with
/// `.env(...)` when a real interpreter is wanted.
pub fn test_command(dir: &Path) -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.current_dir(dir)
        .env("FRAMEPYTHON_PYTHON", "framepython-test-no-python")
        .env_remove("FRAMEPYTHON_LOG");
    cmd
}

/// Run a command feeding `input` on stdin
pub fn run_with_input(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn framepython");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().expect("Failed to wait for framepython")
}

/// Register `dir` with the given dependency answer
pub fn register_current(dir: &Path, deps: &str) -> Output {
    let mut cmd = test_command(dir);
    cmd.args(["--register", "--folder", "current"]);
    run_with_input(cmd, &format!("{deps}\n"))
}
