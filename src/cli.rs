//! CLI module containing the main entry point logic.

use crate::config::{self, Settings};
use crate::error::Result;
use crate::registry::RegistryStore;
use crate::toolchain::{PythonToolchain, Toolchain};
use crate::{packager, registrar, runner};
use clap::{CommandFactory, Parser as ClapParser};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const REGISTER_USAGE: &str = "Usage: framepython --register --folder current";

/// CLI arguments for framepython.
#[derive(ClapParser, Debug)]
#[command(name = "framepython")]
#[command(version = PKG_VERSION)]
#[command(about = "Register, debug and package the Python files of a project", long_about = None)]
struct Cli {
    /// Scan a folder and register its Python files (needs --folder)
    #[arg(long)]
    register: bool,

    /// Folder to register; `current` means the project directory
    #[arg(long, value_name = "PATH")]
    folder: Option<String>,

    /// List the registered files
    #[arg(long)]
    list: bool,

    /// Run a registered file by alias, or every registered file when no alias is given
    #[arg(long, value_name = "ALIAS")]
    debug: Option<Option<String>>,

    /// Package a registered file into a single executable
    #[arg(long, value_name = "ALIAS")]
    compile: Option<String>,

    /// Project directory holding the registry (alias: --working-dir)
    #[arg(long = "project-dir", alias = "working-dir", value_name = "PATH")]
    project_dir: Option<PathBuf>,
}

/// The one thing an invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register { folder: Option<String> },
    List,
    Debug { alias: Option<String> },
    Compile { alias: String },
    Help,
}

/// An empty value counts as "not given".
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl Cli {
    /// First match wins: register, list, debug, compile, help.
    fn action(&self) -> Action {
        if self.register {
            Action::Register {
                folder: non_empty(self.folder.as_ref()),
            }
        } else if self.list {
            Action::List
        } else if let Some(alias) = &self.debug
            && alias.as_ref().is_none_or(|a| !a.is_empty())
        {
            Action::Debug {
                alias: alias.clone(),
            }
        } else if let Some(alias) = non_empty(self.compile.as_ref()) {
            Action::Compile { alias }
        } else {
            Action::Help
        }
    }
}

/// Perform `action` against the project described by `settings`.
///
/// # Errors
///
/// Returns `Err` for anything that should end the invocation with a failure
/// status: a missing registry, a failed install, an unreadable folder, or an
/// interpreter that cannot be started.
pub fn execute(
    action: &Action,
    settings: &Settings,
    toolchain: &dyn Toolchain,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let store = RegistryStore::new(settings.registry_path());

    match action {
        Action::Register { folder: None } => {
            writeln!(out, "{REGISTER_USAGE}")?;
        }
        Action::Register {
            folder: Some(folder),
        } => {
            registrar::register(&store, toolchain, settings.project_dir(), folder, input, out)?;
        }
        Action::List => {
            store.load()?.write_listing(out)?;
        }
        Action::Debug { alias } => {
            let registry = store.load()?;
            let report = runner::debug(&registry, toolchain, alias.as_deref(), out)?;
            tracing::debug!(
                attempted = report.attempted.len(),
                failed = report.failed.len(),
                "debug run finished"
            );
        }
        Action::Compile { alias } => {
            let registry = store.load()?;
            packager::compile_file(&registry, toolchain, alias, out)?;
        }
        Action::Help => {
            write!(out, "{}", Cli::command().render_help())?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Main CLI logic.
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging();

    let action = cli.action();
    tracing::debug!(?action, "dispatching");

    let settings = Settings::from_env(cli.project_dir)
        .unwrap_or_else(|e| crate::fatal_error(&e.to_string()));
    let toolchain = PythonToolchain::new(settings.python.clone(), settings.project_dir.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = execute(
        &action,
        &settings,
        &toolchain,
        &mut stdin.lock(),
        &mut stdout.lock(),
    );

    if let Err(e) = result {
        crate::fatal_error(&e.to_string());
    }
}
