//! # framepython
//!
//! Register the Python files of a project folder under short aliases
//! (`.FILE`, `.FILE2`, ...), install the dependencies they need, run them with
//! exception capture, and package them into standalone executables.

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod packager;
pub mod registrar;
pub mod registry;
pub mod runner;
pub mod toolchain;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
