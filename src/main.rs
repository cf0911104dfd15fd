//! # framepython
//!
//! A small developer tool for folders of Python scripts.
//!
//! ## Usage
//!
//! - Register the current folder: `framepython --register --folder current`
//! - Show the aliases: `framepython --list`
//! - Run one file, or all of them: `framepython --debug .FILE2`, `framepython --debug`
//! - Build an executable: `framepython --compile .FILE`

/// Entry point for the CLI tool.
fn main() {
    framepython::cli::run_cli();
}
