//! CLI module for the Cero compiler
//!
//! This module provides the command-line interface for the compiler front end.
//!
//! ## Commands
//!
//! - `build <file>...` - Lex and parse source files, reporting diagnostics
//! - `<file>` - Same as `build` for a single file
//! - `--lex <file>` - Print the token stream (debug)
//! - `--parse <file>` - Print the AST (debug)
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `reporter` - Diagnostic printing
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod reporter;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use cero_syntax::source::DEFAULT_TAB_SIZE;

use crate::compile::BuildConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end of the Cero compiler
#[derive(Parser, Debug)]
#[command(name = "cero")]
#[command(version)]
#[command(about = "Front end of the Cero compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to build (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["file", "parse_file"])]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Tab width used to compute columns in diagnostics
    #[arg(
        long = "tab-size",
        value_name = "N",
        global = true,
        default_value_t = DEFAULT_TAB_SIZE,
        value_parser = clap::value_parser!(u8).range(1..=16)
    )]
    pub tab_size: u8,

    /// Keep comments as tokens (visible with --lex)
    #[arg(long = "emit-comments", global = true)]
    pub emit_comments: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lex and parse source files
    Build {
        /// Source files to build
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::default()
            .with_tab_size(self.tab_size)
            .with_emit_comments(self.emit_comments)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.build_config();

    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file, &config);
    }
    if let Some(file) = &cli.parse_file {
        return commands::parse_file(file, &config);
    }

    match cli.command {
        Some(Command::Build { files }) => commands::build_files(&files, &config),
        None => match cli.file {
            Some(file) => commands::build_files(&[file], &config),
            // No command and no file - nothing to do
            None => Err(CliError::failure("no input file; run `cero --help` for usage")),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
