//! CLI module for cache-scenarios
//!
//! ## Commands
//!
//! - `bind <descriptor>` - Generate the descriptor's scenarios and print one argument vector per scenario
//! - `inspect <descriptor>` - Show the inspected parameter slots and loading mode
//! - `kinds` - List the declarable parameter types and qualifiers
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

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::provider::ProviderConfig;
use crate::version::VERSION;

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
    /// Create a new CLI error with a message and exit code.
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

/// Bind generated cache scenarios to test parameters
#[derive(Parser, Debug)]
#[command(name = "cache-scenarios")]
#[command(version = VERSION)]
#[command(about = "Bind generated cache scenarios to test parameters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the descriptor's scenarios and bind each one
    Bind {
        /// Test method descriptor (JSON)
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: PathBuf,
        /// Stop after this many scenarios
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
        /// Keep binding after the first failure
        #[arg(short = 'k', long)]
        keep_going: bool,
    },

    /// Show the inspected parameter slots of a descriptor
    Inspect {
        /// Test method descriptor (JSON)
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: PathBuf,
    },

    /// List declarable parameter types and qualifiers
    Kinds,
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
    match cli.command {
        Command::Bind {
            descriptor,
            limit,
            keep_going,
        } => {
            let mut config = ProviderConfig::new().with_fail_fast(!keep_going);
            if let Some(limit) = limit {
                config = config.with_limit(limit);
            }
            commands::bind_file(&descriptor, &config)
        }
        Command::Inspect { descriptor } => commands::inspect_file(&descriptor),
        Command::Kinds => commands::list_kinds(),
    }
}

// ============================================================================
// Tests
// ============================================================================
