//! # Kook Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Main entry point for the `kook` binary. It handles:
//! - Reading the root flags (`--file`, `-v`) ahead of everything else
//! - Setting up the logging system based on verbosity flags
//! - Loading the Kookfile and building the command tree from it
//! - Routing execution to the matching command handler
//! - Turning errors into a message on stderr and an exit status
//!
//! ## Examples
//!
//! ```bash
//! # List the commands declared in the nearest Kookfile
//! kook --help
//!
//! # Run a declared command with increased verbosity
//! kook -vv deploy --env staging
//!
//! # Use a Kookfile outside the directory tree
//! kook --file ../ops/Kookfile deploy -i
//! ```
//!
//! Command processing flow:
//! 1. Parse root flags leniently (`commands::parse_global_args`)
//! 2. Configure logging based on verbosity level
//! 3. Load the Kookfile (optional for the built-ins)
//! 4. Parse the full command line against the built tree and dispatch
//! 5. Map any error to its exit status (`KookError::exit_code`)
//!
use crate::core::config;
use crate::core::error::{KookError, Result};
use crate::core::schema::Definition;
use anyhow::Context;
use std::ffi::OsString;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Built-in and declared command handlers
mod common; // Shared utilities (process, prompts)
mod core; // Core infrastructure (config, validation, resolution, execution)

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_definition(global: &commands::GlobalArgs) -> Result<Option<Definition>> {
    match config::load(global.file.as_deref()) {
        Ok(definition) => Ok(Some(definition)),
        Err(e) if global.allows_missing_definition() => {
            tracing::debug!("Continuing without a Kookfile: {:#}", e);
            Ok(None)
        }
        Err(e) => Err(e).context("failed to load config"),
    }
}

fn run(args: Vec<OsString>, global: &commands::GlobalArgs) -> Result<()> {
    let definition = load_definition(global)?;
    let matches = match commands::build_cli(definition.as_ref()).try_get_matches_from(args) {
        Ok(matches) => matches,
        // Help, version and usage errors: clap prints and picks the status.
        Err(e) => e.exit(),
    };
    tracing::debug!("Parsed CLI arguments: {:?}", matches);
    commands::dispatch(&matches, definition.as_ref())
}

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    let global = commands::parse_global_args(args.clone());
    init_logging(global.verbose);

    if let Err(e) = run(args, &global) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<KookError>()
            .map(KookError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn kook_cmd() -> Command {
        Command::cargo_bin("kook").expect("Failed to find kook binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        kook_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        kook_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
