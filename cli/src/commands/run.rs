//! # Kook Declared Command Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Runs one command from the Kookfile once clap has matched it.
//!
//! ## Workflow
//!
//! 1. Read the explicitly supplied flags and the `--interactive` toggle from the
//!    matches (`declared::supplied_flags`, `declared::resolution_mode`).
//! 2. Resolve every option (`core::resolver::resolve`). A missing mandatory
//!    option stops here, so nothing is rendered, echoed or run.
//! 3. Render, echo and run the script (`core::engine::execute`) through the
//!    configured shell (`KOOK_SHELL`, default `sh`).
//!
use crate::commands::declared;
use crate::common::process::{ScriptRunner, ShellRunner};
use crate::common::ui::prompts::{self, Prompter};
use crate::core::config;
use crate::core::engine;
use crate::core::error::Result;
use crate::core::resolver::{self, ResolutionMode, SuppliedFlags};
use crate::core::schema::{CommandDef, Definition};
use clap::ArgMatches;
use std::io::{self, Write};
use tracing::info;

/// # Handle Declared Command (`handle_declared`)
///
/// Entry point used by `commands::dispatch` for anything that is not a built-in.
/// Wires the real terminal, shell and stdout into `run_declared`.
pub fn handle_declared(
    definition: &Definition,
    command: &CommandDef,
    matches: &ArgMatches,
) -> Result<()> {
    info!("Running declared command '{}'", command.name);
    let supplied = declared::supplied_flags(command, matches);
    let mode = declared::resolution_mode(matches);

    let mut prompter = prompts::terminal();
    let mut runner = ShellRunner::new(config::script_shell());
    run_declared(
        definition,
        command,
        supplied,
        mode,
        prompter.as_mut(),
        &mut runner,
        &mut io::stdout(),
    )
}

/// Resolves options, then renders and runs the script.
pub fn run_declared(
    definition: &Definition,
    command: &CommandDef,
    supplied: SuppliedFlags,
    mode: ResolutionMode,
    prompter: &mut dyn Prompter,
    runner: &mut dyn ScriptRunner,
    echo: &mut dyn Write,
) -> Result<()> {
    let resolved = resolver::resolve(command, supplied, mode, prompter)?;
    engine::execute(definition, command, &resolved, runner, echo)
}
