//! # Kook Execution Engine
//!
//! File: cli/src/core/engine.rs
//!
//! ## Overview
//!
//! Takes a command whose options are already resolved and runs it:
//! 1. Build the resolved context (variables, then options by var name).
//! 2. Render the script. A rendering failure aborts here, before anything runs.
//! 3. Unless the command is `silent`, echo `Executing: <script>` to stdout and
//!    flush, so the echo is never interleaved with the child's output.
//! 4. Hand the script to a `ScriptRunner` and wait for it.
//! 5. Map the outcome: exit 0 is success, a non-zero exit becomes
//!    `KookError::ChildExit` with the code unchanged, and a signal becomes
//!    `KookError::Interrupted`.
//!
use crate::common::process::{ScriptExit, ScriptRunner};
use crate::core::error::{KookError, Result};
use crate::core::resolver::ResolvedOptions;
use crate::core::schema::{CommandDef, Definition};
use crate::core::templating;
use std::io::Write;
use tracing::{info, warn};

/// Prefix of the line echoed before a non-silent script runs.
pub const ECHO_PREFIX: &str = "Executing: ";

/// Renders and runs `command`.
///
/// ## Arguments
///
/// * `definition`: Source of the variables.
/// * `command`: The command being run.
/// * `resolved`: Option values from `core::resolver::resolve`.
/// * `runner`: Executes the rendered script.
/// * `echo`: Where the `Executing: ...` line goes (stdout in the binary).
///
/// ## Returns
///
/// * `Ok(())` when the script exits with status 0.
/// * `Err` with `KookError::Template`, `KookError::ChildExit`,
///   `KookError::Interrupted` or `KookError::Spawn` otherwise.
pub fn execute(
    definition: &Definition,
    command: &CommandDef,
    resolved: &ResolvedOptions,
    runner: &mut dyn ScriptRunner,
    echo: &mut dyn Write,
) -> Result<()> {
    let context = templating::build_context(definition, command, resolved);
    let script = templating::render_script(&command.name, &command.script, &context)?;

    if !command.silent {
        writeln!(echo, "{}{}", ECHO_PREFIX, script)?;
        echo.flush()?;
    }

    match runner.run(&script)? {
        ScriptExit::Code(0) => {
            info!("Command '{}' completed successfully", command.name);
            Ok(())
        }
        ScriptExit::Code(code) => {
            warn!("Command '{}' exited with status {}", command.name, code);
            Err(KookError::ChildExit { code }.into())
        }
        ScriptExit::Signal(signal) => {
            warn!("Command '{}' was interrupted by signal {}", command.name, signal);
            Err(KookError::Interrupted { signal }.into())
        }
    }
}
