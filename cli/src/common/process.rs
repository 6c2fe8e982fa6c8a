//! # Kook Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Runs a rendered script as a single shell command: `<shell> -c <script>`. The
//! child's stdin, stdout and stderr are the parent's own streams (nothing is
//! buffered or captured) and the call blocks until the child exits.
//!
//! The `ScriptRunner` trait is the seam the execution engine talks to, so the
//! engine can be exercised with a recording runner in tests.
//!
//! ## Exit Status
//!
//! - Normal exit: `ScriptExit::Code(n)`.
//! - Killed by a signal (e.g. Ctrl-C reaching the child): `ScriptExit::Signal(n)`.
//!
use crate::core::error::{KookError, Result};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// How a script process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptExit {
    Code(i32),
    Signal(i32),
}

/// Executes rendered scripts.
pub trait ScriptRunner {
    fn run(&mut self, script: &str) -> Result<ScriptExit>;
}

/// Runs scripts through a POSIX-compatible shell with inherited stdio.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl ScriptRunner for ShellRunner {
    fn run(&mut self, script: &str) -> Result<ScriptExit> {
        info!("Running script with '{} -c'", self.shell);
        debug!("Script text: {}", script);

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(script)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| KookError::Spawn {
                shell: self.shell.clone(),
                source,
            })?;

        let exit = exit_of(status);
        debug!("Script finished: {:?}", exit);
        Ok(exit)
    }
}

#[cfg(unix)]
fn exit_of(status: ExitStatus) -> ScriptExit {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => ScriptExit::Code(code),
        (None, Some(signal)) => ScriptExit::Signal(signal),
        (None, None) => ScriptExit::Code(1),
    }
}

#[cfg(not(unix))]
fn exit_of(status: ExitStatus) -> ScriptExit {
    ScriptExit::Code(status.code().unwrap_or(1))
}
