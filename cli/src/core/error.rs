//! # Kook Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout kook. Two layers work
//! together:
//! - `KookError`: the taxonomy of failures a user can hit (missing Kookfile,
//!   schema violations, missing options, template and child process failures).
//! - `ValidationError`: one variant per schema rule, carrying the offending field
//!   so the message points at the exact entry in the Kookfile.
//! - `Result<T>`: alias for `anyhow::Result<T>`, used for propagation with context.
//!
//! `main` downcasts the final error to `KookError` to pick the process exit code,
//! so a failing script's own status reaches the caller unchanged.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! return Err(KookError::MissingRequiredOption { name: "env".into() })?;
//!
//! // Inspect an error after it went through anyhow
//! if let Some(KookError::ChildExit { code }) = err.downcast_ref::<KookError>() {
//!     println!("script failed with {}", code);
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for kook.
#[derive(Error, Debug)]
pub enum KookError {
    #[error("no {file_name} found in {} or any parent directory", .start.display())]
    ConfigNotFound { file_name: String, start: PathBuf },

    #[error("failed to parse {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("invalid definition: {0}")]
    Validation(#[from] ValidationError),

    #[error("required option '{name}' not provided")]
    MissingRequiredOption { name: String },

    #[error("interactive prompt failed: {0}")]
    PromptInput(String),

    #[error("failed to render script template")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("failed to spawn '{shell}'")]
    Spawn {
        shell: String,
        source: std::io::Error,
    },

    #[error("script exited with status {code}")]
    ChildExit { code: i32 },

    #[error("script interrupted by signal {signal}")]
    Interrupted { signal: i32 },
}

impl KookError {
    /// Process exit code for this error.
    ///
    /// A child's non-zero status is passed through verbatim; a child killed by a
    /// signal maps to the shell convention `128 + signal`. Everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            KookError::ChildExit { code } => *code,
            KookError::Interrupted { signal } => 128 + signal,
            _ => 1,
        }
    }
}

/// Schema violations found while validating a Kookfile.
///
/// Variants are listed in the order the validator checks them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported config version: {found} (expected {expected})")]
    UnsupportedVersion { found: i64, expected: i64 },

    #[error("config must have at least one command")]
    NoCommands,

    #[error("variable {index}: invalid name '{name}': must start with a letter and contain only letters, numbers, hyphens, and underscores")]
    InvalidVariableName { index: usize, name: String },

    #[error("variable {index}: duplicate variable name '{name}'")]
    DuplicateVariable { index: usize, name: String },

    #[error("command {index}: invalid name '{name}': must start with a letter and contain only letters, numbers, hyphens, and underscores")]
    InvalidCommandName { index: usize, name: String },

    #[error("command '{command}': script cannot be empty")]
    EmptyScript { command: String },

    #[error("command '{command}': invalid alias '{alias}': must start with a letter and contain only letters, numbers, hyphens, and underscores")]
    InvalidAlias { command: String, alias: String },

    #[error("command '{command}': '{name}' is reserved for a built-in command")]
    ReservedName { command: String, name: String },

    #[error("command '{command}': duplicate command name/alias '{name}'")]
    DuplicateName { command: String, name: String },

    #[error("command '{command}', option {index}: invalid name '{option}': must start with a letter and contain only letters, numbers, hyphens, and underscores")]
    InvalidOptionName {
        command: String,
        index: usize,
        option: String,
    },

    #[error("command '{command}', option '{option}': name is reserved (used by --help or --interactive)")]
    ReservedOptionName { command: String, option: String },

    #[error("command '{command}', option '{option}': invalid type '{kind}': must be bool, str, int, or float")]
    InvalidOptionType {
        command: String,
        option: String,
        kind: String,
    },

    #[error("command '{command}': duplicate option name '{option}'")]
    DuplicateOption { command: String, option: String },

    #[error("command '{command}', option '{option}': invalid shorthand '{shorthand}': must be a single letter")]
    InvalidShorthand {
        command: String,
        option: String,
        shorthand: String,
    },

    #[error("command '{command}', option '{option}': shorthand '{shorthand}' is reserved (used by -h/--help or -i/--interactive)")]
    ReservedShorthand {
        command: String,
        option: String,
        shorthand: String,
    },

    #[error("command '{command}': duplicate shorthand '{shorthand}'")]
    DuplicateShorthand { command: String, shorthand: String },

    #[error("command '{command}', option '{option}': invalid var name '{var}': must start with a letter or underscore and contain only letters, numbers, and underscores")]
    InvalidVarName {
        command: String,
        option: String,
        var: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
