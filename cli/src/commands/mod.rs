//! # Kook Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Builds the `kook` command tree and routes a parsed invocation to its
//! handler. Unlike a fixed CLI, most of the tree comes from the Kookfile, so the
//! root command is assembled at runtime:
//!
//! - Built-ins, always present: `completion`, `version`, and the hidden
//!   `__complete` used by the completion scripts.
//! - One sub-command per declared command (`declared::build_command`), added only
//!   when a valid Kookfile was loaded.
//!
//! ## Parsing in Two Passes
//!
//! The Kookfile location can itself come from the command line (`--file`), so
//! `parse_global_args` first reads the root flags with a lenient parser that
//! accepts any sub-command. `main` then loads the definition, builds the full
//! tree with `build_cli`, parses for real and calls `dispatch`.
//!
//! ## Command Groups
//!
//! - `completion`: shell completion scripts and the `__complete` candidates
//! - `declared`: Kookfile commands as clap sub-commands
//! - `run`: resolution and execution of a declared command
//! - `version`: version display
//!
use crate::core::config::FILE_ENV;
use crate::core::error::Result;
use crate::core::schema::Definition;
use anyhow::anyhow;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

/// `kook completion <shell>` and `kook __complete`.
pub mod completion;
/// Declared commands: clap construction and flag extraction.
pub mod declared;
/// Option resolution and script execution for a declared command.
pub mod run;
/// `kook version`.
pub mod version;

const FILE_ARG: &str = "file";
const VERBOSE_ARG: &str = "verbose";

/// Root flags read before the Kookfile is loaded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GlobalArgs {
    /// Explicit Kookfile (`--file` or `KOOK_FILE`).
    pub file: Option<PathBuf>,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Name of the sub-command, if one was given.
    pub subcommand: Option<String>,
}

impl GlobalArgs {
    /// Whether the invocation can proceed when no valid Kookfile is available.
    /// True for the built-ins and for a bare `kook` (which only prints help).
    pub fn allows_missing_definition(&self) -> bool {
        match self.subcommand.as_deref() {
            None => true,
            Some(name) => [
                completion::NAME,
                version::NAME,
                completion::COMPLETE_COMMAND,
                "help",
            ]
            .contains(&name),
        }
    }
}

fn root_command() -> Command {
    Command::new("kook")
        .about("A simple CLI tool configured via Kookfile")
        .long_about(
            "Kook is a task runner that reads commands from a Kookfile.\n\n\
             Each project can have its own Kookfile with custom commands,\n\
             options, and variables. Command scripts are Tera templates\n\
             rendered with the variables and option values.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(FILE_ARG)
                .short('f')
                .long("file")
                .value_name("PATH")
                .env(FILE_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("Use this Kookfile instead of searching for one"),
        )
        .arg(
            Arg::new(VERBOSE_ARG)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
}

/// Reads the root flags without knowing the declared commands.
pub fn parse_global_args<I, T>(args: I) -> GlobalArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let lenient = root_command()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .allow_external_subcommands(true)
        .ignore_errors(true);
    match lenient.try_get_matches_from(args) {
        Ok(matches) => GlobalArgs {
            file: matches.get_one::<PathBuf>(FILE_ARG).cloned(),
            verbose: matches.get_count(VERBOSE_ARG),
            subcommand: matches.subcommand_name().map(str::to_string),
        },
        Err(_) => GlobalArgs {
            file: std::env::var_os(FILE_ENV).map(PathBuf::from),
            ..GlobalArgs::default()
        },
    }
}

/// Builds the full command tree: built-ins plus every declared command.
pub fn build_cli(definition: Option<&Definition>) -> Command {
    let mut cli = root_command()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(completion::CompletionArgs::command())
        .subcommand(version::VersionArgs::command())
        .subcommand(completion::complete_command());
    if let Some(definition) = definition {
        for command in &definition.commands {
            cli = cli.subcommand(declared::build_command(command));
        }
    }
    cli
}

/// # Dispatch (`dispatch`)
///
/// Routes the matched sub-command to its handler.
///
/// ## Arguments
///
/// * `matches`: Matches produced by `build_cli(definition)`.
/// * `definition`: The loaded Kookfile, if any.
///
/// ## Returns
///
/// * `Result<()>`: The handler's result.
pub fn dispatch(matches: &ArgMatches, definition: Option<&Definition>) -> Result<()> {
    match matches.subcommand() {
        Some((completion::NAME, sub)) => {
            completion::handle_completion(completion::CompletionArgs::from_arg_matches(sub)?)
        }
        Some((version::NAME, sub)) => {
            version::handle_version(version::VersionArgs::from_arg_matches(sub)?)
        }
        Some((completion::COMPLETE_COMMAND, sub)) => {
            completion::handle_complete(&build_cli(definition), sub)
        }
        Some((name, sub)) => {
            let definition =
                definition.ok_or_else(|| anyhow!("'{}' requires a Kookfile", name))?;
            let command = definition
                .find_command(name)
                .ok_or_else(|| anyhow!("unknown command '{}'", name))?;
            run::handle_declared(definition, command, sub)
        }
        None => Err(anyhow!("no command given")),
    }
}
