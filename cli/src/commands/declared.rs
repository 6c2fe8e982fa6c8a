//! # Kook Declared Commands
//!
//! File: cli/src/commands/declared.rs
//!
//! ## Overview
//!
//! Turns each `CommandDef` from the Kookfile into a clap sub-command, and reads
//! the explicitly supplied flags back out of clap's matches.
//!
//! ## Architecture
//!
//! Every declared command gets:
//! - its name and visible aliases, `description` as the short help and `help`
//!   as the long help;
//! - `-i/--interactive`, selecting interactive resolution;
//! - one flag per option, long name = option name, short name = shorthand.
//!   Types are enforced by clap (`bool`, `String`, `i64`, `f64`), so
//!   `--count abc` is rejected before resolution starts.
//!
//! Options are never marked `required` here. Whether a mandatory option is
//! missing is decided by `core::resolver` alone, after interactive prompting
//! had its chance.
//!
use crate::core::resolver::{ResolutionMode, SuppliedFlags};
use crate::core::schema::{CommandDef, OptionDef, OptionKind, OptionValue};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

/// Id and long name of the interactive toggle.
pub const INTERACTIVE_FLAG: &str = "interactive";

/// Builds the clap sub-command for one declared command.
pub fn build_command(def: &CommandDef) -> Command {
    let mut cmd = Command::new(def.name.clone())
        .visible_aliases(def.aliases.clone())
        .arg(
            Arg::new(INTERACTIVE_FLAG)
                .short('i')
                .long(INTERACTIVE_FLAG)
                .action(ArgAction::SetTrue)
                .help("Use interactive mode to select options"),
        );
    if let Some(description) = &def.description {
        cmd = cmd.about(description.clone());
    }
    if let Some(help) = &def.help {
        cmd = cmd.long_about(help.clone());
    }
    for opt in &def.options {
        cmd = cmd.arg(option_arg(opt));
    }
    cmd
}

fn option_arg(opt: &OptionDef) -> Arg {
    let mut arg = Arg::new(opt.name.clone()).long(opt.name.clone());
    if let Some(letter) = opt.shorthand {
        arg = arg.short(letter);
    }
    if let Some(description) = &opt.description {
        arg = arg.help(description.clone());
    }

    match opt.kind {
        // `--flag` alone means true; `--flag=false` is accepted too.
        OptionKind::Bool => arg
            .action(ArgAction::Set)
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .default_value("false")
            .value_parser(value_parser!(bool)),
        OptionKind::Str => arg
            .action(ArgAction::Set)
            .value_name("TEXT")
            .value_parser(value_parser!(String)),
        OptionKind::Int => arg
            .action(ArgAction::Set)
            .value_name("INT")
            .allow_negative_numbers(true)
            .default_value("0")
            .value_parser(value_parser!(i64)),
        OptionKind::Float => arg
            .action(ArgAction::Set)
            .value_name("NUMBER")
            .allow_negative_numbers(true)
            .default_value("0")
            .value_parser(value_parser!(f64)),
    }
}

/// Options the caller set on the command line, with their typed values.
/// Defaults filled in by clap are not included.
pub fn supplied_flags(def: &CommandDef, matches: &ArgMatches) -> SuppliedFlags {
    let mut supplied = SuppliedFlags::new();
    for opt in &def.options {
        if matches.value_source(&opt.name) != Some(ValueSource::CommandLine) {
            continue;
        }
        let value = match opt.kind {
            OptionKind::Bool => matches.get_one::<bool>(&opt.name).copied().map(OptionValue::Bool),
            OptionKind::Str => matches.get_one::<String>(&opt.name).cloned().map(OptionValue::Str),
            OptionKind::Int => matches.get_one::<i64>(&opt.name).copied().map(OptionValue::Int),
            OptionKind::Float => matches.get_one::<f64>(&opt.name).copied().map(OptionValue::Float),
        };
        if let Some(value) = value {
            debug!("Flag --{} supplied: {:?}", opt.name, value);
            supplied.insert(opt.name.clone(), value);
        }
    }
    supplied
}

/// Resolution mode selected by `--interactive`.
pub fn resolution_mode(matches: &ArgMatches) -> ResolutionMode {
    if matches.get_flag(INTERACTIVE_FLAG) {
        ResolutionMode::Interactive
    } else {
        ResolutionMode::Direct
    }
}
