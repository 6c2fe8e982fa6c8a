//! # Kook Option Resolver
//!
//! File: cli/src/core/resolver.rs
//!
//! ## Overview
//!
//! Produces one typed value for every option of the invoked command. This is the
//! single place where `mandatory` is enforced; clap never marks a declared option
//! as required, so `--interactive` can collect values the caller left out.
//!
//! ## Modes
//!
//! - **Direct** (default): every mandatory option must have been supplied on the
//!   command line, otherwise `MissingRequiredOption` is returned before anything
//!   is rendered.
//! - **Interactive**: every option *not* supplied on the command line is asked
//!   for once, in declaration order. Explicit flags are never re-asked. Mandatory
//!   options are checked after all questions have been answered, so the user sees
//!   every question before any failure is reported.
//!
//! Options left unset fall back to their type's zero value (`false`, `""`, `0`,
//! `0.0`).
//!
use crate::common::ui::prompts::Prompter;
use crate::core::error::{KookError, Result};
use crate::core::schema::{CommandDef, OptionDef, OptionKind, OptionValue};
use std::collections::HashMap;
use tracing::{debug, info};

const REQUIRED_MESSAGE: &str = "this field is required";

/// How options without an explicit flag are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Direct,
    Interactive,
}

/// Options given explicitly on the command line, keyed by option name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SuppliedFlags {
    values: HashMap<String, OptionValue>,
}

impl SuppliedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn is_supplied(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl FromIterator<(String, OptionValue)> for SuppliedFlags {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Final option values, in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResolvedOptions {
    values: Vec<(String, OptionValue)>,
}

impl ResolvedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Resolves every option of `command`.
///
/// ## Arguments
///
/// * `command`: The declared command being invoked.
/// * `supplied`: Flags the caller passed explicitly.
/// * `mode`: Direct or interactive resolution.
/// * `prompter`: Used only in interactive mode.
///
/// ## Returns
///
/// * `Result<ResolvedOptions>`: One value per declared option, or
///   `KookError::MissingRequiredOption` naming the first unset mandatory option.
///   Prompt failures (end of input) surface as `KookError::PromptInput`.
pub fn resolve(
    command: &CommandDef,
    mut supplied: SuppliedFlags,
    mode: ResolutionMode,
    prompter: &mut dyn Prompter,
) -> Result<ResolvedOptions> {
    debug!("Resolving options for '{}' in {:?} mode", command.name, mode);

    if mode == ResolutionMode::Interactive {
        for opt in &command.options {
            if supplied.is_supplied(&opt.name) {
                debug!("Option '{}' given on the command line, not asking", opt.name);
                continue;
            }
            if let Some(value) = prompt_for(opt, prompter)? {
                supplied.insert(opt.name.clone(), value);
            }
        }
    }

    if let Some(missing) = command
        .options
        .iter()
        .find(|opt| opt.mandatory && !supplied.is_supplied(&opt.name))
    {
        info!("Mandatory option '{}' has no value", missing.name);
        return Err(KookError::MissingRequiredOption {
            name: missing.name.clone(),
        }
        .into());
    }

    let values = command
        .options
        .iter()
        .map(|opt| {
            let value = supplied
                .get(&opt.name)
                .cloned()
                .unwrap_or_else(|| opt.kind.zero_value());
            (opt.name.clone(), value)
        })
        .collect();
    let resolved = ResolvedOptions { values };
    for (name, value) in resolved.iter() {
        debug!("Option '{}' resolved to '{}'", name, value);
    }
    Ok(resolved)
}

/// Asks for one option. `None` means the answer leaves the option unset.
fn prompt_for(opt: &OptionDef, prompter: &mut dyn Prompter) -> Result<Option<OptionValue>> {
    debug!("Prompting for '{}' ({})", opt.name, opt.kind);
    let label = opt.label();
    let value = match opt.kind {
        OptionKind::Bool => Some(OptionValue::Bool(prompter.yes_no(label, false)?)),
        OptionKind::Str => {
            let answer = prompter.input(label, &|answer: &str| {
                if opt.mandatory && answer.trim().is_empty() {
                    Err(REQUIRED_MESSAGE.to_string())
                } else {
                    Ok(())
                }
            })?;
            Some(OptionValue::Str(answer))
        }
        OptionKind::Int => ask_number(prompter, opt, "must be a valid integer", |s| {
            s.parse::<i64>().ok().map(OptionValue::Int)
        })?,
        OptionKind::Float => ask_number(prompter, opt, "must be a valid number", |s| {
            s.parse::<f64>().ok().map(OptionValue::Float)
        })?,
    };
    Ok(value)
}

/// Numeric prompt: blank is allowed unless mandatory and leaves the option unset.
fn ask_number<F>(
    prompter: &mut dyn Prompter,
    opt: &OptionDef,
    invalid_message: &str,
    parse: F,
) -> Result<Option<OptionValue>>
where
    F: Fn(&str) -> Option<OptionValue>,
{
    let answer = prompter.input(opt.label(), &|answer: &str| {
        let answer = answer.trim();
        if answer.is_empty() {
            if opt.mandatory {
                return Err(REQUIRED_MESSAGE.to_string());
            }
            return Ok(());
        }
        match parse(answer) {
            Some(_) => Ok(()),
            None => Err(invalid_message.to_string()),
        }
    })?;
    Ok(parse(answer.trim()))
}
