//! # Kook Definition Validation
//!
//! File: cli/src/core/validation.rs
//!
//! ## Overview
//!
//! Turns a decoded `Document` into a typed `Definition`, or reports the first
//! schema violation found. The function is pure: no filesystem access, no logging
//! side effects beyond tracing.
//!
//! ## Check Order
//!
//! Checks run in this order and stop at the first failure:
//! 1. `version` equals `SUPPORTED_VERSION`.
//! 2. At least one command is declared.
//! 3. Each variable: name pattern, then not declared twice.
//! 4. Each command, in declaration order: name pattern, non-empty script, alias
//!    patterns, built-in names, then name and aliases not claimed by an earlier
//!    command or alias. Its options follow.
//! 5. Each option: name pattern, reserved names, type, duplicate name, then the
//!    shorthand (single letter, not `h`/`i`, not reused) and the `var` override.
//!
use crate::core::error::ValidationError;
use crate::core::schema::{
    CommandDef, CommandEntry, Definition, Document, OptionDef, OptionEntry, OptionKind, Variable,
    SUPPORTED_VERSION,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").expect("valid name pattern"));
static SHORTHAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]$").expect("valid shorthand pattern"));
static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid var pattern"));

/// Shorthands taken by `-h/--help` and `-i/--interactive`.
pub const RESERVED_SHORTHANDS: [char; 2] = ['h', 'i'];
/// Long names taken by the toggles every declared command carries.
pub const RESERVED_OPTION_NAMES: [&str; 2] = ["help", "interactive"];
/// Sub-command names kook registers itself.
pub const RESERVED_COMMAND_NAMES: [&str; 3] = ["completion", "version", "help"];

/// Validates a decoded document and builds the typed definition from it.
pub fn validate(doc: &Document) -> Result<Definition, ValidationError> {
    if doc.version != SUPPORTED_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            found: doc.version,
            expected: SUPPORTED_VERSION,
        });
    }

    if doc.commands.is_empty() {
        return Err(ValidationError::NoCommands);
    }

    let mut variables = Vec::with_capacity(doc.variables.len());
    let mut variable_names = HashSet::new();
    for (index, entry) in doc.variables.iter().enumerate() {
        if !NAME_PATTERN.is_match(&entry.name) {
            return Err(ValidationError::InvalidVariableName {
                index,
                name: entry.name.clone(),
            });
        }
        if !variable_names.insert(entry.name.as_str()) {
            return Err(ValidationError::DuplicateVariable {
                index,
                name: entry.name.clone(),
            });
        }
        variables.push(Variable {
            name: entry.name.clone(),
            value: entry.value.clone(),
        });
    }

    // Names and aliases share one namespace across the whole definition.
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut commands = Vec::with_capacity(doc.commands.len());
    for (index, entry) in doc.commands.iter().enumerate() {
        commands.push(validate_command(index, entry, &mut claimed)?);
    }

    debug!(
        "Definition valid: {} variable(s), {} command(s)",
        variables.len(),
        commands.len()
    );
    Ok(Definition {
        variables,
        commands,
    })
}

fn validate_command<'a>(
    index: usize,
    entry: &'a CommandEntry,
    claimed: &mut HashSet<&'a str>,
) -> Result<CommandDef, ValidationError> {
    if !NAME_PATTERN.is_match(&entry.name) {
        return Err(ValidationError::InvalidCommandName {
            index,
            name: entry.name.clone(),
        });
    }

    if entry.script.is_empty() {
        return Err(ValidationError::EmptyScript {
            command: entry.name.clone(),
        });
    }

    for alias in &entry.aliases {
        if !NAME_PATTERN.is_match(alias) {
            return Err(ValidationError::InvalidAlias {
                command: entry.name.clone(),
                alias: alias.clone(),
            });
        }
    }

    for name in std::iter::once(&entry.name).chain(&entry.aliases) {
        if RESERVED_COMMAND_NAMES.contains(&name.as_str()) {
            return Err(ValidationError::ReservedName {
                command: entry.name.clone(),
                name: name.clone(),
            });
        }
        if !claimed.insert(name.as_str()) {
            return Err(ValidationError::DuplicateName {
                command: entry.name.clone(),
                name: name.clone(),
            });
        }
    }

    let mut option_names = HashSet::new();
    let mut shorthands = HashSet::new();
    let mut options = Vec::with_capacity(entry.options.len());
    for (opt_index, opt) in entry.options.iter().enumerate() {
        options.push(validate_option(
            &entry.name,
            opt_index,
            opt,
            &mut option_names,
            &mut shorthands,
        )?);
    }

    Ok(CommandDef {
        name: entry.name.clone(),
        aliases: entry.aliases.clone(),
        description: non_empty(&entry.description),
        help: non_empty(&entry.help),
        options,
        script: entry.script.clone(),
        silent: entry.silent,
    })
}

fn validate_option<'a>(
    command: &str,
    index: usize,
    opt: &'a OptionEntry,
    option_names: &mut HashSet<&'a str>,
    shorthands: &mut HashSet<char>,
) -> Result<OptionDef, ValidationError> {
    if !NAME_PATTERN.is_match(&opt.name) {
        return Err(ValidationError::InvalidOptionName {
            command: command.to_string(),
            index,
            option: opt.name.clone(),
        });
    }

    if RESERVED_OPTION_NAMES.contains(&opt.name.as_str()) {
        return Err(ValidationError::ReservedOptionName {
            command: command.to_string(),
            option: opt.name.clone(),
        });
    }

    let kind = OptionKind::parse(&opt.kind).ok_or_else(|| ValidationError::InvalidOptionType {
        command: command.to_string(),
        option: opt.name.clone(),
        kind: opt.kind.clone(),
    })?;

    if !option_names.insert(opt.name.as_str()) {
        return Err(ValidationError::DuplicateOption {
            command: command.to_string(),
            option: opt.name.clone(),
        });
    }

    let shorthand = match opt.shorthand.as_deref() {
        None | Some("") => None,
        Some(raw) => {
            let letter = match raw.chars().next() {
                Some(c) if SHORTHAND_PATTERN.is_match(raw) => c,
                _ => {
                    return Err(ValidationError::InvalidShorthand {
                        command: command.to_string(),
                        option: opt.name.clone(),
                        shorthand: raw.to_string(),
                    })
                }
            };
            if RESERVED_SHORTHANDS.contains(&letter) {
                return Err(ValidationError::ReservedShorthand {
                    command: command.to_string(),
                    option: opt.name.clone(),
                    shorthand: raw.to_string(),
                });
            }
            if !shorthands.insert(letter) {
                return Err(ValidationError::DuplicateShorthand {
                    command: command.to_string(),
                    shorthand: raw.to_string(),
                });
            }
            Some(letter)
        }
    };

    let var = match opt.var.as_deref() {
        None | Some("") => None,
        Some(var) if VAR_PATTERN.is_match(var) => Some(var.to_string()),
        Some(var) => {
            return Err(ValidationError::InvalidVarName {
                command: command.to_string(),
                option: opt.name.clone(),
                var: var.to_string(),
            })
        }
    };

    Ok(OptionDef {
        name: opt.name.clone(),
        description: non_empty(&opt.description),
        var,
        kind,
        mandatory: opt.mandatory,
        shorthand,
    })
}

fn non_empty(text: &Option<String>) -> Option<String> {
    text.as_ref().filter(|t| !t.is_empty()).cloned()
}
