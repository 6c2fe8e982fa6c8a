//! # Kook Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Builds the per-invocation rendering context and renders a command's script
//! with Tera.
//!
//! ## Architecture
//!
//! The resolved context is assembled in two layers:
//! 1. Every variable declared in the Kookfile, as a string. Tera reads `-` as
//!    subtraction, so a name like `app-name` is also reachable as `app_name`
//!    (the same rule option var names follow). A variable declared with the
//!    underscore spelling keeps its own value.
//! 2. Every option of the invoked command, keyed by its var name (the `var`
//!    override, or the option name with `-` replaced by `_`), as a typed value.
//!
//! The second layer is inserted last, so an option shadows a variable with the
//! same name. Rendering runs with autoescaping off (scripts are shell, not HTML)
//! and fails on undefined variables, which surfaces as `KookError::Template`
//! before any process is spawned.
//!
//! ## Examples
//!
//! ```rust
//! let context = templating::build_context(&definition, command, &resolved);
//! let script = templating::render_script(&command.name, &command.script, &context)?;
//! ```
//!
use crate::core::error::{KookError, Result};
use crate::core::resolver::ResolvedOptions;
use crate::core::schema::{CommandDef, Definition};
use anyhow::anyhow;
use tera::{Context, Tera};
use tracing::debug;

/// Builds the resolved context for one invocation of `command`.
pub fn build_context(
    definition: &Definition,
    command: &CommandDef,
    resolved: &ResolvedOptions,
) -> Context {
    let mut context = Context::new();
    let variables = definition.variable_map();
    for (name, value) in &variables {
        if name.contains('-') {
            context.insert(name.replace('-', "_"), value);
        }
    }
    for (name, value) in &variables {
        context.insert(*name, value);
    }
    for opt in &command.options {
        match resolved.get(&opt.name) {
            Some(value) => context.insert(opt.var_name(), value),
            None => context.insert(opt.var_name(), &opt.kind.zero_value()),
        }
    }
    context
}

/// Renders `script` against `context`.
pub fn render_script(command_name: &str, script: &str, context: &Context) -> Result<String> {
    debug!("Rendering script template for '{}'", command_name);
    Tera::one_off(script, context, false).map_err(|e| {
        anyhow!(KookError::Template { source: e })
            .context(format!("Script of command '{}' could not be rendered", command_name))
    })
}
