//! # Kook Definition Schema
//!
//! File: cli/src/core/schema.rs
//!
//! ## Overview
//!
//! Two views of the same Kookfile live here:
//!
//! - The **document** types (`Document`, `VariableEntry`, `CommandEntry`,
//!   `OptionEntry`) mirror the YAML one-to-one. They are permissive: missing names,
//!   scripts and types decode as empty strings so the validator can report them
//!   with a precise error instead of a generic parse failure.
//! - The **typed model** (`Definition`, `Variable`, `CommandDef`, `OptionDef`) is
//!   only ever produced by `core::validation::validate`. Option types are a closed
//!   `OptionKind` enum and shorthands are single `char`s, so nothing downstream
//!   re-checks strings.
//!
//! ## Document Shape
//!
//! ```yaml
//! version: 1
//! variables:
//!   - name: app_name
//!     value: testapp
//! commands:
//!   - name: deploy
//!     aliases: [d]
//!     description: Deploy the app
//!     script: ./deploy.sh {{ app_name }} {{ env }}
//!     options:
//!       - name: env
//!         type: str
//!         mandatory: true
//!         shorthand: e
//! ```
//!
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The only `version` value a Kookfile may declare.
pub const SUPPORTED_VERSION: i64 = 1;

// --- Document types (as decoded from YAML) ---

/// Root of a decoded Kookfile.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Schema version. Absent decodes as 0, which the validator rejects.
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct VariableEntry {
    #[serde(default)]
    pub name: String,
    /// Any YAML scalar is accepted and kept as its textual form.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub value: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct CommandEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Short, one-line description. Shown in help and completions.
    #[serde(default)]
    pub description: Option<String>,
    /// Long help text shown by `kook <command> --help`.
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
    #[serde(default)]
    pub script: String,
    /// Suppress the `Executing: ...` echo.
    #[serde(default)]
    pub silent: bool,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Overrides the template variable name the option is bound to.
    #[serde(default)]
    pub var: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub shorthand: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "variable value must be a scalar, found {:?}",
            other
        ))),
    }
}

// --- Typed model (produced by validation) ---

/// A validated Kookfile. Read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub variables: Vec<Variable>,
    pub commands: Vec<CommandDef>,
}

impl Definition {
    /// Variables as a name → value mapping.
    pub fn variable_map(&self) -> HashMap<&str, &str> {
        self.variables
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect()
    }

    /// Looks up a command by its name or one of its aliases.
    pub fn find_command(&self, name: &str) -> Option<&CommandDef> {
        self.commands
            .iter()
            .find(|c| c.name == name || c.aliases.iter().any(|a| a == name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// One declared command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDef {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub help: Option<String>,
    pub options: Vec<OptionDef>,
    /// Tera template rendered against the resolved context.
    pub script: String,
    pub silent: bool,
}

/// One typed option of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDef {
    pub name: String,
    pub description: Option<String>,
    pub var: Option<String>,
    pub kind: OptionKind,
    pub mandatory: bool,
    pub shorthand: Option<char>,
}

impl OptionDef {
    /// Template variable the option is bound to: the `var` override, or the
    /// option name with `-` replaced by `_`.
    pub fn var_name(&self) -> String {
        match &self.var {
            Some(var) => var.clone(),
            None => self.name.replace('-', "_"),
        }
    }

    /// Text used when prompting for this option.
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// The supported option types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Str,
    Int,
    Float,
}

impl OptionKind {
    /// Parses the `type` field of an option entry.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "bool" => Some(OptionKind::Bool),
            "str" => Some(OptionKind::Str),
            "int" => Some(OptionKind::Int),
            "float" => Some(OptionKind::Float),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Str => "str",
            OptionKind::Int => "int",
            OptionKind::Float => "float",
        }
    }

    /// Value an unset, non-mandatory option takes.
    pub fn zero_value(self) -> OptionValue {
        match self {
            OptionKind::Bool => OptionValue::Bool(false),
            OptionKind::Str => OptionValue::Str(String::new()),
            OptionKind::Int => OptionValue::Int(0),
            OptionKind::Float => OptionValue::Float(0.0),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value. Serializes to the bare JSON scalar so templates see
/// `true`, `staging`, `3` or `2.5`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(x) => write!(f, "{}", x),
        }
    }
}
