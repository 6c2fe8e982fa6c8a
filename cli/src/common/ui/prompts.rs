//! # Kook Interactive Prompts (`common::ui::prompts`)
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Prompting used by `kook <command> --interactive`. The `Prompter` trait is the
//! only seam between the option resolver and the terminal. It offers two
//! questions: a line of text checked by a validator (re-asked until the validator
//! accepts it), and a Yes/No choice.
//!
//! ## Implementations
//!
//! - `DialoguerPrompter`: `dialoguer` widgets (`Input` with `validate_with`,
//!   `Select` over Yes/No). Used when stdin and stderr are both terminals.
//! - `LinePrompter`: plain line reading, used when input is piped (scripts, CI).
//!   Refusals are printed as `X Sorry, your reply was invalid: <reason>`.
//!
//! `terminal()` picks between the two. Both write to stderr so stdout stays clean
//! for the command's own output.
//!
use crate::core::error::{KookError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Checks one answer. `Err` carries the reason shown to the user.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

const YES_NO: [&str; 2] = ["Yes", "No"];

/// Asks questions on behalf of the option resolver.
pub trait Prompter {
    /// Asks for a line of text until `validate` accepts it.
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String>;

    /// Yes/No choice preselecting `default`.
    fn yes_no(&mut self, label: &str, default: bool) -> Result<bool>;
}

/// Prompter for the current process: dialoguer widgets on a terminal, plain
/// line reading otherwise.
pub fn terminal() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        debug!("Input is not a terminal, reading answers line by line");
        Box::new(LinePrompter::stdio())
    }
}

fn prompt_error(label: &str, err: impl std::fmt::Display) -> anyhow::Error {
    KookError::PromptInput(format!("failed to read answer for '{}': {}", label, err)).into()
}

/// # Dialoguer Prompter (`DialoguerPrompter`)
///
/// Terminal widgets with the colorful theme.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .validate_with(|answer: &String| validate(answer.as_str()))
            .interact_text()
            .map_err(|e| prompt_error(label, e))
    }

    fn yes_no(&mut self, label: &str, default: bool) -> Result<bool> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(&YES_NO[..])
            .default(if default { 0 } else { 1 })
            .interact()
            .map_err(|e| prompt_error(label, e))?;
        Ok(choice == 0)
    }
}

/// A `Prompter` reading answers line by line from `input`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter bound to the process's stdin and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `question` and returns the answer without its line terminator.
    fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "? {}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| prompt_error(question, e))?;
        if read == 0 {
            return Err(KookError::PromptInput(format!(
                "unexpected end of input while asking '{}'",
                question
            ))
            .into());
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn refuse(&mut self, reason: &str) -> Result<()> {
        writeln!(self.output, "X Sorry, your reply was invalid: {}", reason)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String> {
        loop {
            let answer = self.read_answer(label)?;
            match validate(answer.as_str()) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.refuse(&reason)?,
            }
        }
    }

    fn yes_no(&mut self, label: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let question = format!("{} {}", label, hint);
        loop {
            let answer = self.read_answer(&question)?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.refuse("please answer yes or no")?,
            }
        }
    }
}

/// Replays canned answers and records every question and refusal.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
    pub rejections: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn next(&mut self, label: &str) -> Result<String> {
        self.asked.push(label.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| KookError::PromptInput("no more answers".into()).into())
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String> {
        loop {
            let answer = self.next(label)?;
            match validate(answer.as_str()) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.rejections.push(reason),
            }
        }
    }

    fn yes_no(&mut self, label: &str, default: bool) -> Result<bool> {
        loop {
            match self.next(label)?.as_str() {
                "" => return Ok(default),
                "y" | "Yes" => return Ok(true),
                "n" | "No" => return Ok(false),
                _ => self.rejections.push("please answer yes or no".into()),
            }
        }
    }
}
