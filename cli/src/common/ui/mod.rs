//! # Kook UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction helpers. Currently this is the prompting layer used by
//! `--interactive`:
//!
//! - **`prompts`**: the `Prompter` trait, a `dialoguer` implementation for
//!   terminals, and a line-based implementation for piped input.
//!
//! ```rust
//! use crate::common::ui::prompts;
//!
//! let mut prompter = prompts::terminal();
//! let force = prompter.yes_no("Force the deploy?", false)?;
//! ```
//!

/// Interactive question/answer helpers.
pub mod prompts;
