//! # Kook Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that talk to the outside world on behalf of the core: the
//! shell that runs rendered scripts and the terminal that answers prompts.
//! Keeping them here leaves `core::` free of direct process and terminal I/O,
//! which is what lets the resolver and the engine be tested with scripted
//! prompters and recording runners.
//!
//! - **`process`**: runs a script through `<shell> -c` with inherited stdio and
//!   reports how it ended.
//! - **`ui`**: interactive prompting (`ui::prompts`).
//!

/// Shell execution of rendered scripts.
pub mod process;
/// Terminal user interface helpers (prompts).
pub mod ui;
