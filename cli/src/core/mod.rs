//! # Kook Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! The engine behind every declared command, independent of how the command
//! line is parsed.
//!
//! ## Architecture
//!
//! Leaf-first:
//! - `error`: Error taxonomy (`KookError`, `ValidationError`) and the `Result` alias
//! - `schema`: Kookfile document types and the validated, typed model
//! - `validation`: Schema rules turning a `Document` into a `Definition`
//! - `config`: Kookfile discovery and loading, environment settings
//! - `resolver`: Option values from flags or interactive prompts
//! - `templating`: Resolved context and script rendering
//! - `engine`: Render, echo, run, and map the exit status
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // Load the Kookfile once
//! use crate::core::error::{KookError, Result}; // Error handling
//! use crate::core::{engine, resolver}; // Run a declared command
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod templating;
pub mod validation;
