//! # Kook Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Finds, reads, decodes and validates the Kookfile, and exposes the few
//! environment settings kook honours.
//!
//! ## Architecture
//!
//! Loading follows a fixed pipeline:
//! 1. **Locate**: an explicit path (`--file` / `KOOK_FILE`) wins. Otherwise the
//!    search starts in the current directory and walks up through each parent to
//!    the filesystem root; the first regular file named `Kookfile` is used.
//! 2. **Read** the file. An empty or whitespace-only file is a parse error.
//! 3. **Decode** the YAML into `schema::Document` (unknown keys are rejected).
//! 4. **Validate** into the typed `schema::Definition`.
//!
//! The definition is loaded once in `main` and passed by reference to whatever
//! needs it; nothing else searches the filesystem.
//!
//! Environment settings:
//! - `KOOK_FILE`: explicit Kookfile path (read through clap's `env` support).
//! - `KOOK_SHELL`: shell used to run scripts (default `sh`).
//!
//! ## Examples
//!
//! ```rust
//! let definition = config::load(None)?;
//! let deploy = definition.find_command("deploy");
//! ```
//!
use crate::core::error::{KookError, Result};
use crate::core::schema::{Definition, Document};
use crate::core::validation;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name searched for in the current directory and its ancestors.
pub const DEFINITION_FILE_NAME: &str = "Kookfile";
/// Environment variable selecting an explicit Kookfile.
pub const FILE_ENV: &str = "KOOK_FILE";
/// Environment variable selecting the script shell.
pub const SHELL_ENV: &str = "KOOK_SHELL";
const DEFAULT_SHELL: &str = "sh";

/// Locates, reads and validates the Kookfile.
///
/// ## Arguments
///
/// * `explicit`: A path given via `--file`/`KOOK_FILE`. Skips discovery.
///
/// ## Returns
///
/// * `Result<Definition>`: The validated definition, or `ConfigNotFound`,
///   `ConfigParse` or `Validation` wrapped in `anyhow::Error`.
pub fn load(explicit: Option<&Path>) -> Result<Definition> {
    let path = match explicit {
        Some(path) => {
            debug!("Using explicit definition file: {}", path.display());
            path.to_path_buf()
        }
        None => {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            find_definition_path(&current_dir).ok_or_else(|| KookError::ConfigNotFound {
                file_name: DEFINITION_FILE_NAME.to_string(),
                start: current_dir.clone(),
            })?
        }
    };
    load_definition(&path)
}

/// Walks from `start` up to the filesystem root looking for a Kookfile.
pub fn find_definition_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let candidate = path.join(DEFINITION_FILE_NAME);
        if candidate.is_file() {
            debug!("Found {} at {}", DEFINITION_FILE_NAME, candidate.display());
            return Some(candidate);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    debug!(
        "No {} found in {} or its ancestors",
        DEFINITION_FILE_NAME,
        start.display()
    );
    None
}

/// Reads and validates the Kookfile at `path`.
pub fn load_definition(path: &Path) -> Result<Definition> {
    info!("Loading definition from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read definition file: {}", path.display()))?;
    parse_definition(&content, path)
}

/// Decodes and validates Kookfile `content`. `path` is only used in messages.
pub fn parse_definition(content: &str, path: &Path) -> Result<Definition> {
    if content.trim().is_empty() {
        return Err(KookError::ConfigParse {
            path: path.to_path_buf(),
            message: "file is empty".to_string(),
        }
        .into());
    }

    let document: Document =
        serde_yaml::from_str(content).map_err(|e| KookError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let definition = validation::validate(&document).map_err(KookError::from)?;
    info!(
        "Loaded {} command(s) from {}",
        definition.commands.len(),
        path.display()
    );
    Ok(definition)
}

/// Shell used to run rendered scripts.
pub fn script_shell() -> String {
    std::env::var(SHELL_ENV)
        .ok()
        .filter(|shell| !shell.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationError;
    use tempfile::tempdir;

    const MINIMAL: &str = "version: 1\ncommands:\n  - name: hello\n    script: echo hello\n";

    fn kook_error(err: &anyhow::Error) -> &KookError {
        err.downcast_ref::<KookError>()
            .expect("error should be a KookError")
    }

    #[test]
    fn test_find_in_start_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFINITION_FILE_NAME), MINIMAL).unwrap();
        assert_eq!(
            find_definition_path(dir.path()),
            Some(dir.path().join(DEFINITION_FILE_NAME))
        );
    }

    #[test]
    fn test_find_walks_up_to_nearest_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(DEFINITION_FILE_NAME), MINIMAL).unwrap();
        fs::write(dir.path().join("a").join(DEFINITION_FILE_NAME), MINIMAL).unwrap();

        assert_eq!(
            find_definition_path(&nested),
            Some(dir.path().join("a").join(DEFINITION_FILE_NAME))
        );
    }

    #[test]
    fn test_directory_named_kookfile_is_skipped() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("inner");
        fs::create_dir_all(nested.join(DEFINITION_FILE_NAME)).unwrap();
        fs::write(dir.path().join(DEFINITION_FILE_NAME), MINIMAL).unwrap();
        assert_eq!(
            find_definition_path(&nested),
            Some(dir.path().join(DEFINITION_FILE_NAME))
        );
    }

    #[test]
    fn test_load_explicit_path() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.yml");
        fs::write(&path, MINIMAL)?;
        let definition = load(Some(&path))?;
        assert_eq!(definition.commands[0].name, "hello");
        Ok(())
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let err = parse_definition("  \n", Path::new("Kookfile")).unwrap_err();
        assert!(matches!(kook_error(&err), KookError::ConfigParse { .. }));
        assert!(err.to_string().contains("file is empty"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse_definition("version: [1\n", Path::new("Kookfile")).unwrap_err();
        assert!(matches!(kook_error(&err), KookError::ConfigParse { .. }));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let err = parse_definition("version: 2\ncommands: []\n", Path::new("Kookfile")).unwrap_err();
        assert!(matches!(
            kook_error(&err),
            KookError::Validation(ValidationError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load(Some(&dir.path().join("missing"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read definition file"));
    }
}
