//! # Kook Version Command
//!
//! File: cli/src/commands/version.rs
//!
//! ## Overview
//!
//! Implements `kook version`. Like `kook --version`, it works whether or not a
//! Kookfile can be found.
//!
use crate::core::error::Result;
use clap::Parser;

/// Sub-command name.
pub const NAME: &str = "version";

/// Arguments accepted by `kook version` (none).
#[derive(Parser, Debug)]
#[command(name = "version", about = "Print the version number of kook")]
pub struct VersionArgs {}

/// Text printed by `kook version`.
pub fn version_line() -> String {
    format!("kook version {}", env!("CARGO_PKG_VERSION"))
}

pub fn handle_version(_args: VersionArgs) -> Result<()> {
    println!("{}", version_line());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert_eq!(
            version_line(),
            concat!("kook version ", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_takes_no_arguments() {
        assert!(VersionArgs::try_parse_from(["version"]).is_ok());
        assert!(VersionArgs::try_parse_from(["version", "extra"]).is_err());
    }
}
