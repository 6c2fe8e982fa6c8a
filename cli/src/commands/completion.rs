//! # Kook Completion Commands
//!
//! File: cli/src/commands/completion.rs
//!
//! ## Overview
//!
//! Shell completion in two parts:
//!
//! - `kook completion <shell>` prints a small script for bash, zsh, fish or
//!   powershell. The script holds no command names. On every completion request
//!   it calls back into `kook __complete`.
//! - `kook __complete -- <words...>` (hidden) receives the words typed so far
//!   and prints one candidate per line, `name<TAB>description` when a
//!   description exists. Because it is a fresh process, the Kookfile is loaded
//!   again for each request, so completions follow the file on disk.
//!
//! Candidates are read from the same clap tree that parses real invocations:
//! - no command yet: visible sub-commands and their aliases (built-ins and
//!   declared commands; `__complete` itself is hidden)
//! - after a command: its long flags
//! - after `completion`: the supported shells
//!
//! ## Usage
//!
//! ```bash
//! # Bash, current session
//! source <(kook completion bash)
//!
//! # Zsh, persistent
//! kook completion zsh > "${fpath[1]}/_kook"
//!
//! # Fish
//! kook completion fish > ~/.config/fish/completions/kook.fish
//!
//! # PowerShell
//! kook completion powershell | Out-String | Invoke-Expression
//! ```
//!
use crate::core::error::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, Parser, ValueEnum};
use std::io::{self, Write};
use tracing::{debug, info};

/// Sub-command name.
pub const NAME: &str = "completion";
/// Hidden sub-command printing completion candidates.
pub const COMPLETE_COMMAND: &str = "__complete";
const WORDS_ARG: &str = "words";

/// Shells `kook completion` can write a script for.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// # Completion Arguments (`CompletionArgs`)
///
/// Arguments accepted by `kook completion`.
#[derive(Parser, Debug)]
#[command(
    name = "completion",
    about = "Generate a shell completion script",
    long_about = "Prints a completion script for the given shell to stdout.\n\
                  Load it in the current session (e.g. `source <(kook completion bash)`)\n\
                  or save it where your shell looks for completions. The script asks\n\
                  kook for candidates each time, so it never needs regenerating."
)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: ShellKind,
}

const BASH_SCRIPT: &str = r##"# bash completion for kook
# Candidates come from `kook __complete`, which reads the Kookfile on every call.

_kook() {
    local cur="${COMP_WORDS[COMP_CWORD]}"
    local IFS=$'\n'
    local candidates
    candidates="$(kook __complete -- "${COMP_WORDS[@]:1:COMP_CWORD-1}" 2>/dev/null | cut -f1)"
    COMPREPLY=($(compgen -W "${candidates}" -- "${cur}"))
}

complete -o default -F _kook kook
"##;

const ZSH_SCRIPT: &str = r##"#compdef kook
# zsh completion for kook
# Candidates come from `kook __complete`, which reads the Kookfile on every call.

_kook() {
    local -a candidates
    local line
    for line in "${(@f)$(kook __complete -- "${(@)words[2,CURRENT-1]}" 2>/dev/null)}"; do
        [[ -n "$line" ]] || continue
        candidates+=("${line/$'\t'/:}")
    done
    _describe -t commands 'kook' candidates
}

if [[ "$funcstack[1]" = "_kook" ]]; then
    _kook "$@"
else
    compdef _kook kook
fi
"##;

const FISH_SCRIPT: &str = r##"# fish completion for kook
# Candidates come from `kook __complete`, which reads the Kookfile on every call.

function __kook_complete
    set -l words (commandline -opc)
    set -e words[1]
    kook __complete -- $words 2>/dev/null
end

complete -c kook -f -a '(__kook_complete)'
"##;

const POWERSHELL_SCRIPT: &str = r##"# powershell completion for kook
# Candidates come from `kook __complete`, which reads the Kookfile on every call.

Register-ArgumentCompleter -Native -CommandName 'kook' -ScriptBlock {
    param($wordToComplete, $commandAst, $cursorPosition)

    $words = @($commandAst.CommandElements | Select-Object -Skip 1 | ForEach-Object { $_.ToString() })
    if ($wordToComplete -ne '' -and $words.Count -gt 0) {
        $words = @($words | Select-Object -First ($words.Count - 1))
    }

    & kook __complete -- @words 2>$null | ForEach-Object {
        $name, $description = $_ -split "`t", 2
        if ($name -like "$wordToComplete*") {
            if (-not $description) { $description = $name }
            [System.Management.Automation.CompletionResult]::new($name, $name, 'ParameterValue', $description)
        }
    }
}
"##;

/// Completion script for `shell`.
pub fn script_for(shell: ShellKind) -> &'static str {
    match shell {
        ShellKind::Bash => BASH_SCRIPT,
        ShellKind::Zsh => ZSH_SCRIPT,
        ShellKind::Fish => FISH_SCRIPT,
        ShellKind::Powershell => POWERSHELL_SCRIPT,
    }
}

/// # Handle Completion Command (`handle_completion`)
///
/// Writes the completion script for `args.shell` to stdout.
pub fn handle_completion(args: CompletionArgs) -> Result<()> {
    info!("Generating {:?} completion script", args.shell);
    io::stdout().write_all(script_for(args.shell).as_bytes())?;
    Ok(())
}

/// The hidden `__complete` sub-command. Takes every word verbatim, flags
/// included.
pub fn complete_command() -> Command {
    Command::new(COMPLETE_COMMAND)
        .hide(true)
        .disable_help_flag(true)
        .about("List completion candidates for the words typed so far")
        .arg(
            Arg::new(WORDS_ARG)
                .num_args(0..)
                .action(ArgAction::Append)
                .allow_hyphen_values(true)
                .trailing_var_arg(true),
        )
}

fn candidate(name: &str, help: Option<String>) -> String {
    match help {
        Some(help) if !help.is_empty() => format!("{}\t{}", name, help),
        _ => name.to_string(),
    }
}

fn subcommand_candidates(cli: &Command) -> Vec<String> {
    let mut candidates = Vec::new();
    for sub in cli.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let about = sub.get_about().map(|about| about.to_string());
        candidates.push(candidate(sub.get_name(), about.clone()));
        for alias in sub.get_visible_aliases() {
            candidates.push(candidate(alias, about.clone()));
        }
    }
    candidates
}

fn argument_candidates(sub: &Command, positionals_given: usize) -> Vec<String> {
    let mut candidates = Vec::new();
    for arg in sub.get_arguments().filter(|arg| !arg.is_hide_set()) {
        let help = arg.get_help().map(|help| help.to_string());
        if let Some(long) = arg.get_long() {
            candidates.push(candidate(&format!("--{}", long), help));
        } else if arg.is_positional() && positionals_given == 0 {
            for value in arg.get_possible_values() {
                if !value.is_hide_set() {
                    let help = value.get_help().map(|help| help.to_string());
                    candidates.push(candidate(value.get_name(), help));
                }
            }
        }
    }
    candidates
}

/// # Completion Candidates (`completion_candidates`)
///
/// Candidates for the word following `words` (everything typed after the
/// program name, current word excluded).
///
/// ## Arguments
///
/// * `cli`: The full command tree, as built by `commands::build_cli`.
/// * `words`: Completed words typed so far.
pub fn completion_candidates(cli: &Command, words: &[String]) -> Vec<String> {
    let mut positionals: Vec<&str> = Vec::new();
    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        if positionals.is_empty() {
            // Root flags before the command; `--file` consumes its value.
            if word == "-f" || word == "--file" {
                iter.next();
                continue;
            }
            if word.starts_with('-') {
                continue;
            }
        } else if word.starts_with('-') {
            continue;
        }
        positionals.push(word);
    }

    match positionals.split_first() {
        None => subcommand_candidates(cli),
        Some((name, rest)) => match cli.find_subcommand(name) {
            Some(sub) => argument_candidates(sub, rest.len()),
            None => {
                debug!("No completions for unknown command '{}'", name);
                Vec::new()
            }
        },
    }
}

/// Handler for `kook __complete`.
pub fn handle_complete(cli: &Command, matches: &ArgMatches) -> Result<()> {
    let words: Vec<String> = matches
        .get_many::<String>(WORDS_ARG)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    debug!("Completing after {:?}", words);
    let mut out = io::stdout().lock();
    for line in completion_candidates(cli, &words) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;
    use crate::core::config::parse_definition;
    use crate::core::schema::Definition;
    use std::path::Path;

    fn definition() -> Definition {
        parse_definition(
            r#"
version: 1
commands:
  - name: deploy
    aliases: [d, ship]
    description: Deploy the app
    script: echo {{ env }}
    options:
      - name: env
        description: Target environment
        type: str
        shorthand: e
  - name: build
    script: cargo build
"#,
            Path::new("Kookfile"),
        )
        .expect("test definition should be valid")
    }

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parses_each_shell() {
        for (name, shell) in [
            ("bash", ShellKind::Bash),
            ("zsh", ShellKind::Zsh),
            ("fish", ShellKind::Fish),
            ("powershell", ShellKind::Powershell),
        ] {
            let args = CompletionArgs::try_parse_from(["completion", name]).unwrap();
            assert_eq!(args.shell, shell);
        }
    }

    #[test]
    fn test_rejects_unknown_shell() {
        assert!(CompletionArgs::try_parse_from(["completion", "tcsh"]).is_err());
        assert!(CompletionArgs::try_parse_from(["completion"]).is_err());
    }

    #[test]
    fn test_scripts_call_back_into_kook() {
        for shell in ShellKind::value_variants() {
            let script = script_for(*shell);
            assert!(script.contains("kook __complete --"), "{:?}", shell);
        }
    }

    #[test]
    fn test_top_level_candidates() {
        let def = definition();
        let cli = build_cli(Some(&def));
        assert_eq!(
            completion_candidates(&cli, &[]),
            vec![
                "completion\tGenerate a shell completion script",
                "version\tPrint the version number of kook",
                "deploy\tDeploy the app",
                "d\tDeploy the app",
                "ship\tDeploy the app",
                "build",
            ]
        );
    }

    #[test]
    fn test_root_flags_skipped() {
        let def = definition();
        let cli = build_cli(Some(&def));
        let top = completion_candidates(&cli, &words(&["-v", "--file", "other/Kookfile"]));
        assert!(top.iter().any(|c| c.starts_with("deploy\t")));
    }

    #[test]
    fn test_flag_candidates_for_alias() {
        let def = definition();
        let cli = build_cli(Some(&def));
        let flags = completion_candidates(&cli, &words(&["ship", "--env", "qa"]));
        assert_eq!(
            flags,
            vec![
                "--interactive\tUse interactive mode to select options",
                "--env\tTarget environment",
            ]
        );
    }

    #[test]
    fn test_shell_candidates() {
        let cli = build_cli(None);
        assert_eq!(
            completion_candidates(&cli, &words(&["completion"])),
            vec!["bash", "zsh", "fish", "powershell"]
        );
        assert!(completion_candidates(&cli, &words(&["completion", "bash"])).is_empty());
    }

    #[test]
    fn test_unknown_command_has_no_candidates() {
        let cli = build_cli(None);
        assert!(completion_candidates(&cli, &words(&["deploy"])).is_empty());
    }

    #[test]
    fn test_complete_accepts_hyphenated_words() {
        let matches = complete_command()
            .try_get_matches_from(["__complete", "--", "deploy", "--env", "-i"])
            .unwrap();
        let given: Vec<&String> = matches.get_many::<String>(WORDS_ARG).unwrap().collect();
        assert_eq!(given, vec!["deploy", "--env", "-i"]);
    }
}
