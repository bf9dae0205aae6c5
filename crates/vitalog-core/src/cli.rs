use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "vitalog",
    version,
    about = "Health-log timeline and calendar navigation",
    disable_help_subcommand = true,
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    #[arg(long = "entries")]
    pub entries: Option<PathBuf>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

const DEFAULT_COMMAND: &str = "timeline";

/// Positional invocation split the selector-first way: everything before
/// the first recognized command token selects date/view/category, the
/// rest are the command's own arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub selector_terms: Vec<String>,
    pub command: String,
    pub command_args: Vec<String>,
}

impl Invocation {
    #[tracing::instrument(skip(rest))]
    pub fn parse(rest: Vec<OsString>) -> Self {
        let tokens: Vec<String> = rest
            .into_iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect();

        if tokens.is_empty() {
            debug!(command = DEFAULT_COMMAND, "no arguments, using default command");
            return Self {
                selector_terms: vec![],
                command: DEFAULT_COMMAND.to_string(),
                command_args: vec![],
            };
        }

        let (selector_terms, command, command_args) = split_selectors_command(&tokens);
        debug!(?selector_terms, command = %command, ?command_args, "parsed invocation");

        Self {
            selector_terms,
            command,
            command_args,
        }
    }
}

fn split_selectors_command(tokens: &[String]) -> (Vec<String>, String, Vec<String>) {
    let known = crate::commands::known_command_names();

    for i in 0..tokens.len() {
        let token = tokens[i].as_str();
        if let Some(full) = crate::commands::expand_command_abbrev(token, &known) {
            debug!(
                token = %token,
                expanded = %full,
                split_index = i,
                "resolved command token"
            );
            return (
                tokens[..i].to_vec(),
                full.to_string(),
                tokens[i + 1..].to_vec(),
            );
        }
    }

    (tokens.to_vec(), DEFAULT_COMMAND.to_string(), vec![])
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::Invocation;

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn empty_invocation_defaults_to_timeline() {
        let inv = Invocation::parse(vec![]);
        assert_eq!(inv.command, "timeline");
        assert!(inv.selector_terms.is_empty());
    }

    #[test]
    fn selectors_precede_the_command() {
        let inv = Invocation::parse(args(&["meals", "view:day", "timeline"]));
        assert_eq!(inv.command, "timeline");
        assert_eq!(inv.selector_terms, ["meals", "view:day"]);
        assert!(inv.command_args.is_empty());
    }

    #[test]
    fn command_abbreviations_expand_unambiguously() {
        let inv = Invocation::parse(args(&["cal"]));
        assert_eq!(inv.command, "calendar");

        let inv = Invocation::parse(args(&["info", "a1b2"]));
        assert_eq!(inv.command, "info");
        assert_eq!(inv.command_args, ["a1b2"]);
    }

    #[test]
    fn unmatched_tokens_become_selectors_for_the_default() {
        let inv = Invocation::parse(args(&["water", "2024-03-15"]));
        assert_eq!(inv.command, "timeline");
        assert_eq!(inv.selector_terms, ["water", "2024-03-15"]);
    }
}
