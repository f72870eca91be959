//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Cairn - Workspace bootstrap and toolchain preflight.
#[derive(Debug, Parser)]
#[command(name = "cairn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the bootstrap sequence (default if no command specified)
    Run(RunArgs),

    /// Probe every dependency without remediating or generating
    Check(CheckArgs),

    /// Scaffold .cairn/config.yml for a project
    Init(InitArgs),

    /// Show the parsed configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Never prompt; skip remediations that would need consent
    #[arg(long)]
    pub non_interactive: bool,

    /// Treat failed submodule sync or generation as a non-zero exit
    #[arg(long)]
    pub strict: bool,

    /// Skip submodule synchronization for this run
    #[arg(long)]
    pub skip_submodules: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output the preflight report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Generate a minimal config without comments
    #[arg(long)]
    pub minimal: bool,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["cairn"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "cairn",
            "run",
            "--non-interactive",
            "--strict",
            "--skip-submodules",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.non_interactive);
                assert!(args.strict);
                assert!(args.skip_submodules);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn global_root_applies_after_subcommand() {
        let cli = Cli::try_parse_from(["cairn", "check", "--root", "/proj"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/proj")));
        assert!(matches!(cli.command, Some(Commands::Check(_))));
    }

    #[test]
    fn check_json_flag() {
        let cli = Cli::try_parse_from(["cairn", "check", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => assert!(args.json),
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["cairn", "deploy"]).is_err());
    }
}
