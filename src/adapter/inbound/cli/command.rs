//! Command-line interface definitions.
//!
//! Defines the CLI structure for the squidbet binary using `clap`: replaying
//! scripted tournaments and inspecting configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pari-mutuel elimination tournament engine
#[derive(Parser, Debug)]
#[command(name = "squidbet")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the squidbet CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scripted tournament and print the results
    Simulate(SimulateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `squidbet config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Scenario file to replay.
    pub scenario: PathBuf,

    /// Configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulate_takes_optional_config() {
        let cli = Cli::parse_from(["squidbet", "simulate", "s.toml", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.scenario, PathBuf::from("s.toml"));
                assert!(args.config.is_none());
            }
            Commands::Config(_) => panic!("expected simulate"),
        }
    }

    #[test]
    fn config_path_defaults() {
        let cli = Cli::parse_from(["squidbet", "config", "validate"]);
        match cli.command {
            Commands::Config(ConfigCommand::Validate(arg)) => {
                assert_eq!(arg.config, PathBuf::from("config.toml"));
            }
            _ => panic!("expected config validate"),
        }
    }
}
