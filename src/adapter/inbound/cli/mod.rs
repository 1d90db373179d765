//! CLI module graph.

pub mod command;
pub mod config;
pub mod output;
pub mod simulate;

use std::path::Path;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand};
use self::output::OutputConfig;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Apply global flags and run the selected command.
pub fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Simulate(args) => {
            let config = load_or_default(args.config.as_deref())?;
            init_logging(&config);
            debug!(scenario = %args.scenario.display(), "Replaying scenario");
            simulate::execute(&args.scenario, &config)
        }
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    }
}

fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Logging follows the config unless `-v` asks for more.
fn init_logging(config: &Config) {
    let mut config = config.clone();
    match output::verbosity() {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    config.init_logging();
}
