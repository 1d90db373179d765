//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": serde_json::to_value(&config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Market");
    output::field("Decimals", config.currency.decimals);
    output::field("Fee", format!("{} bps", config.fee_rate().bps()));

    output::section("Tournament");
    output::field("Rounds", config.tournament.rounds);
    output::field("Entry fee", config.tournament.entry_fee);
    output::field(
        "Treasury cut",
        format!("{} bps", config.tournament.treasury_cut_bps),
    );

    output::section("Roles");
    output::field("Owner", config.roles.owner.as_deref().unwrap_or("-"));
    output::field("Admins", output::names(&config.roles.admins));
    output::field("Oracles", output::names(&config.roles.oracles));

    output::section("Randomness");
    output::field(
        "Seed",
        config
            .randomness
            .seed
            .map_or_else(|| "entropy".to_string(), |seed| seed.to_string()),
    );
    output::field("Values", config.randomness.values_per_request);

    for warning in config.warnings() {
        output::warning(&warning);
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let warnings = config.warnings();

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "warnings": warnings,
        }));
        return Ok(());
    }

    output::success("Configuration is valid");
    for warning in &warnings {
        output::warning(warning);
    }
    Ok(())
}
