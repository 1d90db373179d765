//! Handler for `squidbet simulate`.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::scenario::{Scenario, ScenarioReport};
use crate::domain::Role;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_components, build_tournament};
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "Round")]
    round: usize,
    #[tabled(rename = "Result")]
    winner: String,
    #[tabled(rename = "Pot")]
    pot: String,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Survivors")]
    survivors: String,
}

#[derive(Tabled)]
struct PrizeRow {
    #[tabled(rename = "Winner")]
    winner: String,
    #[tabled(rename = "Prize")]
    amount: String,
}

/// Replay `scenario_path` under `config` and print the report.
pub fn execute(scenario_path: &Path, config: &Config) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let components = build_components(config, scenario.seed);
    components.grant(&scenario.operator, Role::Admin);
    components.grant(&scenario.oracle, Role::Oracle);

    let settings = scenario.settings(config.tournament_settings()?);
    let tournament = build_tournament(&components, settings)?;
    let randomness = components.randomness.clone();
    let report = scenario.run(
        &tournament,
        components.treasury.as_ref(),
        |request| randomness.fulfill(request),
        config.currency.decimals,
    )?;

    if output::is_json() {
        output::json_output(json!({
            "command": "simulate",
            "scenario": scenario_path.display().to_string(),
            "report": serde_json::to_value(&report)?,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Rounds");
    let rows: Vec<RoundRow> = report
        .rounds
        .iter()
        .map(|round| RoundRow {
            round: round.round,
            winner: round.winner.to_string(),
            pot: round.pot.clone(),
            fee: round.fee.clone(),
            survivors: output::names(&round.survivors),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::section("Final Vote");
    output::field("Tally", output::tally(report.tally));
    output::field("Decision", output::decision(report.decision));
    output::note(report.announcement);

    if let Some(draw) = &report.draw {
        output::section("Random Draw");
        output::field("Request", output::muted(draw.request));
        output::field("Value", &draw.value);
        output::field("Index", draw.index);
        output::field("Winner", output::winner(&draw.winner));
    }

    output::section("Prizes");
    let rows: Vec<PrizeRow> = report
        .prizes
        .iter()
        .map(|prize| PrizeRow {
            winner: prize.principal.to_string(),
            amount: prize.amount.clone(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Pool", &report.prize_pool_received);
    output::field("Residual", output::muted(&report.residual));
    output::field("Treasury", &report.treasury);

    output::success(&format!(
        "{} players, {} rounds replayed",
        report.players,
        report.rounds.len()
    ));
}
