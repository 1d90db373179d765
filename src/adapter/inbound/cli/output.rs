//! Terminal output for the CLI.
//!
//! Handlers print through these helpers so that quiet mode and colors are
//! applied in one place. In JSON mode the printing helpers stay silent: each
//! handler emits exactly one document through [`json_output`], and errors go
//! to stderr as a JSON line.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::{const_rwlock, RwLock};
use serde_json::json;

use crate::domain::{Decision, Principal};

/// Global flags that shape every handler's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT: RwLock<OutputConfig> = const_rwlock(OutputConfig::new(false, false, 0));

/// Apply the parsed global flags. Call once, before any handler runs.
pub fn configure(config: OutputConfig) {
    *OUTPUT.write() = config;
}

fn current() -> OutputConfig {
    *OUTPUT.read()
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

fn human() -> bool {
    let config = current();
    !config.json && !config.quiet
}

/// Print the application banner.
pub fn header(version: &str) {
    if !human() {
        return;
    }
    println!("{} {}", "squidbet".bold(), version.dimmed());
    println!();
}

pub fn section(title: &str) {
    if !human() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if !human() {
        return;
    }
    println!("  {:<12} {}", label.dimmed(), value);
}

pub fn note(message: &str) {
    if !human() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print pre-rendered content such as a table, indented.
pub fn lines(content: &str) {
    if !human() {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

pub fn success(message: &str) {
    if !human() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Warnings survive `--quiet`.
pub fn warning(message: &str) {
    if is_json() {
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "message": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Emit the handler's single JSON document.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

// -- Tournament rendering -------------------------------------------------

fn styled(value: impl Display, paint: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        paint(&value)
    }
}

/// A split reads green, a draw yellow.
#[must_use]
pub fn decision(decision: Decision) -> String {
    styled(decision, |text| match decision {
        Decision::SplitEquallyAmongWinners => text.green().to_string(),
        Decision::RandomDrawSingleWinner => text.yellow().to_string(),
    })
}

/// Signed vote tally, e.g. `+2` or `-1`.
#[must_use]
pub fn tally(tally: i64) -> String {
    let text = if tally == 0 {
        "0".to_string()
    } else {
        format!("{tally:+}")
    };
    styled(text, |text| match tally.signum() {
        1 => text.green().to_string(),
        -1 => text.red().to_string(),
        _ => text.dimmed().to_string(),
    })
}

#[must_use]
pub fn winner(principal: &Principal) -> String {
    styled(principal, |text| text.green().bold().to_string())
}

#[must_use]
pub fn muted(value: impl Display) -> String {
    styled(value, |text| text.dimmed().to_string())
}

/// Comma-separated names, or `-` when there are none.
#[must_use]
pub fn names<T: Display>(names: &[T]) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
