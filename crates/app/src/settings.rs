use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{Id, OperationType};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `tally` and `engine` targets.
    pub level: String,
    /// JSON snapshot restored into the engine at startup.
    pub snapshot: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            snapshot: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Inspect accounts, categories and operations of a ledger snapshot")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long, global = true)]
    level: Option<String>,
    /// Override the snapshot file to load.
    #[arg(long, global = true)]
    snapshot: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List accounts with their balances.
    Accounts,
    /// List categories, optionally of one type.
    Categories {
        #[arg(long = "type")]
        kind: Option<OperationType>,
    },
    /// List operations and their totals.
    Operations(OperationArgs),
    /// Print the whole store as a snapshot.
    Export {
        /// Write to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct OperationArgs {
    #[arg(long)]
    pub account: Option<Id>,
    #[arg(long)]
    pub category: Option<Id>,
    #[arg(long = "type")]
    pub kind: Option<OperationType>,
    /// Start of the period, RFC 3339 or YYYY-MM-DD (inclusive).
    #[arg(long, value_parser = parse_from)]
    pub from: Option<DateTime<Utc>>,
    /// End of the period, RFC 3339 or YYYY-MM-DD (inclusive).
    #[arg(long, value_parser = parse_to)]
    pub to: Option<DateTime<Utc>>,
}

pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TALLY"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }
    if let Some(snapshot) = &cli.snapshot {
        settings.snapshot = Some(snapshot.clone());
    }

    Ok(settings)
}

fn parse_from(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    parse_bound(value, NaiveTime::MIN)
}

fn parse_to(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .ok_or_else(|| "invalid end of day".to_string())?;
    parse_bound(value, end_of_day)
}

/// A bare date expands to `time` on that day, UTC.
fn parse_bound(value: &str, time: NaiveTime) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(time).and_utc())
        .map_err(|err| format!("expected RFC 3339 or YYYY-MM-DD: {err}"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn bare_dates_cover_the_whole_day() {
        let from = parse_from("2025-04-01").unwrap();
        let to = parse_to("2025-04-01").unwrap();

        assert_eq!(from, Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());
        assert_eq!(to.hour(), 23);
        assert!(to > from);
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        let parsed = parse_from("2025-04-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap());
        assert!(parse_to("April 1st").is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "tally",
            "--config",
            "does/not/exist",
            "--level",
            "debug",
            "categories",
            "--type",
            "income",
        ]);
        let settings = load(&cli).unwrap();

        assert_eq!(settings.level, "debug");
        assert_eq!(settings.snapshot, None);
        assert!(matches!(
            cli.command,
            Command::Categories {
                kind: Some(OperationType::Income)
            }
        ));
    }
}
