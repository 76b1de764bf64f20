//! # Moon Tracker Application Entry Point
//!
//! This binary prints a day-by-day moon table for the configured observer:
//! moonrise time and illuminated fraction for each local calendar day.
//! Without a weather provider the phase is estimated from the mean synodic
//! month, and the output says so.
//!
//! ```text
//! moon-tracker [--config PATH] [--date YYYY-MM-DD] [--days N] [--json]
//! ```

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use moon_clock_lib::config::Config;
use moon_clock_lib::{forecast, renderer::draw_ascii};
use std::env;
use std::path::PathBuf;

const USAGE: &str = "usage: moon-tracker [--config PATH] [--date YYYY-MM-DD] [--days N] [--json]";

/// Parsed command line options.
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Explicit config file; a missing or invalid file is an error
    config: Option<PathBuf>,
    /// First local date to report (defaults to today at the observer)
    date: Option<NaiveDate>,
    /// Overrides `forecast.days` from the config
    days: Option<u32>,
    json: bool,
    help: bool,
}

fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--date" => {
                let text = args.next().context("--date needs a YYYY-MM-DD value")?;
                parsed.date = Some(forecast::parse_date(&text)?);
            }
            "--days" => {
                let text = args.next().context("--days needs a number")?;
                let days = text
                    .parse()
                    .with_context(|| format!("invalid --days value {text:?}"))?;
                parsed.days = Some(days);
            }
            "--json" => parsed.json = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }

    Ok(parsed)
}

/// Load the config named on the command line, or the default file with fallback.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(days) = args.days {
        config.forecast.days = days;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = load_config(&args)?;
    let offset = config.observer_offset()?;
    let start = args
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());

    // No weather provider in this binary: phases come from the mean synodic month
    eprintln!(
        "Estimating moon phase for {} from the mean synodic month",
        config.observer.name
    );
    let report = forecast::estimated_report(&config, start)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        draw_ascii(&report);
    }

    Ok(())
}
