//! # Daily Moon Annotations
//!
//! A stargazing forecast is a list of local calendar days. For each one this
//! module adds the two lunar facts that decide whether the sky will be dark:
//! when the Moon rises, and how much of it is lit.
//!
//! ## Phase Source
//! - **Weather data**: providers report a phase fraction per day; pass it to
//!   [`annotate_days`] and the report is exact to that source
//! - **Estimated**: without provider data, [`estimated_report`] derives the
//!   phase from the mean synodic month and flags the report as estimated
//!
//! ## Output
//! [`DailyMoon`] and [`MoonReport`] serialize to JSON through `serde`, with
//! moonrise both as a full timestamp and as a short local clock string.

use crate::config::{Config, ConfigError};
use crate::phase::{illumination, mean_phase};
use crate::riseset::rise_time;
use crate::{start_of_day, GeoPosition, Instant};
use chrono::{Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default clock format for moonrise, e.g. `8:03 PM -07:00`.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p %:z";

/// Moon facts for one local calendar day.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use moon_clock_lib::{forecast::annotate_day, GeoPosition};
///
/// let seattle = GeoPosition::new(47.6062, -122.3321);
/// let pdt = FixedOffset::west_opt(7 * 3600).unwrap();
/// let day = annotate_day(
///     NaiveDate::from_ymd_opt(2020, 6, 5).unwrap(),
///     pdt,
///     &seattle,
///     0.5,
///     "%H:%M",
/// );
///
/// assert_eq!(day.moon_illumination, 1.0);
/// assert!(day.moonrise_time_local.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyMoon {
    /// Local calendar date
    pub date: NaiveDate,
    /// Moonrise, rounded to the minute; `None` if the Moon does not rise
    pub moonrise: Option<Instant>,
    /// Moonrise formatted as a local clock time
    pub moonrise_time_local: Option<String>,
    /// Phase fraction, 0 = new, 0.5 = full
    pub moon_phase: f64,
    /// Illuminated fraction of the disk (0–1)
    pub moon_illumination: f64,
}

/// Consecutive days of moon data for one observer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoonReport {
    /// Human-readable observer name
    pub observer: String,
    pub position: GeoPosition,
    pub days: Vec<DailyMoon>,
    /// True if phases come from the mean-synodic-month estimate rather than
    /// weather data
    pub estimated: bool,
}

/// Format `instant` with a chrono format string.
///
/// Falls back to RFC 3339 if `format` contains invalid specifiers.
pub fn format_time(instant: &Instant, format: &str) -> String {
    let mut formatted = String::new();
    match write!(formatted, "{}", instant.format(format)) {
        Ok(()) => formatted,
        Err(_) => {
            log::warn!("invalid time format {format:?}, using RFC 3339");
            instant.to_rfc3339()
        }
    }
}

/// Annotate a single day with its moonrise and illumination.
pub fn annotate_day(
    date: NaiveDate,
    offset: FixedOffset,
    position: &GeoPosition,
    phase: f64,
    time_format: &str,
) -> DailyMoon {
    let moonrise = rise_time(&start_of_day(date, offset), position);
    if moonrise.is_none() {
        log::debug!("{date}: no moonrise at ({}, {})", position.latitude, position.longitude);
    }

    DailyMoon {
        date,
        moonrise,
        moonrise_time_local: moonrise.map(|rise| format_time(&rise, time_format)),
        moon_phase: phase,
        moon_illumination: illumination(phase),
    }
}

/// Annotate a sequence of `(date, phase)` pairs, typically one per forecast day.
pub fn annotate_days<I>(
    days: I,
    offset: FixedOffset,
    position: &GeoPosition,
    time_format: &str,
) -> Vec<DailyMoon>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    days.into_iter()
        .map(|(date, phase)| annotate_day(date, offset, position, phase, time_format))
        .collect()
}

/// Build a report for `config.forecast.days` days from `start`, with phases
/// estimated at local noon of each day.
pub fn estimated_report(config: &Config, start: NaiveDate) -> Result<MoonReport, ConfigError> {
    config.validate()?;
    let offset = config.observer_offset()?;
    let position = config.position();

    let days = start
        .iter_days()
        .take(config.forecast.days as usize)
        .map(|date| {
            let noon = start_of_day(date, offset) + Duration::hours(12);
            (date, mean_phase(&noon))
        });

    Ok(MoonReport {
        observer: config.observer.name.clone(),
        position,
        days: annotate_days(days, offset, &position, &config.forecast.time_format),
        estimated: true,
    })
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const SEATTLE: GeoPosition = GeoPosition::new(47.6062, -122.3321);

    fn pdt() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_annotate_day_with_moonrise() {
        let day = annotate_day(date(2020, 6, 4), pdt(), &SEATTLE, 0.45, DEFAULT_TIME_FORMAT);
        let rise = day.moonrise.expect("moonrise expected on 2020-06-04");
        assert_eq!(rise.date_naive(), date(2020, 6, 4));
        assert_eq!(rise.second(), 0);

        let label = day.moonrise_time_local.unwrap();
        assert!(label.ends_with("PM -07:00"), "unexpected label {label}");
        assert!((day.moon_illumination - illumination(0.45)).abs() < 1e-12);
    }

    #[test]
    fn test_annotate_day_without_moonrise() {
        let day = annotate_day(date(2020, 6, 8), pdt(), &SEATTLE, 0.6, DEFAULT_TIME_FORMAT);
        assert_eq!(day.moonrise, None);
        assert_eq!(day.moonrise_time_local, None);
    }

    #[test]
    fn test_annotate_days_preserves_order() {
        let input = vec![(date(2020, 6, 4), 0.45), (date(2020, 6, 5), 0.5), (date(2020, 6, 6), 0.53)];
        let days = annotate_days(input.clone(), pdt(), &SEATTLE, "%H:%M");
        assert_eq!(days.len(), 3);
        for (day, (expected_date, phase)) in days.iter().zip(input) {
            assert_eq!(day.date, expected_date);
            assert_eq!(day.moon_phase, phase);
        }
        assert_eq!(days[1].moon_illumination, 1.0);
    }

    #[test]
    fn test_format_time() {
        let instant = start_of_day(date(2020, 6, 4), pdt()) + Duration::minutes(20 * 60 + 3);
        assert_eq!(format_time(&instant, "%H:%M"), "20:03");
        assert_eq!(format_time(&instant, DEFAULT_TIME_FORMAT), "8:03 PM -07:00");
    }

    #[test]
    fn test_format_time_rejects_bad_specifier() {
        let instant = start_of_day(date(2020, 6, 4), pdt());
        assert_eq!(format_time(&instant, "%Q"), instant.to_rfc3339());
    }

    #[test]
    fn test_estimated_report() {
        let mut config = Config::default();
        config.forecast.days = 5;
        let report = estimated_report(&config, date(2020, 6, 3)).unwrap();

        assert!(report.estimated);
        assert_eq!(report.observer, "Seattle, WA");
        assert_eq!(report.days.len(), 5);
        assert_eq!(report.days[0].date, date(2020, 6, 3));
        assert_eq!(report.days[4].date, date(2020, 6, 7));
        // Full moon fell on 2020-06-05
        assert!(report.days[2].moon_illumination > 0.95);
    }

    #[test]
    fn test_estimated_report_rejects_invalid_config() {
        let mut config = Config::default();
        config.observer.latitude = -91.0;
        assert!(matches!(
            estimated_report(&config, date(2020, 6, 3)),
            Err(ConfigError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut config = Config::default();
        config.forecast.days = 2;
        let report = estimated_report(&config, date(2020, 6, 8)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["days"][0]["date"], "2020-06-08");
        assert!(json["days"][0]["moonrise"].is_null());
        assert!(json["days"][1]["moonrise_time_local"].is_string());
        assert_eq!(json["estimated"], true);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2020-06-04").unwrap(), date(2020, 6, 4));
        assert_eq!(parse_date(" 2020-06-04\n").unwrap(), date(2020, 6, 4));
        assert!(matches!(parse_date("06/04/2020"), Err(ConfigError::InvalidDate(_))));
    }
}
