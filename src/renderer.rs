//! # Moon Report Rendering
//!
//! Renders a [`MoonReport`] as a plain-text table for terminals and logs:
//!
//! ```text
//! Seattle, WA (47.6062, -122.3321)
//!
//! Date        Moonrise          Illumination
//! 2020-06-04  8:03 PM -07:00    ██████████  99%
//! 2020-06-08  —                 █████████░  89%
//! ```
//!
//! Reports whose phases were estimated rather than taken from weather data
//! carry a warning line so readers know the illumination is approximate.

use crate::MoonReport;

/// Width of the illumination bar in characters.
const BAR_WIDTH: usize = 10;

/// Width of the moonrise column.
const RISE_COLUMN_WIDTH: usize = 18;

/// Placeholder for days without a moonrise.
const NO_RISE: &str = "—";

/// Horizontal bar with one filled cell per tenth of illumination.
fn illumination_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}

/// Illumination as a whole percentage, right-aligned to four characters.
fn format_illumination(fraction: f64) -> String {
    format!("{:>3}%", (fraction.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Render the whole report as a multi-line string.
pub fn render_ascii(report: &MoonReport) -> String {
    let mut lines = Vec::with_capacity(report.days.len() + 4);

    if report.estimated {
        lines.push("⚠ ESTIMATED PHASE".to_string());
    }
    lines.push(format!(
        "{} ({}, {})",
        report.observer, report.position.latitude, report.position.longitude
    ));
    lines.push(String::new());
    lines.push(format!(
        "{:<12}{:<width$}Illumination",
        "Date",
        "Moonrise",
        width = RISE_COLUMN_WIDTH
    ));

    for day in &report.days {
        let rise = day.moonrise_time_local.as_deref().unwrap_or(NO_RISE);
        lines.push(format!(
            "{:<12}{:<width$}{}  {}",
            day.date.format("%Y-%m-%d").to_string(),
            rise,
            illumination_bar(day.moon_illumination),
            format_illumination(day.moon_illumination),
            width = RISE_COLUMN_WIDTH
        ));
    }

    lines.join("\n")
}

/// Print the report to stdout.
pub fn draw_ascii(report: &MoonReport) {
    println!("{}", render_ascii(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailyMoon, GeoPosition};
    use chrono::NaiveDate;

    fn test_report() -> MoonReport {
        MoonReport {
            observer: "Seattle, WA".to_string(),
            position: GeoPosition::new(47.6062, -122.3321),
            days: vec![
                DailyMoon {
                    date: NaiveDate::from_ymd_opt(2020, 6, 4).unwrap(),
                    moonrise: None,
                    moonrise_time_local: Some("8:03 PM -07:00".to_string()),
                    moon_phase: 0.45,
                    moon_illumination: 0.9,
                },
                DailyMoon {
                    date: NaiveDate::from_ymd_opt(2020, 6, 8).unwrap(),
                    moonrise: None,
                    moonrise_time_local: None,
                    moon_phase: 0.6,
                    moon_illumination: 0.904,
                },
            ],
            estimated: false,
        }
    }

    #[test]
    fn test_illumination_bar() {
        assert_eq!(illumination_bar(0.0), "░░░░░░░░░░");
        assert_eq!(illumination_bar(0.5), "█████░░░░░");
        assert_eq!(illumination_bar(1.0), "██████████");
        // Out-of-range input is clamped rather than overflowing the bar
        assert_eq!(illumination_bar(1.7).chars().count(), BAR_WIDTH);
        assert_eq!(illumination_bar(-0.3), "░░░░░░░░░░");
    }

    #[test]
    fn test_format_illumination() {
        assert_eq!(format_illumination(0.0), "  0%");
        assert_eq!(format_illumination(0.904), " 90%");
        assert_eq!(format_illumination(1.0), "100%");
    }

    #[test]
    fn test_ascii_rendering() {
        let rendered = render_ascii(&test_report());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Seattle, WA (47.6062, -122.3321)");
        assert!(lines[2].starts_with("Date"));
        assert!(lines[3].starts_with("2020-06-04  8:03 PM -07:00"));
        assert!(lines[3].ends_with(" 90%"));
        assert!(lines[4].contains(NO_RISE));
        assert!(!rendered.contains("ESTIMATED"));
    }

    #[test]
    fn test_estimated_indicator() {
        let mut report = test_report();
        report.estimated = true;
        let rendered = render_ascii(&report);
        assert!(rendered.starts_with("⚠ ESTIMATED PHASE"));
        draw_ascii(&report);
    }
}
