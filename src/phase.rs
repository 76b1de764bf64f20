//! # Moon Phase & Illumination
//!
//! Weather providers report the Moon's phase as a fraction of the synodic
//! cycle (`0` = new, `0.25` = first quarter, `0.5` = full, `0.75` = last
//! quarter, `1` = new again). [`illumination`] maps that fraction to the lit
//! fraction of the visible disk.
//!
//! When no provider value is available, [`mean_phase`] estimates the phase
//! from the mean synodic month. Accuracy is about ±1 day, since the true
//! month length wanders by several hours around the mean.

use crate::ephemeris::days_since_j2000;
use crate::Instant;
use std::f64::consts::PI;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_2;

/// Days from J2000 to the reference new moon of 2000-01-06 18:14 UTC.
const REFERENCE_NEW_MOON_DAYS: f64 = 5.259_722;

/// Illuminated fraction (`0..=1`) for a phase fraction (`0..=1`).
///
/// `I = (1 + cos((phase − 0.5)·π / 0.5)) / 2`. New moon (`0` or `1`) gives
/// exactly `0`, full moon (`0.5`) exactly `1`, both quarters `0.5`.
pub fn illumination(phase: f64) -> f64 {
    (1.0 + ((phase - 0.5) * PI / 0.5).cos()) / 2.0
}

/// Estimated phase fraction in `[0, 1)` at `instant`.
pub fn mean_phase(instant: &Instant) -> f64 {
    let age_days = (days_since_j2000(instant) - REFERENCE_NEW_MOON_DAYS)
        .rem_euclid(SYNODIC_MONTH_DAYS);
    let phase = age_days / SYNODIC_MONTH_DAYS;
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_new_moon_is_dark() {
        assert_eq!(illumination(0.0), 0.0);
        assert_eq!(illumination(1.0), 0.0);
    }

    #[test]
    fn test_full_moon_is_fully_lit() {
        assert_eq!(illumination(0.5), 1.0);
    }

    #[test]
    fn test_quarters_are_half_lit() {
        assert_relative_eq!(illumination(0.25), 0.5, epsilon = 1e-9);
        assert_relative_eq!(illumination(0.75), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_illumination_stays_in_unit_interval() {
        for step in 0..=100 {
            let lit = illumination(step as f64 / 100.0);
            assert!((0.0..=1.0).contains(&lit), "illumination {lit} at step {step}");
        }
    }

    #[test]
    fn test_waxing_then_waning() {
        assert!(illumination(0.1) < illumination(0.2));
        assert!(illumination(0.4) < illumination(0.5));
        assert!(illumination(0.6) > illumination(0.7));
    }

    #[test]
    fn test_mean_phase_at_reference_new_moon() {
        let new_moon = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap().fixed_offset();
        let phase = mean_phase(&new_moon);
        assert!(phase < 1e-4 || phase > 1.0 - 1e-4, "phase {phase}");
    }

    #[test]
    fn test_mean_phase_tracks_known_full_moon() {
        // Full moon of 2020-06-05 19:12 UTC
        let full_moon = Utc.with_ymd_and_hms(2020, 6, 5, 19, 12, 0).unwrap().fixed_offset();
        let phase = mean_phase(&full_moon);
        assert!((phase - 0.5).abs() < 0.05, "phase {phase}");
        assert!(illumination(phase) > 0.97);
    }

    #[test]
    fn test_mean_phase_before_epoch_in_range() {
        let old = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap().fixed_offset();
        let phase = mean_phase(&old);
        assert!((0.0..1.0).contains(&phase));
    }
}
