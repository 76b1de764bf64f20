//! # Low-Precision Lunar Ephemeris
//!
//! Mean orbital elements of the Earth and Moon, anchored on the J2000 epoch
//! (2000-01-01 12:00 UTC) and advanced linearly in days. Accuracy is a few
//! degrees in ecliptic longitude, which is enough to place moonrise within
//! roughly ten minutes.
//!
//! Reference: "Computing planetary positions", aa.quae.nl (Moon section).
//!
//! Every function here is location independent and only depends on the UTC
//! instant, so the observer's offset is irrelevant.

use crate::angles::{normalize_degrees, sin};
use crate::Instant;
use serde::{Deserialize, Serialize};

/// J2000 epoch, 2000-01-01 12:00:00 UTC, as a Unix timestamp.
const J2000_UNIX_SECONDS: i64 = 946_728_000;

const SECONDS_PER_DAY: f64 = 86_400.0;

// Earth mean anomaly: M = M0 + n·Δd
const EARTH_ANOMALY_AT_EPOCH: f64 = 357.529;
const EARTH_ANOMALY_RATE: f64 = 0.985_608;

// Moon argument of latitude (F)
const MOON_LATITUDE_ARG_AT_EPOCH: f64 = 93.272;
const MOON_LATITUDE_ARG_RATE: f64 = 13.229_350;

// Moon mean longitude (L)
const MOON_LONGITUDE_AT_EPOCH: f64 = 218.316;
const MOON_LONGITUDE_RATE: f64 = 13.176_396;

// Moon mean anomaly (Mm)
const MOON_ANOMALY_AT_EPOCH: f64 = 134.963;
const MOON_ANOMALY_RATE: f64 = 13.064_993;

/// Amplitude of the ecliptic latitude oscillation (inclination of the lunar orbit).
const MOON_LATITUDE_AMPLITUDE: f64 = 5.128;
/// Equation of the centre for the Moon.
const MOON_CENTRE_AMPLITUDE: f64 = 6.289;

/// Geocentric ecliptic position of the Moon, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EclipticCoordinates {
    /// Ecliptic latitude β
    pub latitude: f64,
    /// Ecliptic longitude λ (not reduced, may slightly exceed 360)
    pub longitude: f64,
}

/// Signed, fractional days between J2000 and `instant` (normalized to UTC).
///
/// Includes the time of day, so noon UTC on 2000-01-01 is exactly `0.0`.
pub fn days_since_j2000(instant: &Instant) -> f64 {
    let seconds = (instant.timestamp() - J2000_UNIX_SECONDS) as f64
        + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY
}

/// Mean anomaly of the Earth, in `[0, 360)` degrees.
pub fn mean_anomaly_earth(instant: &Instant) -> f64 {
    let days = days_since_j2000(instant);
    normalize_degrees(EARTH_ANOMALY_AT_EPOCH + EARTH_ANOMALY_RATE * days)
}

/// Geocentric ecliptic latitude and longitude of the Moon.
pub fn geocentric_ecliptic_coordinates(instant: &Instant) -> EclipticCoordinates {
    let days = days_since_j2000(instant);

    let argument_of_latitude =
        normalize_degrees(MOON_LATITUDE_ARG_AT_EPOCH + MOON_LATITUDE_ARG_RATE * days);
    let mean_longitude = normalize_degrees(MOON_LONGITUDE_AT_EPOCH + MOON_LONGITUDE_RATE * days);
    let mean_anomaly = normalize_degrees(MOON_ANOMALY_AT_EPOCH + MOON_ANOMALY_RATE * days);

    EclipticCoordinates {
        latitude: MOON_LATITUDE_AMPLITUDE * sin(argument_of_latitude),
        longitude: mean_longitude + MOON_CENTRE_AMPLITUDE * sin(mean_anomaly),
    }
}
