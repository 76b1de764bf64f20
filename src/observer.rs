//! # Observer-Relative Lunar Position
//!
//! Turns the geocentric ecliptic position from [`crate::ephemeris`] into what an
//! observer standing at a [`GeoPosition`] actually sees: equatorial coordinates,
//! local sidereal time, hour angle and finally the apparent altitude above the
//! horizon (with an empirical refraction correction).
//!
//! ## Longitude convention
//!
//! The sidereal-time formula is written for longitudes measured *westward*
//! from Greenwich. Public entry points that take a [`GeoPosition`] convert its
//! eastward-positive longitude once, through [`GeoPosition::west_longitude`];
//! the lower-level functions that take a bare `west_longitude` expect the
//! already-converted value.
//!
//! ## Failure semantics
//!
//! Nothing here panics. A latitude outside `[-90, 90]` drives the inverse trig
//! functions out of their domain and the result comes back as NaN, which
//! callers should read as "indeterminate".

use crate::angles::{acos_deg, asin_deg, atan2_deg, cos, normalize_degrees, sin, tan};
use crate::ephemeris::{geocentric_ecliptic_coordinates, mean_anomaly_earth};
use crate::{GeoPosition, Instant};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Obliquity of the ecliptic (ε), degrees.
const OBLIQUITY: f64 = 23.4397;

/// Longitude of Earth's perihelion plus the ecliptic offset (Π), degrees.
const EARTH_PERIHELION: f64 = 102.937;

/// The Earth turns 15° per clock hour.
const DEGREES_PER_HOUR: f64 = 15.0;

/// Altitude treated as "the horizon" when solving for the horizon hour angle.
const HORIZON_ALTITUDE: f64 = 0.0;

/// Equatorial position of the Moon, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinates {
    /// Declination δ
    pub declination: f64,
    /// Right ascension α, in `(-180, 180]` (not reduced to `[0, 360)`)
    pub right_ascension: f64,
}

/// Apparent (refraction-corrected) altitude of the Moon at one instant and place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltitudeSample {
    pub time: Instant,
    /// Degrees above the horizon; negative below it
    pub degrees: f64,
}

impl AltitudeSample {
    /// Sample the Moon's apparent altitude for `position` at `time`.
    pub fn at(time: Instant, position: &GeoPosition) -> Self {
        AltitudeSample {
            time,
            degrees: altitude(&time, position),
        }
    }

    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

/// Equatorial coordinates from a single ephemeris evaluation.
pub fn equatorial_coordinates(instant: &Instant) -> EquatorialCoordinates {
    let ecliptic = geocentric_ecliptic_coordinates(instant);
    let (beta, lambda) = (ecliptic.latitude, ecliptic.longitude);

    EquatorialCoordinates {
        declination: asin_deg(
            sin(beta) * cos(OBLIQUITY) + cos(beta) * sin(OBLIQUITY) * sin(lambda),
        ),
        right_ascension: atan2_deg(
            sin(lambda) * cos(OBLIQUITY) - tan(beta) * sin(OBLIQUITY),
            cos(lambda),
        ),
    }
}

/// Declination of the Moon (δ), degrees.
pub fn declination(instant: &Instant) -> f64 {
    equatorial_coordinates(instant).declination
}

/// Right ascension of the Moon (α), degrees in `(-180, 180]`.
///
/// Callers that need a canonical angle should apply `normalize_degrees`.
pub fn right_ascension(instant: &Instant) -> f64 {
    equatorial_coordinates(instant).right_ascension
}

/// Hour component of the local clock; minutes and seconds do not count.
fn local_clock_hour(instant: &Instant) -> f64 {
    f64::from(instant.hour())
}

/// Hours to add to the local clock to reach UTC (the negated UTC offset).
fn hours_to_utc(instant: &Instant) -> f64 {
    -f64::from(instant.offset().local_minus_utc()) / 3600.0
}

/// Local sidereal time, degrees in `[0, 360)`.
///
/// The clock term uses only the local hour, so between whole hours the value
/// advances with the mean anomaly alone and jumps 15° at each new hour.
/// `west_longitude` is measured westward from Greenwich; see the module docs.
pub fn sidereal_time(instant: &Instant, west_longitude: f64) -> f64 {
    let greenwich = normalize_degrees(
        mean_anomaly_earth(instant)
            + EARTH_PERIHELION
            + DEGREES_PER_HOUR * (local_clock_hour(instant) + hours_to_utc(instant)),
    );
    normalize_degrees(greenwich - west_longitude)
}

/// Hour angle of the Moon (H = θ − α), degrees.
///
/// Not range-reduced: the result lies in `(-180, 540)`, which only ever feeds
/// periodic functions.
pub fn hour_angle(instant: &Instant, west_longitude: f64) -> f64 {
    sidereal_time(instant, west_longitude) - right_ascension(instant)
}

/// Add the atmospheric refraction lift to a geometric altitude.
///
/// `h_c = h + 0.017 / tan(h + 10.26 / (h + 5.10))`, all in degrees. The
/// correction is largest at the horizon (about 0.48°) and negligible overhead.
/// Altitudes that send the tangent argument to a multiple of 90° come back
/// non-finite; those are far below the horizon and never reach the solver.
pub fn correct_altitude(altitude: f64) -> f64 {
    altitude + 0.017 / tan(altitude + 10.26 / (altitude + 5.10))
}

/// Apparent altitude of the Moon above the horizon, degrees.
pub fn altitude(instant: &Instant, position: &GeoPosition) -> f64 {
    let coords = equatorial_coordinates(instant);
    let latitude = position.latitude;
    let hour_angle = sidereal_time(instant, position.west_longitude()) - coords.right_ascension;

    let geometric = asin_deg(
        sin(latitude) * sin(coords.declination)
            + cos(latitude) * cos(coords.declination) * cos(hour_angle),
    );
    correct_altitude(geometric)
}

/// Hour angle at which the Moon sits on the horizon, degrees in `[0, 180]`.
///
/// NaN when the Moon stays entirely above or below the horizon for the day
/// at this latitude.
pub fn horizon_hour_angle(instant: &Instant, latitude: f64) -> f64 {
    let delta = declination(instant);
    acos_deg((sin(HORIZON_ALTITUDE) - sin(latitude) * sin(delta)) / (cos(latitude) * cos(delta)))
}

/// Local clock time, in hours within `[0, 24)`, at which the Moon crosses the
/// meridian.
///
/// The Moon's position is taken at `instant`, so the estimate drifts by a few
/// minutes for every hour between `instant` and the actual transit.
pub fn transit_time(instant: &Instant, west_longitude: f64) -> f64 {
    let alpha = right_ascension(instant);
    let hours = (alpha + west_longitude - mean_anomaly_earth(instant) - EARTH_PERIHELION)
        / DEGREES_PER_HOUR
        - hours_to_utc(instant);
    hours.rem_euclid(24.0)
}
