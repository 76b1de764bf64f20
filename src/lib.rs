//! # Moon Tracker Core Library
//!
//! This library computes where the Moon is for an observer on Earth and, from
//! that, when it rises and how much of it is lit. It feeds a nightly
//! stargazing forecast: a bright Moon above the horizon washes out faint stars,
//! so each forecast day is annotated with its moonrise time and illumination.
//!
//! ## Design Philosophy
//!
//! ### Pure and Cheap
//! - **No I/O in the core**: every function is a pure computation over its
//!   inputs and is safe to call from any number of threads
//! - **Bounded work**: a moonrise search evaluates the Moon's altitude exactly
//!   25 times, whatever the location
//! - **Value types only**: all intermediate results are small `Copy` structs
//!
//! ### Approximate by Construction
//! The ephemeris uses a handful of mean orbital elements rather than a full
//! lunar theory, and the rise search fits parabolas through hourly samples.
//! Moonrise times land within about ten minutes of precise almanac values,
//! which is plenty for deciding whether tonight is dark.
//!
//! ### Computation Chain
//! 1. [`angles`]: degree-based trig primitives
//! 2. [`ephemeris`]: Earth mean anomaly and the Moon's ecliptic position
//! 3. [`observer`]: declination, right ascension, sidereal time, hour angle,
//!    apparent altitude
//! 4. [`riseset`]: windowed quadratic search for the ascending horizon crossing
//! 5. [`phase`]: phase fraction → illuminated fraction (independent of 1–4)
//!
//! ## Core Types
//! - [`Instant`]: a timestamp that carries its UTC offset
//! - [`GeoPosition`]: observer latitude/longitude, east-positive longitude

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod angles;
pub mod config;
pub mod ephemeris;
pub mod forecast;
pub mod observer;
pub mod phase;
pub mod renderer;
pub mod riseset;

pub use forecast::{DailyMoon, MoonReport};
pub use observer::altitude;
pub use phase::illumination;
pub use riseset::rise_time;

/// A point in time together with the observer's UTC offset.
///
/// Ephemeris calculations use the UTC instant; sidereal time also reads the
/// local clock, so the offset must be the observer's own.
pub type Instant = DateTime<FixedOffset>;

/// Observer location in decimal degrees.
///
/// Longitude is positive east of Greenwich (Seattle is about −122.3). Values
/// outside ±90 / ±180 are not rejected; they make the altitude come back NaN
/// or meaningless rather than failing.
///
/// # Example
/// ```
/// use moon_clock_lib::GeoPosition;
///
/// let seattle = GeoPosition::new(47.6062, -122.3321);
/// assert_eq!(seattle.west_longitude(), 122.3321);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Degrees north of the equator (−90 to 90)
    pub latitude: f64,
    /// Degrees east of Greenwich (−180 to 180)
    pub longitude: f64,
}

impl GeoPosition {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPosition {
            latitude,
            longitude,
        }
    }

    /// Longitude measured westward from Greenwich.
    ///
    /// The sidereal-time formulas are written in this convention. This is the
    /// only place the sign is flipped.
    pub fn west_longitude(&self) -> f64 {
        -self.longitude
    }
}

/// Local midnight at the start of `date` for an observer at `offset`.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate, Timelike};
/// use moon_clock_lib::start_of_day;
///
/// let pdt = FixedOffset::west_opt(7 * 3600).unwrap();
/// let midnight = start_of_day(NaiveDate::from_ymd_opt(2020, 6, 4).unwrap(), pdt);
/// assert_eq!(midnight.hour(), 0);
/// assert_eq!(midnight.to_rfc3339(), "2020-06-04T00:00:00-07:00");
/// ```
pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Instant {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
