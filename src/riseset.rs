//! # Moonrise Search
//!
//! Finds the first instant on a local calendar day at which the Moon's
//! apparent altitude crosses zero while climbing.
//!
//! ## Algorithm
//!
//! The day is cut into twelve overlapping 2-hour windows centred on the odd
//! hours (1, 3, 5, … 23). For each window the altitude is sampled at the start,
//! middle and end, a parabola is fitted exactly through the three samples,
//! and its real roots inside the window are classified by the slope of the
//! parabola there:
//!
//! ```text
//!   altitude
//!      |             .  ·  ·
//!      |          ·
//!   0 -+-------x-------------------  x = ascending root → moonrise
//!      |    ·
//!      +----+------+------+-------- hours since midnight
//!          i-1     i     i+1
//! ```
//!
//! The end sample of one window is reused as the start of the next, so a full
//! day costs 25 altitude evaluations. The first ascending root wins; later
//! windows are never evaluated.
//!
//! ## No-event days
//!
//! The lunar day is about 24 h 50 min, so roughly once a month the Moon does
//! not rise at all on a given calendar date. Near the poles it can stay above
//! or below the horizon for days. Both cases return `None`, which is a normal
//! outcome and not an error.

use crate::observer::AltitudeSample;
use crate::{start_of_day, GeoPosition, Instant};
use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};

/// Hours covered by a single sampling window.
const WINDOW_HOURS: i64 = 2;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A real root of the fitted parabola.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadraticRoot {
    /// Root position on the x axis (hours since local midnight in the solver)
    pub value: f64,
    /// True when the parabola crosses zero from below at this root
    pub ascending: bool,
}

/// A horizon crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiseEvent {
    pub time: Instant,
    pub ascending: bool,
}

/// Fit `y = a·x² + b·x + c` exactly through three points and return its real
/// roots.
///
/// Roots come back in a fixed order: the `(−b − √D) / 2a` root first, then the
/// `(−b + √D) / 2a` root. The slope `2a·x + b` at those roots is `−√D` and
/// `+√D` respectively, so the second root is the ascending one. When the
/// parabola only touches zero (`D = 0`) both roots coincide and keep those
/// tags. A straight-line fit yields its single root; a flat line or a
/// parabola that never reaches zero yields none.
pub fn solve_quadratic(xs: [f64; 3], ys: [f64; 3]) -> Vec<QuadraticRoot> {
    let [x0, x1, x2] = xs;
    let [y0, y1, y2] = ys;

    // Newton divided differences
    let slope_01 = (y1 - y0) / (x1 - x0);
    let slope_12 = (y2 - y1) / (x2 - x1);
    let a = (slope_12 - slope_01) / (x2 - x0);
    let b = slope_01 - a * (x0 + x1);
    let c = y0 - a * x0 * x0 - b * x0;

    if a == 0.0 {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![QuadraticRoot {
            value: -c / b,
            ascending: b > 0.0,
        }];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        log::debug!(
            "complex roots for a={a:.6}, b={b:.6}, c={c:.6} (discriminant {discriminant:.3e})"
        );
        return Vec::new();
    }

    let root = discriminant.sqrt();
    vec![
        QuadraticRoot {
            value: (-b - root) / (2.0 * a),
            ascending: false,
        },
        QuadraticRoot {
            value: (-b + root) / (2.0 * a),
            ascending: true,
        },
    ]
}

/// Round to the nearest whole minute; 30 seconds and up rounds up.
///
/// Sub-second precision is dropped. Rounding up carries through minutes,
/// hours and, at 23:59:30 or later, into the next day; [`rise_time`] keeps
/// its result inside the local day.
pub fn round_to_minute(instant: Instant) -> Instant {
    let seconds = instant.second();
    let truncated = instant
        - Duration::seconds(i64::from(seconds))
        - Duration::nanoseconds(i64::from(instant.nanosecond()));
    if seconds >= 30 {
        truncated + Duration::minutes(1)
    } else {
        truncated
    }
}

/// Round to the minute without leaving the local day that starts at `midnight`.
///
/// A crossing in the last half minute of the day would round to the next
/// midnight; it is reported as 23:59 instead.
fn round_within_day(time: Instant, midnight: Instant) -> Instant {
    let rounded = round_to_minute(time);
    if rounded >= midnight + Duration::days(1) {
        rounded - Duration::minutes(1)
    } else {
        rounded
    }
}

/// Progress of the window-by-window search.
#[derive(Clone, Copy, Debug)]
enum SearchState {
    /// Still looking; `start` is the altitude sample at the current window start.
    Searching { start: AltitudeSample },
    Found(RiseEvent),
}

impl SearchState {
    /// Evaluate the window centred on `centre_hour` (hours since `midnight`).
    fn advance(self, midnight: Instant, centre_hour: i64, position: &GeoPosition) -> SearchState {
        let start = match self {
            SearchState::Searching { start } => start,
            found @ SearchState::Found(_) => return found,
        };

        let middle = AltitudeSample::at(start.time + Duration::hours(1), position);
        let end = AltitudeSample::at(start.time + Duration::hours(WINDOW_HOURS), position);

        let centre = centre_hour as f64;
        let (low, high) = (centre - 1.0, centre + 1.0);
        let roots = solve_quadratic(
            [low, centre, high],
            [start.radians(), middle.radians(), end.radians()],
        );

        if roots.is_empty() && start.degrees.signum() != end.degrees.signum() {
            log::warn!(
                "window {low}-{high}h: altitude changes sign ({:.3}° → {:.3}°) but fit has no real roots, skipping",
                start.degrees,
                end.degrees
            );
        }

        let rise = roots
            .iter()
            .filter(|root| root.value > low && root.value < high)
            .find(|root| root.ascending);

        match rise {
            Some(root) => {
                let offset = Duration::milliseconds((root.value * MILLIS_PER_HOUR).round() as i64);
                log::debug!("window {low}-{high}h: ascending root at {:.4}h", root.value);
                SearchState::Found(RiseEvent {
                    time: midnight + offset,
                    ascending: true,
                })
            }
            None => SearchState::Searching { start: end },
        }
    }
}

/// Unrounded moonrise on the calendar day of `local_date`, if any.
pub fn find_rise_event(local_date: &Instant, position: &GeoPosition) -> Option<RiseEvent> {
    let midnight = start_of_day(local_date.date_naive(), *local_date.offset());
    let mut state = SearchState::Searching {
        start: AltitudeSample::at(midnight, position),
    };

    for centre_hour in (1..24).step_by(WINDOW_HOURS as usize) {
        if let SearchState::Found(_) = state {
            break;
        }
        state = state.advance(midnight, centre_hour, position);
    }

    match state {
        SearchState::Found(event) => Some(event),
        SearchState::Searching { .. } => None,
    }
}

/// Moonrise on the local calendar day of `local_date`, rounded to the minute.
///
/// Only the date and UTC offset of `local_date` matter; its time of day is
/// ignored. Returns `None` when the Moon does not rise that day.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use moon_clock_lib::{riseset::rise_time, GeoPosition};
///
/// let seattle = GeoPosition::new(47.6062, -122.3321);
/// let pdt = FixedOffset::west_opt(7 * 3600).unwrap();
/// let date = pdt.with_ymd_and_hms(2020, 6, 4, 0, 0, 0).unwrap();
///
/// let rise = rise_time(&date, &seattle).expect("the Moon rises that evening");
/// assert_eq!(rise.date_naive(), date.date_naive());
/// ```
pub fn rise_time(local_date: &Instant, position: &GeoPosition) -> Option<Instant> {
    let midnight = start_of_day(local_date.date_naive(), *local_date.offset());
    find_rise_event(local_date, position).map(|event| round_within_day(event.time, midnight))
}
