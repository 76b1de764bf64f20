//! # Degree-Based Trigonometry
//!
//! Every ephemeris formula in this crate is written in degrees, the way the
//! published low-precision lunar formulas are. This module is the single place
//! where degrees cross into radians and back, so downstream code composes
//! `sin(λ)`, `asin_deg(..)` and friends without repeating the conversion.
//!
//! None of these functions fail: NaN in, NaN out, and inverse functions return
//! NaN for arguments outside their domain.

/// Sine of an angle given in degrees.
pub fn sin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees.
pub fn cos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees.
pub fn tan(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine, in degrees. NaN outside `[-1, 1]`.
pub fn asin_deg(value: f64) -> f64 {
    value.asin().to_degrees()
}

/// Arccosine, in degrees. NaN outside `[-1, 1]`.
pub fn acos_deg(value: f64) -> f64 {
    value.acos().to_degrees()
}

/// Four-quadrant arctangent of `y / x`, in degrees within `(-180, 180]`.
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Reduce an angle to `[0, 360)`.
///
/// Uses the Euclidean remainder so negative inputs (dates before J2000,
/// negative hour angles) still land in range.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}
