//! Physical unit conversions for ARGO measurements
//!
//! Converts the raw coordinate encodings found in ARGO files (Julian days,
//! unwrapped longitudes, pressure in dbar) into the working units used by
//! the rest of the pipeline.

use crate::constants::{physics, MAX_JULIAN_DAYS};
use crate::{Error, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Convert an ARGO Julian date to a UTC datetime
///
/// ARGO files store observation times as fractional days since the
/// 1950-01-01 00:00:00 UTC reference epoch. Non-finite, negative, or
/// implausibly large values are rejected rather than silently replaced.
pub fn julian_to_datetime(julian_days: f64) -> Result<DateTime<Utc>> {
    if !julian_days.is_finite() || julian_days < 0.0 || julian_days > MAX_JULIAN_DAYS {
        return Err(Error::invalid_julian_date(julian_days));
    }

    let epoch = Utc
        .with_ymd_and_hms(1950, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::invalid_julian_date(julian_days))?;

    // Millisecond resolution is ample for float surfacing times.
    let millis = (julian_days * 86_400_000.0) as i64;
    Ok(epoch + Duration::milliseconds(millis))
}

/// Convert sea pressure to depth using the UNESCO 1983 approximation
///
/// Gravity varies with latitude; the conversion assumes a mean seawater
/// density of 1025 kg/m^3. Pressure is in dbar, the result in metres.
pub fn pressure_to_depth(pressure_dbar: f64, latitude_deg: f64) -> f64 {
    let sin_lat = latitude_deg.to_radians().sin();
    let sin_2lat = (2.0 * latitude_deg).to_radians().sin();
    let gravity = physics::STANDARD_GRAVITY
        * (1.0 + 5.2885e-3 * sin_lat * sin_lat - 5.9e-6 * sin_2lat * sin_2lat);

    pressure_dbar * 10_000.0 / (gravity * physics::SEAWATER_DENSITY)
}

/// Normalize a longitude into the [-180, 180] range
///
/// Applies a single wrap, which covers the 0-360 encoding some data
/// centres use. Values already in range pass through unchanged.
pub fn normalize_longitude(longitude_deg: f64) -> f64 {
    if longitude_deg > 180.0 {
        longitude_deg - 360.0
    } else if longitude_deg < -180.0 {
        longitude_deg + 360.0
    } else {
        longitude_deg
    }
}
