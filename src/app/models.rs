//! Data models for ARGO profile processing
//!
//! This module contains the core data structures for representing ARGO float
//! profiles, persisted per-level measurement rows, and query filters,
//! following the ARGO user manual conventions.

use crate::constants::{self, quality_flags};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// =============================================================================
// Quality Flag Enumeration
// =============================================================================

/// Quality control flag values for ARGO measurements
///
/// These flags indicate the quality assessment status of individual
/// measurements according to the ARGO real-time and delayed-mode QC tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum QcFlag {
    /// Passed all QC tests - highest quality
    Good = quality_flags::GOOD,

    /// Probably good data
    ProbablyGood = quality_flags::PROBABLY_GOOD,

    /// Probably bad data - potentially correctable
    ProbablyBad = quality_flags::PROBABLY_BAD,

    /// Bad data - should not be used
    Bad = quality_flags::BAD,

    /// Value changed during delayed-mode QC
    Changed = quality_flags::CHANGED,

    /// Estimated value (interpolated, extrapolated or computed)
    Estimated = quality_flags::ESTIMATED,

    /// No quality information available (missing data)
    Missing = quality_flags::MISSING,
}

impl QcFlag {
    /// Check if this flag marks a measurement as usable
    pub fn is_accepted(self) -> bool {
        constants::is_accepted_flag(self as i32)
    }

    /// Get human-readable description of this quality flag
    pub fn description(self) -> &'static str {
        constants::quality_flag_description(self as i32)
    }
}

impl TryFrom<i32> for QcFlag {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            quality_flags::GOOD => Ok(QcFlag::Good),
            quality_flags::PROBABLY_GOOD => Ok(QcFlag::ProbablyGood),
            quality_flags::PROBABLY_BAD => Ok(QcFlag::ProbablyBad),
            quality_flags::BAD => Ok(QcFlag::Bad),
            quality_flags::CHANGED => Ok(QcFlag::Changed),
            quality_flags::ESTIMATED => Ok(QcFlag::Estimated),
            quality_flags::MISSING => Ok(QcFlag::Missing),
            _ => Err(Error::data_validation(format!(
                "Invalid QC flag value {}: must be 1, 2, 3, 4, 5, 8, or 9",
                value
            ))),
        }
    }
}

impl FromStr for QcFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: i32 = s.trim().parse().map_err(|_| {
            Error::data_validation(format!("Invalid QC flag value '{}': not a number", s))
        })?;
        QcFlag::try_from(value)
    }
}

impl std::fmt::Display for QcFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as i32)
    }
}

// =============================================================================
// In-Memory Profile Structure
// =============================================================================

/// One vertical cast from one float at one point in time
///
/// Holds the parallel per-level measurement sequences that survive quality
/// control, plus the scalar coordinates and metadata extracted from the
/// source file. Immutable once built; consumed by the ingestion pipeline
/// which explodes it into one persisted row per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgoProfile {
    /// Float identifier (trimmed WMO platform number)
    pub float_id: String,

    /// Sequential index of the float's surfacing/measurement event
    pub cycle_number: i32,

    /// Profile latitude in decimal degrees, [-90, 90]
    pub latitude: f64,

    /// Profile longitude in decimal degrees, normalized to [-180, 180]
    pub longitude: f64,

    /// Observation date and time (converted from the ARGO Julian date)
    pub date: DateTime<Utc>,

    /// Pressure at each valid level in dbar
    pub pressure: Vec<f64>,

    /// Temperature at each valid level in degrees C
    pub temperature: Vec<f64>,

    /// Practical salinity at each valid level in PSU
    pub salinity: Vec<f64>,

    /// Derived depth at each valid level in metres
    pub depth: Vec<f64>,

    /// Free-form metadata extracted from the source file
    pub metadata: HashMap<String, String>,
}

impl ArgoProfile {
    /// Validate profile data for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        let n = self.pressure.len();
        if self.temperature.len() != n || self.salinity.len() != n || self.depth.len() != n {
            return Err(Error::data_validation(format!(
                "Parallel measurement arrays have mismatched lengths: \
                 pressure={}, temperature={}, salinity={}, depth={}",
                n,
                self.temperature.len(),
                self.salinity.len(),
                self.depth.len()
            )));
        }

        if n == 0 {
            return Err(Error::data_validation(
                "Profile must contain at least one valid level".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if self.cycle_number < 0 {
            return Err(Error::data_validation(format!(
                "Cycle number {} must be non-negative",
                self.cycle_number
            )));
        }

        Ok(())
    }

    /// Number of valid measurement levels in this profile
    pub fn n_levels(&self) -> usize {
        self.pressure.len()
    }
}

// =============================================================================
// Persisted Row Structure
// =============================================================================

/// One depth level of one ARGO profile, as persisted
///
/// Rows are independent after creation: updates overwrite individual fields
/// and deletion removes single rows, they are never re-derived from files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRow {
    /// Surrogate primary key (0 until persisted)
    pub id: i64,

    /// Float identifier
    pub float_id: String,

    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,

    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,

    /// Derived depth in metres (rounded to whole metres at ingestion)
    pub depth: f64,

    /// Original pressure measurement in dbar
    pub pressure: Option<f64>,

    /// Sea temperature in degrees C
    pub temperature: f64,

    /// Practical salinity in PSU
    pub salinity: f64,

    /// Observation month, 1-12
    pub month: i32,

    /// Observation year
    pub year: i32,

    /// Observation calendar date
    pub date: Option<NaiveDate>,

    /// Profile cycle number
    pub cycle_number: i32,

    /// 0-based depth level index within the parent profile
    pub level_number: i32,

    /// Free-form metadata as a JSON object string
    pub metadata: Option<String>,
}

impl ProfileRow {
    /// Validate row fields against the persisted-value invariants
    pub fn validate(&self) -> Result<()> {
        if self.float_id.trim().is_empty() {
            return Err(Error::data_validation(
                "Float id cannot be empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if self.depth < 0.0 {
            return Err(Error::data_validation(format!(
                "Invalid depth {}: must be non-negative",
                self.depth
            )));
        }

        if !(1..=12).contains(&self.month) {
            return Err(Error::data_validation(format!(
                "Invalid month {}: must be between 1 and 12",
                self.month
            )));
        }

        Ok(())
    }

    /// Parse the metadata JSON string into a map, empty when absent or invalid
    pub fn metadata_map(&self) -> HashMap<String, String> {
        self.metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// Partial field overwrite for an existing profile row
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub float_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub depth: Option<f64>,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub salinity: Option<f64>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub date: Option<NaiveDate>,
    pub cycle_number: Option<i32>,
}

impl ProfileUpdate {
    /// True when the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.float_id.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.depth.is_none()
            && self.pressure.is_none()
            && self.temperature.is_none()
            && self.salinity.is_none()
            && self.month.is_none()
            && self.year.is_none()
            && self.date.is_none()
            && self.cycle_number.is_none()
    }
}

// =============================================================================
// Query Filter Specification
// =============================================================================

/// Optional bounded ranges plus pagination for row queries
///
/// Absent bounds impose no constraint; all present bounds are ANDed as
/// inclusive range predicates. Constructed per request either directly from
/// parameters or by the intent parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub salinity_min: Option<f64>,
    pub salinity_max: Option<f64>,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,

    /// Exact observation month match, 1-12
    pub month: Option<i32>,

    /// Exact observation year match
    pub year: Option<i32>,

    /// Rows to skip before returning results
    pub skip: i64,

    /// Page size; store default applies when absent
    pub limit: Option<i64>,
}

impl FilterSpec {
    /// True when no filter predicate is present (pagination fields excluded)
    pub fn is_empty(&self) -> bool {
        self.depth_min.is_none()
            && self.depth_max.is_none()
            && self.temp_min.is_none()
            && self.temp_max.is_none()
            && self.salinity_min.is_none()
            && self.salinity_max.is_none()
            && self.lat_min.is_none()
            && self.lat_max.is_none()
            && self.lon_min.is_none()
            && self.lon_max.is_none()
            && self.month.is_none()
            && self.year.is_none()
    }
}
