//! Application constants for ARGO processor
//!
//! This module contains all configuration constants, default values,
//! and mappings used throughout the ARGO processor application.

// =============================================================================
// File Patterns and Variable Names
// =============================================================================

/// File extensions recognised as ARGO NetCDF files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["nc", "netcdf"];

/// ARGO NetCDF variable names
pub mod variables {
    // Per-level measurement variables
    pub const PRESSURE: &str = "PRES";
    pub const TEMPERATURE: &str = "TEMP";
    pub const SALINITY: &str = "PSAL";

    // Matching quality-control flag variables
    pub const PRESSURE_QC: &str = "PRES_QC";
    pub const TEMPERATURE_QC: &str = "TEMP_QC";
    pub const SALINITY_QC: &str = "PSAL_QC";

    // Coordinate variables
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const JULIAN_DATE: &str = "JULD";

    // Per-profile metadata variables
    pub const CYCLE_NUMBER: &str = "CYCLE_NUMBER";
    pub const PLATFORM_NUMBER: &str = "PLATFORM_NUMBER";
    pub const PROJECT_NAME: &str = "PROJECT_NAME";
    pub const PI_NAME: &str = "PI_NAME";
    pub const DATA_CENTRE: &str = "DATA_CENTRE";
    pub const WMO_INST_TYPE: &str = "WMO_INST_TYPE";
    pub const FLOAT_SERIAL_NO: &str = "FLOAT_SERIAL_NO";

    // Dimension names
    pub const PROFILE_DIM: &str = "N_PROF";
    pub const LEVEL_DIM: &str = "N_LEVELS";
}

/// Measurement variables that must be present for a file to be ingestable
pub const REQUIRED_VARIABLES: &[&str] = &[
    variables::PRESSURE,
    variables::TEMPERATURE,
    variables::SALINITY,
];

/// Coordinate variables that must be present for a file to be ingestable
pub const REQUIRED_COORDINATES: &[&str] = &[
    variables::LATITUDE,
    variables::LONGITUDE,
    variables::JULIAN_DATE,
];

// =============================================================================
// Quality Control Constants
// =============================================================================

/// Quality control flag values as defined in the ARGO user manual
pub mod quality_flags {
    /// Good data - passed all real-time and delayed-mode checks
    pub const GOOD: i32 = 1;

    /// Probably good data
    pub const PROBABLY_GOOD: i32 = 2;

    /// Probably bad data - potentially correctable
    pub const PROBABLY_BAD: i32 = 3;

    /// Bad data
    pub const BAD: i32 = 4;

    /// Value changed during delayed-mode QC
    pub const CHANGED: i32 = 5;

    /// Estimated value (interpolated, extrapolated or computed)
    pub const ESTIMATED: i32 = 8;

    /// Missing value
    pub const MISSING: i32 = 9;

    /// Flag values whose measurements are retained during ingestion
    pub const ACCEPTED: &[i32] = &[GOOD, PROBABLY_GOOD, CHANGED, ESTIMATED];

    /// All flag values defined by the ARGO manual
    pub const ALL_VALUES: &[i32] = &[
        GOOD,
        PROBABLY_GOOD,
        PROBABLY_BAD,
        BAD,
        CHANGED,
        ESTIMATED,
        MISSING,
    ];
}

// =============================================================================
// Unit Conversion Constants
// =============================================================================

/// Physical constants for the pressure-to-depth approximation (UNESCO 1983)
pub mod physics {
    /// Standard gravity in m/s^2
    pub const STANDARD_GRAVITY: f64 = 9.80665;

    /// Reference seawater density in kg/m^3
    pub const SEAWATER_DENSITY: f64 = 1025.0;
}

/// Rough conversion factor from degrees of arc to kilometres
pub const DEGREES_TO_KM: f64 = 111.0;

/// Largest ARGO Julian date accepted as plausible (~2223-12-31); the common
/// fill value 999999.0 falls well outside this
pub const MAX_JULIAN_DAYS: f64 = 100_000.0;

// =============================================================================
// Query and Aggregation Defaults
// =============================================================================

/// Default page size for filtered queries
pub const DEFAULT_QUERY_LIMIT: i64 = 100;

/// Hard upper bound on rows returned by a single query
pub const MAX_QUERY_LIMIT: i64 = 10_000;

/// Cap on rows scanned by the nearest-profile search and the aggregation feed
pub const AGGREGATION_SCAN_CAP: i64 = 50_000;

/// Default search radius for nearest-profile queries in km
pub const DEFAULT_NEAREST_RADIUS_KM: f64 = 100.0;

/// Default result count for nearest-profile queries
pub const DEFAULT_NEAREST_LIMIT: usize = 10;

/// Default grid size in degrees for geographic binning
pub const DEFAULT_GRID_SIZE_DEG: f64 = 5.0;

/// Default grid size in degrees for spatial clustering
pub const DEFAULT_CLUSTER_GRID_SIZE_DEG: f64 = 10.0;

/// A grid cell is reported as a cluster when its count exceeds this
pub const CLUSTER_DENSITY_THRESHOLD: usize = 5;

/// Default z-score threshold for outlier detection
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.0;

/// Minimum row count before outlier detection produces any output
pub const OUTLIER_MIN_ROWS: usize = 10;

// =============================================================================
// Persisted Value Rounding
// =============================================================================

/// Decimal places kept for persisted temperature and salinity values
pub const MEASUREMENT_DECIMALS: u32 = 3;

/// Decimal places kept for persisted pressure values
pub const PRESSURE_DECIMALS: u32 = 2;

// =============================================================================
// Helper Functions
// =============================================================================

/// Get quality flag description for human-readable output
pub fn quality_flag_description(flag: i32) -> &'static str {
    match flag {
        quality_flags::GOOD => "Good - passed all QC checks",
        quality_flags::PROBABLY_GOOD => "Probably good",
        quality_flags::PROBABLY_BAD => "Probably bad - potentially correctable",
        quality_flags::BAD => "Bad - should not be used",
        quality_flags::CHANGED => "Changed during delayed-mode QC",
        quality_flags::ESTIMATED => "Estimated value",
        quality_flags::MISSING => "Missing - no data available",
        _ => "Unknown quality flag",
    }
}

/// Check if a quality flag marks a measurement as usable
pub fn is_accepted_flag(flag: i32) -> bool {
    quality_flags::ACCEPTED.contains(&flag)
}

/// Round a value to the given number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
