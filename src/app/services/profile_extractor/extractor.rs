//! Core profile extraction logic

use super::metadata;
use crate::app::models::ArgoProfile;
use crate::app::services::netcdf_reader::RawDataset;
use crate::app::services::{quality_control, units};
use crate::constants::{variables, REQUIRED_COORDINATES, REQUIRED_VARIABLES};
use crate::{Error, Result};
use tracing::{debug, warn};

/// Check that a dataset carries the variables extraction needs
pub fn validate_dataset(dataset: &RawDataset) -> bool {
    let missing: Vec<&str> = REQUIRED_VARIABLES
        .iter()
        .chain(REQUIRED_COORDINATES.iter())
        .filter(|name| !dataset.has_variable(name))
        .copied()
        .collect();

    if !missing.is_empty() {
        warn!(
            origin = dataset.origin(),
            missing = ?missing,
            "Dataset is missing required variables"
        );
        return false;
    }
    true
}

/// Extract one profile by index
///
/// Returns `Ok(None)` when the profile is unusable (bad coordinates, bad
/// observation date, or no level survives quality control); hard read
/// failures propagate as errors.
pub fn extract_profile(
    dataset: &RawDataset,
    index: usize,
    accepted_flags: &[i32],
) -> Result<Option<ArgoProfile>> {
    let latitude = dataset.scalar_f64(variables::LATITUDE, index)?;
    let longitude = units::normalize_longitude(dataset.scalar_f64(variables::LONGITUDE, index)?);

    if !latitude.is_finite()
        || !longitude.is_finite()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        warn!(
            origin = dataset.origin(),
            index, latitude, longitude, "Skipping profile with invalid coordinates"
        );
        return Ok(None);
    }

    let julian_days = dataset.scalar_f64(variables::JULIAN_DATE, index)?;
    let date = match units::julian_to_datetime(julian_days) {
        Ok(date) => date,
        Err(Error::InvalidJulianDate { value }) => {
            warn!(
                origin = dataset.origin(),
                index, value, "Skipping profile with invalid observation date"
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let pressure = masked_row(
        dataset,
        variables::PRESSURE,
        variables::PRESSURE_QC,
        index,
        accepted_flags,
    )?;
    let temperature = masked_row(
        dataset,
        variables::TEMPERATURE,
        variables::TEMPERATURE_QC,
        index,
        accepted_flags,
    )?;
    let salinity = masked_row(
        dataset,
        variables::SALINITY,
        variables::SALINITY_QC,
        index,
        accepted_flags,
    )?;

    // Depth is derived before compaction so it shares level alignment.
    // Slightly negative surface pressures occur in real files; their depth
    // clamps to the surface instead of invalidating the level.
    let depth: Vec<f64> = pressure
        .iter()
        .map(|&p| {
            if p.is_finite() {
                units::pressure_to_depth(p, latitude).max(0.0)
            } else {
                f64::NAN
            }
        })
        .collect();

    let mask = quality_control::valid_level_mask(&pressure, &temperature, &salinity);
    let pressure = quality_control::compact(&pressure, &mask);
    let temperature = quality_control::compact(&temperature, &mask);
    let salinity = quality_control::compact(&salinity, &mask);
    let depth = quality_control::compact(&depth, &mask);

    if pressure.is_empty() {
        debug!(
            origin = dataset.origin(),
            index, "No levels survived quality control"
        );
        return Ok(None);
    }

    let cycle_number = read_cycle_number(dataset, index);
    let float_id = read_float_id(dataset, index);
    let metadata = metadata::extract_metadata(dataset, index, pressure.len());

    let profile = ArgoProfile {
        float_id,
        cycle_number,
        latitude,
        longitude,
        date,
        pressure,
        temperature,
        salinity,
        depth,
        metadata,
    };
    profile.validate()?;
    Ok(Some(profile))
}

/// Extract every profile in the file, skipping the unusable ones
pub fn extract_all_profiles(dataset: &RawDataset, accepted_flags: &[i32]) -> Vec<ArgoProfile> {
    let n_prof = dataset.dim_len(variables::PROFILE_DIM).unwrap_or(1);
    let mut profiles = Vec::new();

    for index in 0..n_prof {
        match extract_profile(dataset, index, accepted_flags) {
            Ok(Some(profile)) => profiles.push(profile),
            Ok(None) => {}
            Err(e) => {
                warn!(
                    origin = dataset.origin(),
                    index,
                    error = %e,
                    "Failed to extract profile"
                );
            }
        }
    }

    debug!(
        origin = dataset.origin(),
        extracted = profiles.len(),
        total = n_prof,
        "Profile extraction complete"
    );
    profiles
}

/// Read a measurement row and apply its QC mask when flags are present
fn masked_row(
    dataset: &RawDataset,
    var_name: &str,
    qc_name: &str,
    index: usize,
    accepted_flags: &[i32],
) -> Result<Vec<f64>> {
    let values = dataset.row_f64(var_name, index)?;
    if dataset.has_variable(qc_name) {
        let flags = dataset.qc_row(qc_name, index)?;
        Ok(quality_control::apply_mask(&values, &flags, accepted_flags))
    } else {
        Ok(values)
    }
}

fn read_cycle_number(dataset: &RawDataset, index: usize) -> i32 {
    if !dataset.has_variable(variables::CYCLE_NUMBER) {
        return 0;
    }
    match dataset.scalar_f64(variables::CYCLE_NUMBER, index) {
        Ok(v) if v.is_finite() && v >= 0.0 => v as i32,
        _ => 0,
    }
}

fn read_float_id(dataset: &RawDataset, index: usize) -> String {
    if dataset.has_variable(variables::PLATFORM_NUMBER) {
        if let Ok(platform) = dataset.string_at(variables::PLATFORM_NUMBER, index) {
            if !platform.is_empty() {
                return platform;
            }
        }
    }
    "unknown".to_string()
}
