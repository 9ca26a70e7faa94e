//! Quality-control masking for per-level measurements
//!
//! ARGO carries one QC flag per measurement value. Rejected values are
//! replaced with a NaN sentinel so parallel arrays keep their alignment
//! until the shared valid-level mask compacts them.

/// Replace measurements whose QC flag is outside the accepted set with NaN
///
/// Extra measurements beyond the flag array are treated as unflagged and
/// rejected. NaN inputs stay NaN regardless of their flag.
pub fn apply_mask(values: &[f64], flags: &[i32], accepted: &[i32]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| match flags.get(i) {
            Some(flag) if accepted.contains(flag) => v,
            _ => f64::NAN,
        })
        .collect()
}

/// Compute the shared valid-level mask across the three measured variables
///
/// A level is valid only when pressure, temperature and salinity all
/// survived masking. Arrays of different lengths contribute `false` beyond
/// their end.
pub fn valid_level_mask(pressure: &[f64], temperature: &[f64], salinity: &[f64]) -> Vec<bool> {
    let n = pressure.len().max(temperature.len()).max(salinity.len());
    (0..n)
        .map(|i| {
            let finite = |vals: &[f64]| vals.get(i).map(|v| v.is_finite()).unwrap_or(false);
            finite(pressure) && finite(temperature) && finite(salinity)
        })
        .collect()
}

/// Keep only the values at positions the mask marks valid
pub fn compact<T: Copy>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask.iter())
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}
