//! Summary statistics, depth distribution and correlation

use crate::app::models::ProfileRow;
use crate::constants::{round_to, MEASUREMENT_DECIMALS};
use serde::{Deserialize, Serialize};

/// Minimum and maximum of an observed quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Dataset-wide summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStatistics {
    pub total_rows: usize,
    pub avg_temperature: f64,
    pub avg_salinity: f64,
    pub depth_range: ValueRange,
    pub latitude_range: ValueRange,
    pub longitude_range: ValueRange,
}

/// Row count at one exact depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBucket {
    pub depth: f64,
    pub count: usize,
}

/// Pearson correlation between temperature and salinity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub correlation: f64,
    pub r_squared: f64,
}

/// Per-depth mean temperature and salinity curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthProfileAnalysis {
    pub depths: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub salinities: Vec<f64>,
}

/// Compute dataset-wide summary statistics
///
/// An empty slice yields all-zero statistics rather than an error.
pub fn basic_statistics(rows: &[ProfileRow]) -> BasicStatistics {
    if rows.is_empty() {
        let zero = ValueRange { min: 0.0, max: 0.0 };
        return BasicStatistics {
            total_rows: 0,
            avg_temperature: 0.0,
            avg_salinity: 0.0,
            depth_range: zero.clone(),
            latitude_range: zero.clone(),
            longitude_range: zero,
        };
    }

    let range = |extract: fn(&ProfileRow) -> f64| {
        let values = rows.iter().map(extract);
        ValueRange {
            min: values.clone().fold(f64::INFINITY, f64::min),
            max: values.fold(f64::NEG_INFINITY, f64::max),
        }
    };

    BasicStatistics {
        total_rows: rows.len(),
        avg_temperature: round_to(mean(rows.iter().map(|r| r.temperature)), 2),
        avg_salinity: round_to(
            mean(rows.iter().map(|r| r.salinity)),
            MEASUREMENT_DECIMALS,
        ),
        depth_range: range(|r| r.depth),
        latitude_range: range(|r| r.latitude),
        longitude_range: range(|r| r.longitude),
    }
}

/// Count rows per exact depth, ordered by increasing depth
pub fn depth_distribution(rows: &[ProfileRow]) -> Vec<DepthBucket> {
    let mut groups = group_by_depth(rows);
    groups
        .drain(..)
        .map(|(depth, members)| DepthBucket {
            depth,
            count: members.len(),
        })
        .collect()
}

/// Pearson correlation between temperature and salinity
///
/// Fewer than two rows, or a constant series, yields zero correlation.
pub fn temperature_salinity_correlation(rows: &[ProfileRow]) -> CorrelationResult {
    if rows.len() < 2 {
        return CorrelationResult {
            correlation: 0.0,
            r_squared: 0.0,
        };
    }

    let temps: Vec<f64> = rows.iter().map(|r| r.temperature).collect();
    let sals: Vec<f64> = rows.iter().map(|r| r.salinity).collect();
    let t_mean = mean(temps.iter().copied());
    let s_mean = mean(sals.iter().copied());

    let mut covariance = 0.0;
    let mut t_var = 0.0;
    let mut s_var = 0.0;
    for (t, s) in temps.iter().zip(sals.iter()) {
        let dt = t - t_mean;
        let ds = s - s_mean;
        covariance += dt * ds;
        t_var += dt * dt;
        s_var += ds * ds;
    }

    if t_var == 0.0 || s_var == 0.0 {
        return CorrelationResult {
            correlation: 0.0,
            r_squared: 0.0,
        };
    }

    let correlation = covariance / (t_var.sqrt() * s_var.sqrt());
    CorrelationResult {
        correlation: round_to(correlation, 4),
        r_squared: round_to(correlation * correlation, 4),
    }
}

/// Mean temperature and salinity per exact depth
///
/// An optional depth window restricts the rows considered. The three
/// returned vectors are parallel, sorted by increasing depth.
pub fn depth_profile_analysis(
    rows: &[ProfileRow],
    depth_range: Option<(f64, f64)>,
) -> DepthProfileAnalysis {
    let selected: Vec<&ProfileRow> = rows
        .iter()
        .filter(|r| match depth_range {
            Some((lo, hi)) => r.depth >= lo && r.depth <= hi,
            None => true,
        })
        .collect();

    let mut depths = Vec::new();
    let mut temperatures = Vec::new();
    let mut salinities = Vec::new();

    let mut sorted = selected;
    sorted.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let mut i = 0;
    while i < sorted.len() {
        let depth = sorted[i].depth;
        let mut j = i;
        while j < sorted.len() && sorted[j].depth == depth {
            j += 1;
        }
        let group = &sorted[i..j];
        depths.push(depth);
        temperatures.push(round_to(mean(group.iter().map(|r| r.temperature)), 2));
        salinities.push(round_to(
            mean(group.iter().map(|r| r.salinity)),
            MEASUREMENT_DECIMALS,
        ));
        i = j;
    }

    DepthProfileAnalysis {
        depths,
        temperatures,
        salinities,
    }
}

/// Group rows by exact depth value, ordered by increasing depth
fn group_by_depth(rows: &[ProfileRow]) -> Vec<(f64, Vec<&ProfileRow>)> {
    let mut sorted: Vec<&ProfileRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let mut groups: Vec<(f64, Vec<&ProfileRow>)> = Vec::new();
    for row in sorted {
        match groups.last_mut() {
            Some((depth, members)) if *depth == row.depth => members.push(row),
            _ => groups.push((row.depth, vec![row])),
        }
    }
    groups
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
