//! Z-score outlier detection

use super::statistics::mean;
use crate::app::models::ProfileRow;
use crate::constants::{round_to, OUTLIER_MIN_ROWS};
use serde::{Deserialize, Serialize};

/// One row flagged as an outlier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub value: f64,
    pub z_score: f64,
}

/// Outliers in temperature and salinity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub temperature_outliers: Vec<Outlier>,
    pub salinity_outliers: Vec<Outlier>,
}

/// Flag rows whose temperature or salinity z-score exceeds the threshold
///
/// Uses the population standard deviation. Needs at least ten rows for
/// the statistics to mean anything; smaller datasets report no outliers,
/// as does a constant-valued series.
pub fn detect_outliers(rows: &[ProfileRow], threshold: f64) -> OutlierReport {
    if rows.len() < OUTLIER_MIN_ROWS {
        return OutlierReport {
            temperature_outliers: Vec::new(),
            salinity_outliers: Vec::new(),
        };
    }

    OutlierReport {
        temperature_outliers: flag_outliers(rows, threshold, |r| r.temperature),
        salinity_outliers: flag_outliers(rows, threshold, |r| r.salinity),
    }
}

fn flag_outliers(
    rows: &[ProfileRow],
    threshold: f64,
    extract: fn(&ProfileRow) -> f64,
) -> Vec<Outlier> {
    let m = mean(rows.iter().map(extract));
    let variance = mean(rows.iter().map(|r| {
        let d = extract(r) - m;
        d * d
    }));
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }

    rows.iter()
        .filter_map(|row| {
            let value = extract(row);
            let z = (value - m).abs() / std_dev;
            (z > threshold).then(|| Outlier {
                id: row.id,
                latitude: row.latitude,
                longitude: row.longitude,
                depth: row.depth,
                value,
                z_score: round_to(z, 2),
            })
        })
        .collect()
}
