//! Monthly and yearly aggregation plus linear trend fitting

use super::statistics::mean;
use crate::app::models::ProfileRow;
use crate::constants::{round_to, MEASUREMENT_DECIMALS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregates for one calendar month across all years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub month: i32,
    pub count: usize,
    pub avg_temperature: f64,
    pub avg_salinity: f64,
}

/// Aggregates for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStats {
    pub year: i32,
    pub count: usize,
    pub avg_temperature: f64,
    pub avg_salinity: f64,
}

/// Monthly and yearly aggregation of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub monthly: Vec<MonthlyStats>,
    pub yearly: Vec<YearlyStats>,
}

/// Linear trends fitted over the monthly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Slope of row counts across the observed months
    pub monthly_count_trend: f64,
    /// Slope of mean temperature across the observed months
    pub monthly_temperature_trend: f64,
    pub temporal_data: TemporalAnalysis,
}

/// Aggregate rows by observation month and year
///
/// Only observed months and years appear, in ascending order.
pub fn temporal_analysis(rows: &[ProfileRow]) -> TemporalAnalysis {
    let mut by_month: BTreeMap<i32, Vec<&ProfileRow>> = BTreeMap::new();
    let mut by_year: BTreeMap<i32, Vec<&ProfileRow>> = BTreeMap::new();
    for row in rows {
        by_month.entry(row.month).or_default().push(row);
        by_year.entry(row.year).or_default().push(row);
    }

    let monthly = by_month
        .into_iter()
        .map(|(month, members)| MonthlyStats {
            month,
            count: members.len(),
            avg_temperature: round_to(mean(members.iter().map(|r| r.temperature)), 2),
            avg_salinity: round_to(
                mean(members.iter().map(|r| r.salinity)),
                MEASUREMENT_DECIMALS,
            ),
        })
        .collect();

    let yearly = by_year
        .into_iter()
        .map(|(year, members)| YearlyStats {
            year,
            count: members.len(),
            avg_temperature: round_to(mean(members.iter().map(|r| r.temperature)), 2),
            avg_salinity: round_to(
                mean(members.iter().map(|r| r.salinity)),
                MEASUREMENT_DECIMALS,
            ),
        })
        .collect();

    TemporalAnalysis { monthly, yearly }
}

/// Fit degree-one least-squares trends over the monthly series
///
/// With fewer than two observed months both slopes are zero.
pub fn trend_analysis(rows: &[ProfileRow]) -> TrendReport {
    let temporal_data = temporal_analysis(rows);

    let counts: Vec<f64> = temporal_data
        .monthly
        .iter()
        .map(|m| m.count as f64)
        .collect();
    let temps: Vec<f64> = temporal_data
        .monthly
        .iter()
        .map(|m| m.avg_temperature)
        .collect();

    let (count_trend, temp_trend) = if counts.len() > 1 {
        (least_squares_slope(&counts), least_squares_slope(&temps))
    } else {
        (0.0, 0.0)
    };

    TrendReport {
        monthly_count_trend: round_to(count_trend, 2),
        monthly_temperature_trend: round_to(temp_trend, 2),
        temporal_data,
    }
}

/// Slope of the least-squares line through (0, y0), (1, y1), ...
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
