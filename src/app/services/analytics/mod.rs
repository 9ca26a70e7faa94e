//! Statistical analysis over persisted profile rows
//!
//! Every function here is a pure computation over a slice of rows; the
//! caller decides how many rows to scan (usually via the store's scan
//! cap). Results are plain serialisable structs so the CLI can print
//! them as tables or JSON without reshaping.
//!
//! - [`statistics`] - Summary statistics, depth distribution, correlation
//! - [`geographic`] - Grid-cell binning and spatial cluster detection
//! - [`temporal`] - Monthly/yearly aggregation and linear trends
//! - [`outliers`] - Z-score outlier detection

pub mod geographic;
pub mod outliers;
pub mod statistics;
pub mod temporal;

#[cfg(test)]
mod tests;

pub use geographic::{geographic_distribution, spatial_clusters, Cluster, ClusterReport, GridCell};
pub use outliers::{detect_outliers, Outlier, OutlierReport};
pub use statistics::{
    basic_statistics, depth_distribution, depth_profile_analysis,
    temperature_salinity_correlation, BasicStatistics, CorrelationResult, DepthBucket,
    DepthProfileAnalysis, ValueRange,
};
pub use temporal::{temporal_analysis, trend_analysis, MonthlyStats, TemporalAnalysis, TrendReport, YearlyStats};
