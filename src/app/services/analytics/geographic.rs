//! Geographic binning and spatial cluster detection

use super::statistics::mean;
use crate::app::models::ProfileRow;
use crate::constants::{round_to, CLUSTER_DENSITY_THRESHOLD, MEASUREMENT_DECIMALS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One occupied grid cell with its aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Cell centre latitude
    pub latitude: f64,
    /// Cell centre longitude
    pub longitude: f64,
    pub count: usize,
    pub avg_temperature: f64,
    pub avg_salinity: f64,
}

/// A dense grid cell treated as a spatial cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub center_lat: f64,
    pub center_lon: f64,
    pub density: usize,
    pub avg_temperature: f64,
    pub avg_salinity: f64,
}

/// Cluster detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub clusters: Vec<Cluster>,
    pub total_clusters: usize,
    pub grid_size: f64,
}

/// Bin rows into square grid cells of `grid_size` degrees
///
/// Each coordinate snaps to the nearest multiple of the grid size; only
/// occupied cells are returned, ordered by latitude then longitude.
pub fn geographic_distribution(rows: &[ProfileRow], grid_size: f64) -> Vec<GridCell> {
    let mut bins: HashMap<(i64, i64), Vec<&ProfileRow>> = HashMap::new();
    for row in rows {
        let key = (
            (row.latitude / grid_size).round() as i64,
            (row.longitude / grid_size).round() as i64,
        );
        bins.entry(key).or_default().push(row);
    }

    let mut cells: Vec<GridCell> = bins
        .into_iter()
        .map(|((lat_key, lon_key), members)| GridCell {
            latitude: lat_key as f64 * grid_size,
            longitude: lon_key as f64 * grid_size,
            count: members.len(),
            avg_temperature: round_to(mean(members.iter().map(|r| r.temperature)), 2),
            avg_salinity: round_to(
                mean(members.iter().map(|r| r.salinity)),
                MEASUREMENT_DECIMALS,
            ),
        })
        .collect();

    cells.sort_by(|a, b| {
        a.latitude
            .total_cmp(&b.latitude)
            .then(a.longitude.total_cmp(&b.longitude))
    });
    cells
}

/// Report grid cells dense enough to count as clusters
pub fn spatial_clusters(rows: &[ProfileRow], grid_size: f64) -> ClusterReport {
    let clusters: Vec<Cluster> = geographic_distribution(rows, grid_size)
        .into_iter()
        .filter(|cell| cell.count > CLUSTER_DENSITY_THRESHOLD)
        .map(|cell| Cluster {
            center_lat: cell.latitude,
            center_lon: cell.longitude,
            density: cell.count,
            avg_temperature: cell.avg_temperature,
            avg_salinity: cell.avg_salinity,
        })
        .collect();

    ClusterReport {
        total_clusters: clusters.len(),
        clusters,
        grid_size,
    }
}
