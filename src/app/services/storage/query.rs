//! Filtered row queries and nearest-point search

use super::store::ProfileStore;
use crate::app::models::{FilterSpec, ProfileRow};
use crate::constants::{
    AGGREGATION_SCAN_CAP, DEFAULT_QUERY_LIMIT, DEGREES_TO_KM, MAX_QUERY_LIMIT,
};
use crate::Result;
use sqlx::QueryBuilder;
use tracing::debug;

/// Run a filtered query over profile rows
///
/// Every present bound becomes an inclusive AND predicate. Results come
/// back in id order so pagination with `skip`/`limit` is stable; the page
/// size is clamped to the store maximum.
pub async fn query(store: &ProfileStore, filter: &FilterSpec) -> Result<Vec<ProfileRow>> {
    let mut builder = QueryBuilder::new("SELECT * FROM profiles WHERE 1=1");

    push_range(&mut builder, "depth", filter.depth_min, filter.depth_max);
    push_range(&mut builder, "temperature", filter.temp_min, filter.temp_max);
    push_range(
        &mut builder,
        "salinity",
        filter.salinity_min,
        filter.salinity_max,
    );
    push_range(&mut builder, "latitude", filter.lat_min, filter.lat_max);
    push_range(&mut builder, "longitude", filter.lon_min, filter.lon_max);

    if let Some(month) = filter.month {
        builder.push(" AND month = ").push_bind(month);
    }
    if let Some(year) = filter.year {
        builder.push(" AND year = ").push_bind(year);
    }

    let limit = filter
        .limit
        .unwrap_or(DEFAULT_QUERY_LIMIT)
        .clamp(1, MAX_QUERY_LIMIT);
    let skip = filter.skip.max(0);
    builder.push(" ORDER BY id LIMIT ").push_bind(limit);
    builder.push(" OFFSET ").push_bind(skip);

    let rows = builder
        .build_query_as::<ProfileRow>()
        .fetch_all(store.pool())
        .await?;
    debug!(rows = rows.len(), limit, skip, "Filtered query complete");
    Ok(rows)
}

/// Find the rows closest to a point, within a radius in kilometres
///
/// Candidates come from a bounding-box prefilter fetched up to the
/// aggregation scan cap, then exact planar distances are computed, sorted
/// ascending and cut to `limit`. The prefilter box fully contains the
/// search circle, so results match a full scan for any table that fits
/// under the cap.
pub async fn nearest(
    store: &ProfileStore,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    limit: usize,
) -> Result<Vec<(ProfileRow, f64)>> {
    let margin_deg = radius_km / DEGREES_TO_KM;

    // Deliberately not routed through `query`: its page-size clamp sits
    // well below the scan cap and would drop candidates.
    let mut builder = QueryBuilder::new("SELECT * FROM profiles WHERE 1=1");
    push_range(
        &mut builder,
        "latitude",
        Some((latitude - margin_deg).max(-90.0)),
        Some((latitude + margin_deg).min(90.0)),
    );
    push_range(
        &mut builder,
        "longitude",
        Some((longitude - margin_deg).max(-180.0)),
        Some((longitude + margin_deg).min(180.0)),
    );
    builder.push(" ORDER BY id LIMIT ").push_bind(AGGREGATION_SCAN_CAP);

    let mut candidates: Vec<(ProfileRow, f64)> = builder
        .build_query_as::<ProfileRow>()
        .fetch_all(store.pool())
        .await?
        .into_iter()
        .map(|row| {
            let distance = approx_distance_km(latitude, longitude, row.latitude, row.longitude);
            (row, distance)
        })
        .filter(|(_, distance)| *distance <= radius_km)
        .collect();

    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates.truncate(limit);
    Ok(candidates)
}

/// Planar approximate distance between two coordinates in kilometres
///
/// Treats one degree as a fixed 111 km in both axes. Adequate for the
/// ranking and radius cuts done here; not a geodesic distance.
pub fn approx_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat1 - lat2;
    let d_lon = lon1 - lon2;
    (d_lat * d_lat + d_lon * d_lon).sqrt() * DEGREES_TO_KM
}

fn push_range(
    builder: &mut QueryBuilder<'_, sqlx::Sqlite>,
    column: &str,
    min: Option<f64>,
    max: Option<f64>,
) {
    if let Some(v) = min {
        builder.push(format!(" AND {} >= ", column)).push_bind(v);
    }
    if let Some(v) = max {
        builder.push(format!(" AND {} <= ", column)).push_bind(v);
    }
}
