//! Named region vocabulary
//!
//! Each rule maps a keyword to coordinate bounds. Rules apply in table
//! order with later matches overwriting earlier ones, so a message naming
//! several regions resolves the same way every time.

use crate::app::models::FilterSpec;

/// A keyword-triggered coordinate constraint
pub struct RegionRule {
    pub keyword: &'static str,
    /// Inclusive latitude bounds this keyword implies
    pub lat: Option<(f64, f64)>,
    /// Inclusive longitude bounds this keyword implies
    pub lon: Option<(f64, f64)>,
}

/// Ocean basins and hemispheres, in application order
pub const OCEAN_REGIONS: [RegionRule; 7] = [
    RegionRule {
        keyword: "pacific",
        lat: None,
        lon: Some((-180.0, -60.0)),
    },
    RegionRule {
        keyword: "atlantic",
        lat: None,
        lon: Some((-60.0, 20.0)),
    },
    RegionRule {
        keyword: "indian",
        lat: None,
        lon: Some((20.0, 147.0)),
    },
    RegionRule {
        keyword: "southern",
        lat: Some((-90.0, -30.0)),
        lon: None,
    },
    RegionRule {
        keyword: "arctic",
        lat: Some((60.0, 90.0)),
        lon: None,
    },
    RegionRule {
        keyword: "north",
        lat: Some((30.0, 90.0)),
        lon: None,
    },
    RegionRule {
        keyword: "south",
        lat: Some((-90.0, -30.0)),
        lon: None,
    },
];

/// Apply ocean region keywords found in a lowercased message
pub fn apply_regions(message: &str, filter: &mut FilterSpec) {
    for rule in &OCEAN_REGIONS {
        if message.contains(rule.keyword) {
            if let Some((min, max)) = rule.lat {
                filter.lat_min = Some(min);
                filter.lat_max = Some(max);
            }
            if let Some((min, max)) = rule.lon {
                filter.lon_min = Some(min);
                filter.lon_max = Some(max);
            }
        }
    }
}

/// Apply named latitude bands; "equator" beats "tropical"
pub fn apply_latitude_bands(message: &str, filter: &mut FilterSpec) {
    if message.contains("equator") {
        filter.lat_min = Some(-10.0);
        filter.lat_max = Some(10.0);
    } else if message.contains("tropical") {
        filter.lat_min = Some(-23.5);
        filter.lat_max = Some(23.5);
    }
}
