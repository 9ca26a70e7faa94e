//! Row export to CSV, JSON and fixed-width ASCII
//!
//! The CLI hands query results here when a machine-readable or
//! plain-terminal format is requested.

use crate::app::models::ProfileRow;
use crate::{Error, Result};

/// Serialise rows as CSV with a header line
pub fn to_csv(rows: &[ProfileRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| Error::export(format!("CSV serialisation failed: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::export(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::export(format!("CSV is not UTF-8: {}", e)))
}

/// Serialise rows as pretty-printed JSON
pub fn to_json(rows: &[ProfileRow]) -> Result<String> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| Error::export(format!("JSON serialisation failed: {}", e)))
}

/// Render rows as a fixed-width ASCII table
pub fn to_ascii(rows: &[ProfileRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8} {:>10} {:>9} {:>10} {:>8} {:>9} {:>9} {:>6} {:>5}\n",
        "id", "float_id", "lat", "lon", "depth", "temp", "sal", "cycle", "level"
    ));
    out.push_str(&"-".repeat(82));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:>8} {:>10} {:>9.3} {:>10.3} {:>8.1} {:>9.3} {:>9.3} {:>6} {:>5}\n",
            row.id,
            row.float_id,
            row.latitude,
            row.longitude,
            row.depth,
            row.temperature,
            row.salinity,
            row.cycle_number,
            row.level_number
        ));
    }
    out
}
