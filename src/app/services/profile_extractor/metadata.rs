//! Descriptive metadata capture
//!
//! ARGO files carry per-profile descriptive strings alongside the
//! measurements. Whatever is present is kept as free-form key/value pairs
//! so the storage layer can persist it without a fixed schema.

use crate::app::services::netcdf_reader::RawDataset;
use crate::constants::variables;
use std::collections::HashMap;

/// Descriptive string variables copied into the metadata map when present
const METADATA_VARIABLES: [(&str, &str); 5] = [
    (variables::PROJECT_NAME, "project_name"),
    (variables::PI_NAME, "pi_name"),
    (variables::DATA_CENTRE, "data_centre"),
    (variables::WMO_INST_TYPE, "wmo_inst_type"),
    (variables::FLOAT_SERIAL_NO, "float_serial_no"),
];

/// Collect descriptive metadata for one profile
pub fn extract_metadata(
    dataset: &RawDataset,
    index: usize,
    n_levels: usize,
) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    for (var_name, key) in METADATA_VARIABLES {
        if !dataset.has_variable(var_name) {
            continue;
        }
        if let Ok(value) = dataset.string_at(var_name, index) {
            if !value.is_empty() {
                metadata.insert(key.to_string(), value);
            }
        }
    }

    metadata.insert("profile_index".to_string(), index.to_string());
    metadata.insert("n_levels".to_string(), n_levels.to_string());
    metadata.insert("source".to_string(), dataset.origin().to_string());

    metadata
}
