//! Profile extraction from loaded ARGO datasets
//!
//! Turns the raw per-variable arrays of a NetCDF file into validated
//! [`ArgoProfile`](crate::app::models::ArgoProfile) values: quality-control
//! masking, unit conversion, shared-mask compaction and metadata capture.
//!
//! - [`extractor`] - Per-profile extraction and whole-file iteration
//! - [`metadata`] - Scalar descriptive fields read into the metadata map

pub mod extractor;
pub mod metadata;


pub use extractor::{extract_all_profiles, extract_profile, validate_dataset};
