//! Reader for NetCDF classic format ARGO files
//!
//! ARGO data centres distribute profile files in the NetCDF classic binary
//! format (CDF-1 and CDF-2). This module parses the file header into typed
//! dimension, attribute and variable descriptions, then serves measurement
//! slices on demand without materialising whole variables.
//!
//! ## Architecture
//!
//! - [`header`] - Binary header parsing into typed structures
//! - [`dataset`] - Random access to variable data by name and profile index
//!
//! Only the classic format is supported; CDF-5 and HDF5-based NetCDF-4
//! files are rejected with a descriptive error.

pub mod dataset;
pub mod header;

#[cfg(test)]
pub mod tests;

pub use dataset::RawDataset;
pub use header::{AttrValue, Attribute, Dimension, Header, Variable};
