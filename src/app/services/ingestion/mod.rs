//! End-to-end file ingestion
//!
//! Walks a directory of ARGO NetCDF files, extracts profiles, explodes
//! them into per-level rows and persists each file's rows in a single
//! transaction. One bad file never stops the run; its error is recorded
//! and the walk continues.
//!
//! - [`pipeline`] - File and directory ingestion orchestration
//! - [`stats`] - Run statistics and summary formatting

pub mod pipeline;
pub mod stats;

#[cfg(test)]
mod tests;

pub use pipeline::IngestionPipeline;
pub use stats::IngestionStats;
