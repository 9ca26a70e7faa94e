//! SQLite persistence for profile rows
//!
//! One table, `profiles`, holds one row per depth level. The store owns a
//! connection pool; queries go through a filter-driven builder so callers
//! never assemble SQL by hand.
//!
//! - [`store`] - Pool lifecycle, schema and row CRUD
//! - [`query`] - Filtered queries and nearest-point search

pub mod query;
pub mod store;

#[cfg(test)]
mod tests;

pub use query::{approx_distance_km, nearest, query};
pub use store::ProfileStore;
