//! Natural-language query intent parsing
//!
//! Turns free-text questions like "salinity near the equator in March
//! 2023" into a [`FilterSpec`](crate::app::models::FilterSpec). Parsing is
//! keyword and regex driven; rules apply in a fixed order so later, more
//! specific rules overwrite broader ones deterministically.
//!
//! - [`regions`] - Named ocean region and latitude band vocabulary
//! - [`parser`] - The rule pipeline over a lowercased message

pub mod parser;
pub mod regions;


pub use parser::IntentParser;
pub use regions::RegionRule;
