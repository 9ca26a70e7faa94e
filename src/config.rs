//! Configuration management and validation.
//!
//! Provides the configuration the commands actually consume: where the
//! database lives and how the ingestion pipeline treats quality flags and
//! file extensions. Per-run tuning (query limits, grid sizes, outlier
//! thresholds) stays on the CLI flags and the defaults in `constants`.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend settings
    pub database: DatabaseConfig,

    /// Ingestion pipeline settings
    pub ingestion: IngestionConfig,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file; created on first use
    pub path: PathBuf,
}

/// Ingestion pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// QC flag values whose measurements are retained
    pub accepted_qc_flags: Vec<i32>,

    /// File extensions scanned during directory ingestion
    pub supported_extensions: Vec<String>,
}

impl IngestionConfig {
    /// Whether a file extension belongs to the configured set
    pub fn is_supported_extension(&self, extension: &str) -> bool {
        self.supported_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            accepted_qc_flags: constants::quality_flags::ACCEPTED.to_vec(),
            supported_extensions: constants::SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from("argo.db"),
            },
            ingestion: IngestionConfig::default(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults, overriding the database path
    pub fn with_database_path(path: PathBuf) -> Self {
        Self {
            database: DatabaseConfig { path },
            ..Self::default()
        }
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.ingestion.accepted_qc_flags.is_empty() {
            return Err(Error::configuration(
                "At least one accepted QC flag is required".to_string(),
            ));
        }

        for flag in &self.ingestion.accepted_qc_flags {
            if !constants::quality_flags::ALL_VALUES.contains(flag) {
                return Err(Error::configuration(format!(
                    "Unknown QC flag value {flag}: must be one of 1, 2, 3, 4, 5, 8, 9"
                )));
            }
        }

        if self.ingestion.supported_extensions.is_empty() {
            return Err(Error::configuration(
                "At least one supported file extension is required".to_string(),
            ));
        }

        Ok(())
    }
}
