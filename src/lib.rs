//! ARGO Processor Library
//!
//! A Rust library for ingesting ARGO float NetCDF profile files into a
//! queryable relational store of per-level measurement records.
//!
//! This library provides tools for:
//! - Parsing ARGO NetCDF classic files (CDF-1/CDF-2) without a C toolchain
//! - Applying ARGO quality-control flag masks to measurement arrays
//! - Deriving depth from pressure (UNESCO 1983 gravity-corrected approximation)
//! - Exploding each vertical profile into one stored row per depth level
//! - Filtered queries, descriptive statistics and outlier detection over rows
//! - Translating free-text questions into filter specifications
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod analytics;
        pub mod export;
        pub mod ingestion;
        pub mod intent;
        pub mod knowledge;
        pub mod netcdf_reader;
        pub mod profile_extractor;
        pub mod quality_control;
        pub mod storage;
        pub mod units;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ArgoProfile, FilterSpec, ProfileRow, QcFlag};
pub use config::Config;

/// Result type alias for the ARGO processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for ARGO processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// NetCDF file is malformed or missing required variables
    #[error("Invalid NetCDF file '{file}': {message}")]
    InvalidFile { file: String, message: String },

    /// ARGO Julian date is non-numeric or outside the representable range
    #[error("Invalid ARGO Julian date: {value}")]
    InvalidJulianDate { value: f64 },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Storage write or read failed
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Export serialization error
    #[error("Export error: {message}")]
    Export { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid file error
    pub fn invalid_file(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFile {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an invalid Julian date error
    pub fn invalid_julian_date(value: f64) -> Self {
        Self::InvalidJulianDate { value }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a persistence error without an underlying driver error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::Persistence {
            message: "Storage operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
