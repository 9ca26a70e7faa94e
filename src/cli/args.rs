//! Command-line argument definitions for the ARGO processor
//!
//! The complete CLI interface using the clap derive API. Each subcommand
//! carries its own arguments plus the shared database/verbosity options.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ARGO profile processor
///
/// Ingests ARGO float NetCDF profile files into a local SQLite store and
/// serves filtered queries, statistics and free-text questions over it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "argo-processor",
    version,
    about = "Ingest and analyse ARGO ocean float profile data",
    long_about = "A tool that reads ARGO float NetCDF profile files, applies quality-control \
                  masking and unit conversion, and stores one record per depth level in a \
                  local SQLite database. Stored records can be queried with explicit filters \
                  or free-text questions, aggregated into statistics, and exported as CSV, \
                  JSON or plain tables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the ARGO processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ingest a directory of ARGO NetCDF files into the store
    Ingest(IngestArgs),
    /// Query stored records with filters or a free-text question
    Query(QueryArgs),
    /// Find records nearest to a coordinate
    Nearest(NearestArgs),
    /// Run a statistical analysis over stored records
    Analyze(AnalyzeArgs),
    /// Check that NetCDF files are readable without storing anything
    Validate(ValidateArgs),
    /// Insert a single record by hand
    Create(CreateArgs),
    /// Overwrite fields of an existing record
    Update(UpdateArgs),
    /// Delete a record by id
    Delete(DeleteArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Path to the SQLite database file
    ///
    /// Created on first use. If not specified, defaults to ./argo.db
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the SQLite database file"
    )]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Map the verbosity flags to a tracing level string
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Database path, falling back to the default location
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from("argo.db"))
    }
}

/// Output format for query and analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Fixed-width plain table
    Ascii,
}

/// Which analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisKind {
    /// Dataset-wide summary statistics
    Summary,
    /// Record counts per depth
    DepthDistribution,
    /// Temperature/salinity Pearson correlation
    Correlation,
    /// Grid-cell geographic distribution
    Geographic,
    /// Monthly and yearly aggregates
    Temporal,
    /// Mean temperature and salinity per depth
    DepthProfile,
    /// Z-score outlier detection
    Outliers,
    /// Dense spatial clusters
    Clusters,
    /// Linear trends over the monthly series
    Trends,
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Directory containing .nc / .netcdf files to ingest
    #[arg(value_name = "DIR", help = "Directory of ARGO NetCDF files")]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the query command
#[derive(Debug, Clone, Parser)]
pub struct QueryArgs {
    /// Free-text question to parse into filters
    ///
    /// Recognises ocean regions, latitude bands, depth/temperature/salinity
    /// ranges and dates, e.g. "salinity near the equator in march 2023".
    /// Questions that parse to no filter are answered from the built-in
    /// knowledge base instead of the database.
    #[arg(long = "ask", value_name = "TEXT", help = "Free-text question")]
    pub ask: Option<String>,

    #[arg(long, value_name = "M", help = "Minimum depth in metres")]
    pub depth_min: Option<f64>,
    #[arg(long, value_name = "M", help = "Maximum depth in metres")]
    pub depth_max: Option<f64>,
    #[arg(long, value_name = "C", help = "Minimum temperature in °C")]
    pub temp_min: Option<f64>,
    #[arg(long, value_name = "C", help = "Maximum temperature in °C")]
    pub temp_max: Option<f64>,
    #[arg(long, value_name = "PSU", help = "Minimum salinity in PSU")]
    pub salinity_min: Option<f64>,
    #[arg(long, value_name = "PSU", help = "Maximum salinity in PSU")]
    pub salinity_max: Option<f64>,
    #[arg(long, value_name = "DEG", help = "Minimum latitude")]
    pub lat_min: Option<f64>,
    #[arg(long, value_name = "DEG", help = "Maximum latitude")]
    pub lat_max: Option<f64>,
    #[arg(long, value_name = "DEG", help = "Minimum longitude")]
    pub lon_min: Option<f64>,
    #[arg(long, value_name = "DEG", help = "Maximum longitude")]
    pub lon_max: Option<f64>,
    #[arg(long, value_name = "1-12", help = "Observation month")]
    pub month: Option<i32>,
    #[arg(long, value_name = "YYYY", help = "Observation year")]
    pub year: Option<i32>,

    /// Records to skip before the first result
    #[arg(long, value_name = "N", default_value_t = 0, help = "Records to skip")]
    pub skip: i64,

    /// Maximum records to return
    #[arg(long, value_name = "N", help = "Maximum records to return")]
    pub limit: Option<i64>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl QueryArgs {
    /// Build a filter from the explicit flags (ignoring --ask)
    pub fn to_filter(&self) -> crate::app::models::FilterSpec {
        crate::app::models::FilterSpec {
            depth_min: self.depth_min,
            depth_max: self.depth_max,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            salinity_min: self.salinity_min,
            salinity_max: self.salinity_max,
            lat_min: self.lat_min,
            lat_max: self.lat_max,
            lon_min: self.lon_min,
            lon_max: self.lon_max,
            month: self.month,
            year: self.year,
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// Arguments for the nearest command
#[derive(Debug, Clone, Parser)]
pub struct NearestArgs {
    /// Target latitude in decimal degrees
    #[arg(value_name = "LAT", allow_hyphen_values = true)]
    pub latitude: f64,

    /// Target longitude in decimal degrees
    #[arg(value_name = "LON", allow_hyphen_values = true)]
    pub longitude: f64,

    /// Search radius in kilometres
    #[arg(long, value_name = "KM", help = "Search radius in kilometres")]
    pub radius: Option<f64>,

    /// Maximum records to return
    #[arg(long, value_name = "N", help = "Maximum records to return")]
    pub limit: Option<usize>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Which analysis to run
    #[arg(value_enum, value_name = "KIND")]
    pub kind: AnalysisKind,

    /// Grid cell size in degrees (geographic and clusters analyses)
    #[arg(long, value_name = "DEG", help = "Grid cell size in degrees")]
    pub grid_size: Option<f64>,

    /// Z-score threshold (outliers analysis)
    #[arg(long, value_name = "Z", help = "Z-score threshold for outliers")]
    pub threshold: Option<f64>,

    /// Restrict the depth-profile analysis to a depth window
    #[arg(long, value_name = "M", help = "Minimum depth for depth-profile")]
    pub depth_min: Option<f64>,
    #[arg(long, value_name = "M", help = "Maximum depth for depth-profile")]
    pub depth_max: Option<f64>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// File or directory to validate
    #[arg(value_name = "PATH", help = "NetCDF file or directory to validate")]
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the create command
#[derive(Debug, Clone, Parser)]
pub struct CreateArgs {
    #[arg(long, value_name = "ID", help = "Float identifier")]
    pub float_id: String,
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub latitude: f64,
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub longitude: f64,
    #[arg(long, value_name = "M")]
    pub depth: f64,
    #[arg(long, value_name = "DBAR")]
    pub pressure: Option<f64>,
    #[arg(long, value_name = "C", allow_hyphen_values = true)]
    pub temperature: f64,
    #[arg(long, value_name = "PSU")]
    pub salinity: f64,
    #[arg(long, value_name = "1-12")]
    pub month: i32,
    #[arg(long, value_name = "YYYY")]
    pub year: i32,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Observation date")]
    pub date: Option<chrono::NaiveDate>,
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub cycle_number: i32,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the update command
#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
    /// Record id to update
    #[arg(value_name = "ID")]
    pub id: i64,

    #[arg(long, value_name = "ID", help = "New float identifier")]
    pub float_id: Option<String>,
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub longitude: Option<f64>,
    #[arg(long, value_name = "M")]
    pub depth: Option<f64>,
    #[arg(long, value_name = "DBAR")]
    pub pressure: Option<f64>,
    #[arg(long, value_name = "C", allow_hyphen_values = true)]
    pub temperature: Option<f64>,
    #[arg(long, value_name = "PSU")]
    pub salinity: Option<f64>,
    #[arg(long, value_name = "1-12")]
    pub month: Option<i32>,
    #[arg(long, value_name = "YYYY")]
    pub year: Option<i32>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<chrono::NaiveDate>,
    #[arg(long, value_name = "N")]
    pub cycle_number: Option<i32>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl UpdateArgs {
    /// Build the partial update from the provided flags
    pub fn to_update(&self) -> crate::app::models::ProfileUpdate {
        crate::app::models::ProfileUpdate {
            float_id: self.float_id.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            depth: self.depth,
            pressure: self.pressure,
            temperature: self.temperature,
            salinity: self.salinity,
            month: self.month,
            year: self.year,
            date: self.date,
            cycle_number: self.cycle_number,
        }
    }
}

/// Arguments for the delete command
#[derive(Debug, Clone, Parser)]
pub struct DeleteArgs {
    /// Record id to delete
    #[arg(value_name = "ID")]
    pub id: i64,

    #[command(flatten)]
    pub common: CommonArgs,
}
