//! Validate command implementation
//!
//! Reads NetCDF files and reports whether usable profiles can be
//! extracted, without writing anything to the database.

use super::shared;
use crate::app::services::netcdf_reader::RawDataset;
use crate::app::services::profile_extractor;
use crate::cli::args::ValidateArgs;
use crate::config::IngestionConfig;
use crate::{Error, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Check NetCDF files for readability and report per-file results
pub async fn run_validate(args: ValidateArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let config = shared::build_config(&args.common)?;

    let files = collect_files(&args.path, &config.ingestion)?;
    if files.is_empty() {
        println!("{}", "No NetCDF files found".yellow());
        return Ok(());
    }

    info!(files = files.len(), "Validating NetCDF files");

    let mut valid = 0usize;
    let mut invalid = 0usize;
    let mut total_profiles = 0usize;

    for file in &files {
        match validate_file(file, &config.ingestion) {
            Ok(profiles) => {
                valid += 1;
                total_profiles += profiles;
                println!(
                    "{} {} ({} profile(s))",
                    "✓".green(),
                    file.display(),
                    profiles
                );
            }
            Err(e) => {
                invalid += 1;
                println!("{} {}: {}", "✗".red(), file.display(), e);
            }
        }
    }

    println!();
    if invalid == 0 {
        println!(
            "{}",
            format!(
                "{} file(s) valid, {} extractable profile(s)",
                valid, total_profiles
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("{} file(s) valid, {} invalid", valid, invalid)
                .yellow()
                .bold()
        );
    }

    Ok(())
}

/// Open one file and count the profiles that survive extraction
fn validate_file(path: &Path, ingestion: &IngestionConfig) -> Result<usize> {
    let dataset = RawDataset::open(path)?;
    if !profile_extractor::validate_dataset(&dataset) {
        return Err(Error::invalid_file(
            path.display().to_string(),
            "Missing required ARGO variables".to_string(),
        ));
    }
    let profiles =
        profile_extractor::extract_all_profiles(&dataset, &ingestion.accepted_qc_flags);
    Ok(profiles.len())
}

/// Resolve the target path to a list of NetCDF files
fn collect_files(path: &Path, ingestion: &IngestionConfig) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).max_depth(1) {
        let entry = entry?;
        let supported = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ingestion.is_supported_extension(ext))
            .unwrap_or(false);
        if entry.file_type().is_file() && supported {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
