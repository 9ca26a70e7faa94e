//! Ingestion orchestration

use super::stats::IngestionStats;
use crate::app::models::{ArgoProfile, ProfileRow};
use crate::app::services::netcdf_reader::RawDataset;
use crate::app::services::profile_extractor;
use crate::app::services::storage::ProfileStore;
use crate::config::IngestionConfig;
use crate::constants::{round_to, MEASUREMENT_DECIMALS, PRESSURE_DECIMALS};
use crate::{Error, Result};
use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Reads ARGO files and persists their rows
pub struct IngestionPipeline {
    config: IngestionConfig,
    show_progress: bool,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self {
            config: IngestionConfig::default(),
            show_progress: false,
        }
    }

    /// Use the given ingestion settings instead of the defaults
    pub fn with_config(mut self, config: IngestionConfig) -> Self {
        self.config = config;
        self
    }

    /// Display a progress bar during directory runs
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Read one file and extract its usable profiles
    ///
    /// A structurally valid file that lacks the required variables yields
    /// an empty vector; unreadable files are errors.
    pub fn ingest_file(&self, path: &Path) -> Result<Vec<ArgoProfile>> {
        let dataset = RawDataset::open(path)?;
        if !profile_extractor::validate_dataset(&dataset) {
            warn!(path = %path.display(), "Skipping file without required variables");
            return Ok(Vec::new());
        }
        Ok(profile_extractor::extract_all_profiles(
            &dataset,
            &self.config.accepted_qc_flags,
        ))
    }

    /// Explode profiles into per-level rows and save them in one batch
    pub async fn persist_profiles(
        &self,
        profiles: &[ArgoProfile],
        store: &ProfileStore,
    ) -> Result<usize> {
        let mut rows = Vec::new();
        for profile in profiles {
            rows.extend(explode_profile(profile)?);
        }
        store.insert_rows(&rows).await
    }

    /// Ingest every supported file directly inside a directory
    pub async fn ingest_directory(&self, dir: &Path, store: &ProfileStore) -> Result<IngestionStats> {
        if !dir.is_dir() {
            return Err(Error::configuration(format!(
                "Ingestion path is not a directory: {}",
                dir.display()
            )));
        }

        let mut files: Vec<_> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| self.config.is_supported_extension(ext))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        info!(dir = %dir.display(), files = files.len(), "Starting ingestion run");
        let progress = self.create_progress_bar(files.len() as u64);

        let mut stats = IngestionStats::new();
        for path in files {
            match self.ingest_and_persist(&path, store).await {
                Ok((profiles, rows)) => {
                    stats.files_processed += 1;
                    stats.profiles_extracted += profiles;
                    stats.rows_saved += rows;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to ingest file");
                    stats.files_failed += 1;
                    stats.errors.push(format!("{}: {}", path.display(), e));
                }
            }
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }
        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        info!(
            files = stats.files_processed,
            failed = stats.files_failed,
            rows = stats.rows_saved,
            "Ingestion run complete"
        );
        Ok(stats)
    }

    async fn ingest_and_persist(
        &self,
        path: &Path,
        store: &ProfileStore,
    ) -> Result<(usize, usize)> {
        let profiles = self.ingest_file(path)?;
        let rows = self.persist_profiles(&profiles, store).await?;
        Ok((profiles.len(), rows))
    }

    fn create_progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if !self.show_progress || total == 0 {
            return None;
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    }
}

impl Default for IngestionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn one profile into per-level rows with presentation rounding applied
fn explode_profile(profile: &ArgoProfile) -> Result<Vec<ProfileRow>> {
    profile.validate()?;
    let metadata = serde_json::to_string(&profile.metadata)
        .map_err(|e| Error::data_validation(format!("Unserializable metadata: {}", e)))?;

    let date = profile.date.date_naive();
    let rows = (0..profile.n_levels())
        .map(|level| ProfileRow {
            id: 0,
            float_id: profile.float_id.clone(),
            latitude: profile.latitude,
            longitude: profile.longitude,
            depth: round_to(profile.depth[level], 0),
            pressure: Some(round_to(profile.pressure[level], PRESSURE_DECIMALS)),
            temperature: round_to(profile.temperature[level], MEASUREMENT_DECIMALS),
            salinity: round_to(profile.salinity[level], MEASUREMENT_DECIMALS),
            month: date.month() as i32,
            year: date.year(),
            date: Some(date),
            cycle_number: profile.cycle_number,
            level_number: level as i32,
            metadata: Some(metadata.clone()),
        })
        .collect();
    Ok(rows)
}
