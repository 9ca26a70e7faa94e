//! End-to-end ingestion tests

use crate::app::models::FilterSpec;
use crate::app::services::ingestion::IngestionPipeline;
use crate::app::services::netcdf_reader::tests::sample_argo_file;
use crate::app::services::storage::{query, ProfileStore};
use std::fs;
use tempfile::TempDir;

fn write_sample(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), sample_argo_file()).unwrap();
}

#[tokio::test]
async fn test_ingest_file_extracts_profiles() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "float.nc");

    let pipeline = IngestionPipeline::new();
    let profiles = pipeline.ingest_file(&dir.path().join("float.nc")).unwrap();
    assert_eq!(profiles.len(), 2);
}

#[tokio::test]
async fn test_persist_applies_rounding() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "float.nc");
    let store = ProfileStore::open_in_memory().await.unwrap();

    let pipeline = IngestionPipeline::new();
    let profiles = pipeline.ingest_file(&dir.path().join("float.nc")).unwrap();
    let saved = pipeline.persist_profiles(&profiles, &store).await.unwrap();
    // Two levels from profile 0, one from profile 1
    assert_eq!(saved, 3);

    let rows = query(&store, &FilterSpec::default()).await.unwrap();
    let surface = rows
        .iter()
        .find(|r| r.float_id == "5904471" && r.level_number == 0)
        .unwrap();

    // Depth rounds to whole metres, measurements to three decimals
    assert_eq!(surface.depth, surface.depth.round());
    assert_eq!(surface.temperature, 28.456);
    assert_eq!(surface.salinity, 34.211);
    assert_eq!(surface.pressure, Some(5.0));
    assert_eq!(surface.month, 3);
    assert_eq!(surface.year, 2023);
    assert_eq!(surface.cycle_number, 42);
}

#[tokio::test]
async fn test_configured_qc_flags_widen_extraction() {
    use crate::config::IngestionConfig;

    let dir = TempDir::new().unwrap();
    write_sample(&dir, "float.nc");

    // Accepting flag 4 keeps profile 0's third level, which the default
    // set drops for its salinity flag
    let pipeline = IngestionPipeline::new().with_config(IngestionConfig {
        accepted_qc_flags: vec![1, 2, 4, 5, 8],
        ..Default::default()
    });
    let profiles = pipeline.ingest_file(&dir.path().join("float.nc")).unwrap();
    assert_eq!(profiles[0].n_levels(), 3);

    let store = ProfileStore::open_in_memory().await.unwrap();
    let saved = pipeline.persist_profiles(&profiles, &store).await.unwrap();
    assert_eq!(saved, 4);
}

#[tokio::test]
async fn test_ingest_directory_collects_stats() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "a.nc");
    write_sample(&dir, "b.netcdf");
    fs::write(dir.path().join("notes.txt"), "not a netcdf file").unwrap();

    let store = ProfileStore::open_in_memory().await.unwrap();
    let stats = IngestionPipeline::new()
        .ingest_directory(dir.path(), &store)
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.profiles_extracted, 4);
    assert_eq!(stats.rows_saved, 6);
    assert_eq!(store.count().await.unwrap(), 6);
}

#[tokio::test]
async fn test_bad_file_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "good.nc");
    fs::write(dir.path().join("broken.nc"), b"HDF\x01garbage").unwrap();

    let store = ProfileStore::open_in_memory().await.unwrap();
    let stats = IngestionPipeline::new()
        .ingest_directory(dir.path(), &store)
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("broken.nc"));
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_missing_directory_is_an_error() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let result = IngestionPipeline::new()
        .ingest_directory(std::path::Path::new("/nonexistent"), &store)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_metadata_survives_persistence() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "float.nc");
    let store = ProfileStore::open_in_memory().await.unwrap();

    let pipeline = IngestionPipeline::new();
    let profiles = pipeline.ingest_file(&dir.path().join("float.nc")).unwrap();
    pipeline.persist_profiles(&profiles, &store).await.unwrap();

    let rows = query(&store, &FilterSpec::default()).await.unwrap();
    let map = rows[0].metadata_map();
    assert_eq!(map.get("profile_index").unwrap(), "0");
    assert!(map.contains_key("n_levels"));
}
