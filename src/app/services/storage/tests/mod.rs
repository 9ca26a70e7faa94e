//! Storage integration tests against in-memory SQLite

use crate::app::models::{FilterSpec, ProfileRow, ProfileUpdate};
use crate::app::services::storage::{nearest, query, ProfileStore};
use chrono::NaiveDate;

fn make_row(float_id: &str, depth: f64, temperature: f64) -> ProfileRow {
    ProfileRow {
        id: 0,
        float_id: float_id.to_string(),
        latitude: -2.5,
        longitude: 156.2,
        depth,
        pressure: Some(depth * 1.005),
        temperature,
        salinity: 34.8,
        month: 3,
        year: 2023,
        date: NaiveDate::from_ymd_opt(2023, 3, 15),
        cycle_number: 42,
        level_number: 0,
        metadata: None,
    }
}

#[tokio::test]
async fn test_insert_and_get_round_trip() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let mut row = make_row("5904471", 100.0, 22.1);
    row.metadata = Some(r#"{"project_name":"ARGO"}"#.to_string());

    let id = store.insert_row(&row).await.unwrap();
    assert!(id > 0);

    let fetched = store.get_row(id).await.unwrap().unwrap();
    assert_eq!(fetched.float_id, "5904471");
    assert_eq!(fetched.depth, 100.0);
    assert_eq!(fetched.date, NaiveDate::from_ymd_opt(2023, 3, 15));
    assert_eq!(
        fetched.metadata_map().get("project_name"),
        Some(&"ARGO".to_string())
    );
}

#[tokio::test]
async fn test_get_missing_row() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    assert_eq!(store.get_row(999).await.unwrap(), None);
}

#[tokio::test]
async fn test_insert_rejects_invalid_row() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let mut row = make_row("5904471", 100.0, 22.1);
    row.month = 13;
    assert!(store.insert_row(&row).await.is_err());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let id = store.insert_row(&make_row("5904471", 100.0, 22.1)).await.unwrap();

    let update = ProfileUpdate {
        temperature: Some(23.5),
        ..Default::default()
    };
    let updated = store.update_row(id, &update).await.unwrap().unwrap();
    assert_eq!(updated.temperature, 23.5);
    assert_eq!(updated.salinity, 34.8);
    assert_eq!(updated.float_id, "5904471");
}

#[tokio::test]
async fn test_empty_update_is_noop() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let id = store.insert_row(&make_row("5904471", 100.0, 22.1)).await.unwrap();

    let before = store.get_row(id).await.unwrap();
    let after = store.update_row(id, &ProfileUpdate::default()).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_missing_row() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let update = ProfileUpdate {
        temperature: Some(23.5),
        ..Default::default()
    };
    assert_eq!(store.update_row(42, &update).await.unwrap(), None);
}

#[tokio::test]
async fn test_update_cannot_violate_constraints() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let id = store.insert_row(&make_row("5904471", 100.0, 22.1)).await.unwrap();

    let update = ProfileUpdate {
        latitude: Some(120.0),
        ..Default::default()
    };
    assert!(store.update_row(id, &update).await.is_err());

    // Stored row unchanged
    let row = store.get_row(id).await.unwrap().unwrap();
    assert_eq!(row.latitude, -2.5);
}

#[tokio::test]
async fn test_delete_row() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let id = store.insert_row(&make_row("5904471", 100.0, 22.1)).await.unwrap();

    assert!(store.delete_row(id).await.unwrap());
    assert!(!store.delete_row(id).await.unwrap());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_batch_insert_is_atomic() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let good = make_row("5904471", 100.0, 22.1);
    let mut bad = make_row("5904471", 200.0, 18.0);
    bad.latitude = 95.0;

    // Validation catches the bad row and rolls back the first insert
    let rows = vec![good.clone(), bad];
    assert!(store.insert_rows(&rows).await.is_err());
    assert_eq!(store.count().await.unwrap(), 0);

    assert_eq!(store.insert_rows(&[good]).await.unwrap(), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_query_range_bounds_are_inclusive() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    for depth in [50.0, 100.0, 200.0, 400.0] {
        store.insert_row(&make_row("5904471", depth, 20.0)).await.unwrap();
    }

    let filter = FilterSpec {
        depth_min: Some(100.0),
        depth_max: Some(200.0),
        ..Default::default()
    };
    let rows = query(&store, &filter).await.unwrap();
    let depths: Vec<f64> = rows.iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![100.0, 200.0]);
}

#[tokio::test]
async fn test_query_month_year_and_temperature() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let mut jan = make_row("A", 10.0, 28.0);
    jan.month = 1;
    jan.year = 2024;
    let mut mar = make_row("B", 10.0, 5.0);
    mar.month = 3;
    mar.year = 2023;
    store.insert_rows(&[jan, mar]).await.unwrap();

    let filter = FilterSpec {
        month: Some(1),
        year: Some(2024),
        temp_min: Some(20.0),
        ..Default::default()
    };
    let rows = query(&store, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].float_id, "A");
}

#[tokio::test]
async fn test_query_pagination_is_stable() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    for i in 0..5 {
        store
            .insert_row(&make_row("5904471", 10.0 * (i + 1) as f64, 20.0))
            .await
            .unwrap();
    }

    let page = |skip, limit| FilterSpec {
        skip,
        limit: Some(limit),
        ..Default::default()
    };
    let first = query(&store, &page(0, 2)).await.unwrap();
    let second = query(&store, &page(2, 2)).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first[1].id < second[0].id);
}

#[tokio::test]
async fn test_empty_filter_returns_everything_up_to_default_limit() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    for _ in 0..3 {
        store.insert_row(&make_row("5904471", 10.0, 20.0)).await.unwrap();
    }
    let rows = query(&store, &FilterSpec::default()).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_nearest_orders_by_distance_and_respects_radius() {
    let store = ProfileStore::open_in_memory().await.unwrap();
    let mut near = make_row("NEAR", 10.0, 20.0);
    near.latitude = 0.1;
    near.longitude = 0.0;
    let mut mid = make_row("MID", 10.0, 20.0);
    mid.latitude = 0.5;
    mid.longitude = 0.0;
    let mut far = make_row("FAR", 10.0, 20.0);
    far.latitude = 5.0;
    far.longitude = 5.0;
    store.insert_rows(&[far, mid, near]).await.unwrap();

    let results = nearest(&store, 0.0, 0.0, 100.0, 10).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.float_id, "NEAR");
    assert_eq!(results[1].0.float_id, "MID");
    assert!((results[0].1 - 11.1).abs() < 1e-9);

    let capped = nearest(&store, 0.0, 0.0, 100.0, 1).await.unwrap();
    assert_eq!(capped.len(), 1);
}

#[tokio::test]
async fn test_nearest_scans_past_the_query_page_limit() {
    use crate::constants::MAX_QUERY_LIMIT;

    let store = ProfileStore::open_in_memory().await.unwrap();

    // One page-limit worth of rows ~50 km out, then the exact match last
    // so it gets the highest rowid. It must still win.
    let mut crowd = Vec::with_capacity(MAX_QUERY_LIMIT as usize);
    for _ in 0..MAX_QUERY_LIMIT {
        let mut row = make_row("CROWD", 10.0, 20.0);
        row.latitude = 0.45;
        row.longitude = 0.0;
        crowd.push(row);
    }
    store.insert_rows(&crowd).await.unwrap();

    let mut exact = make_row("EXACT", 10.0, 20.0);
    exact.latitude = 0.0;
    exact.longitude = 0.0;
    store.insert_row(&exact).await.unwrap();

    let results = nearest(&store, 0.0, 0.0, 100.0, 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0.float_id, "EXACT");
    assert!(results[0].1.abs() < 1e-9);
}
