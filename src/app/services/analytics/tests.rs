//! Analytics computation tests

use super::*;
use crate::app::models::ProfileRow;

fn row(depth: f64, temperature: f64, salinity: f64) -> ProfileRow {
    ProfileRow {
        id: 0,
        float_id: "5904471".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        depth,
        pressure: None,
        temperature,
        salinity,
        month: 1,
        year: 2023,
        date: None,
        cycle_number: 0,
        level_number: 0,
        metadata: None,
    }
}

fn row_at(latitude: f64, longitude: f64) -> ProfileRow {
    let mut r = row(10.0, 20.0, 35.0);
    r.latitude = latitude;
    r.longitude = longitude;
    r
}

mod basic_statistics_tests {
    use super::*;

    #[test]
    fn test_empty_dataset_is_all_zero() {
        let stats = basic_statistics(&[]);
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.avg_temperature, 0.0);
        assert_eq!(stats.depth_range.min, 0.0);
        assert_eq!(stats.depth_range.max, 0.0);
    }

    #[test]
    fn test_averages_and_ranges() {
        let rows = vec![
            row(10.0, 20.123, 35.1234),
            row(100.0, 10.456, 34.5678),
        ];
        let stats = basic_statistics(&rows);
        assert_eq!(stats.total_rows, 2);
        // Temperature to two decimals, salinity to three
        assert_eq!(stats.avg_temperature, 15.29);
        assert_eq!(stats.avg_salinity, 34.846);
        assert_eq!(stats.depth_range.min, 10.0);
        assert_eq!(stats.depth_range.max, 100.0);
    }
}

mod depth_tests {
    use super::*;

    #[test]
    fn test_depth_distribution_groups_and_orders() {
        let rows = vec![
            row(100.0, 20.0, 35.0),
            row(10.0, 25.0, 34.0),
            row(100.0, 19.0, 35.1),
        ];
        let buckets = depth_distribution(&rows);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].depth, 10.0);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].depth, 100.0);
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_depth_profile_means() {
        let rows = vec![
            row(10.0, 20.0, 35.0),
            row(10.0, 22.0, 35.2),
            row(100.0, 5.0, 34.5),
        ];
        let analysis = depth_profile_analysis(&rows, None);
        assert_eq!(analysis.depths, vec![10.0, 100.0]);
        assert_eq!(analysis.temperatures, vec![21.0, 5.0]);
        assert_eq!(analysis.salinities, vec![35.1, 34.5]);
    }

    #[test]
    fn test_depth_profile_window() {
        let rows = vec![
            row(10.0, 20.0, 35.0),
            row(100.0, 15.0, 35.0),
            row(1000.0, 4.0, 34.7),
        ];
        let analysis = depth_profile_analysis(&rows, Some((50.0, 500.0)));
        assert_eq!(analysis.depths, vec![100.0]);
    }
}

mod correlation_tests {
    use super::*;

    #[test]
    fn test_perfect_positive_correlation() {
        let rows = vec![
            row(10.0, 10.0, 34.0),
            row(10.0, 20.0, 35.0),
            row(10.0, 30.0, 36.0),
        ];
        let result = temperature_salinity_correlation(&rows);
        assert_eq!(result.correlation, 1.0);
        assert_eq!(result.r_squared, 1.0);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let rows = vec![
            row(10.0, 30.0, 34.0),
            row(10.0, 20.0, 35.0),
            row(10.0, 10.0, 36.0),
        ];
        let result = temperature_salinity_correlation(&rows);
        assert_eq!(result.correlation, -1.0);
        assert_eq!(result.r_squared, 1.0);
    }

    #[test]
    fn test_too_few_rows() {
        let result = temperature_salinity_correlation(&[row(10.0, 20.0, 35.0)]);
        assert_eq!(result.correlation, 0.0);
        assert_eq!(result.r_squared, 0.0);
    }

    #[test]
    fn test_constant_series() {
        let rows = vec![row(10.0, 20.0, 35.0), row(20.0, 20.0, 36.0)];
        let result = temperature_salinity_correlation(&rows);
        assert_eq!(result.correlation, 0.0);
    }
}

mod geographic_tests {
    use super::*;

    #[test]
    fn test_binning_snaps_to_grid_centres() {
        let rows = vec![row_at(2.4, 2.4), row_at(2.6, 2.6), row_at(-12.0, 7.0)];
        let cells = geographic_distribution(&rows, 5.0);
        assert_eq!(cells.len(), 3);
        // Sorted by latitude then longitude
        assert_eq!((cells[0].latitude, cells[0].longitude), (-10.0, 5.0));
        assert_eq!((cells[1].latitude, cells[1].longitude), (0.0, 0.0));
        assert_eq!((cells[2].latitude, cells[2].longitude), (5.0, 5.0));
    }

    #[test]
    fn test_cell_aggregates() {
        let mut a = row(10.0, 20.0, 35.0);
        a.latitude = 1.0;
        let mut b = row(10.0, 22.0, 35.2);
        b.latitude = -1.0;
        let cells = geographic_distribution(&[a, b], 5.0);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[0].avg_temperature, 21.0);
        assert_eq!(cells[0].avg_salinity, 35.1);
    }

    #[test]
    fn test_clusters_need_more_than_five_rows() {
        let mut rows: Vec<ProfileRow> = (0..6).map(|_| row_at(1.0, 1.0)).collect();
        rows.extend((0..5).map(|_| row_at(50.0, 50.0)));

        let report = spatial_clusters(&rows, 10.0);
        assert_eq!(report.total_clusters, 1);
        assert_eq!(report.clusters[0].center_lat, 0.0);
        assert_eq!(report.clusters[0].density, 6);
        assert_eq!(report.grid_size, 10.0);
    }
}

mod temporal_tests {
    use super::*;

    fn dated_row(month: i32, year: i32, temperature: f64) -> ProfileRow {
        let mut r = row(10.0, temperature, 35.0);
        r.month = month;
        r.year = year;
        r
    }

    #[test]
    fn test_monthly_and_yearly_grouping() {
        let rows = vec![
            dated_row(3, 2023, 20.0),
            dated_row(3, 2024, 22.0),
            dated_row(1, 2024, 18.0),
        ];
        let analysis = temporal_analysis(&rows);

        assert_eq!(analysis.monthly.len(), 2);
        assert_eq!(analysis.monthly[0].month, 1);
        assert_eq!(analysis.monthly[1].month, 3);
        assert_eq!(analysis.monthly[1].count, 2);
        assert_eq!(analysis.monthly[1].avg_temperature, 21.0);

        assert_eq!(analysis.yearly.len(), 2);
        assert_eq!(analysis.yearly[0].year, 2023);
        assert_eq!(analysis.yearly[1].count, 2);
    }

    #[test]
    fn test_trend_slopes() {
        // Months 1..4 with counts 1,2,3,4: slope exactly 1 per month
        let mut rows = Vec::new();
        for month in 1..=4 {
            for _ in 0..month {
                rows.push(dated_row(month, 2023, 20.0));
            }
        }
        let report = trend_analysis(&rows);
        assert_eq!(report.monthly_count_trend, 1.0);
        assert_eq!(report.monthly_temperature_trend, 0.0);
    }

    #[test]
    fn test_trend_needs_two_months() {
        let report = trend_analysis(&[dated_row(1, 2023, 20.0)]);
        assert_eq!(report.monthly_count_trend, 0.0);
        assert_eq!(report.monthly_temperature_trend, 0.0);
    }
}

mod outlier_tests {
    use super::*;

    #[test]
    fn test_small_dataset_reports_nothing() {
        let rows: Vec<ProfileRow> = (0..9).map(|_| row(10.0, 20.0, 35.0)).collect();
        let report = detect_outliers(&rows, 2.0);
        assert!(report.temperature_outliers.is_empty());
        assert!(report.salinity_outliers.is_empty());
    }

    #[test]
    fn test_flags_extreme_temperature() {
        let mut rows: Vec<ProfileRow> = (0..11)
            .map(|i| row(10.0, 20.0 + (i % 2) as f64, 35.0))
            .collect();
        rows[5].id = 5;
        rows[5].temperature = 80.0;

        let report = detect_outliers(&rows, 2.0);
        assert_eq!(report.temperature_outliers.len(), 1);
        let outlier = &report.temperature_outliers[0];
        assert_eq!(outlier.id, 5);
        assert_eq!(outlier.value, 80.0);
        assert!(outlier.z_score > 2.0);
        // Constant salinity series cannot produce outliers
        assert!(report.salinity_outliers.is_empty());
    }
}
