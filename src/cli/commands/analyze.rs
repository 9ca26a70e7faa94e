//! Analyze command implementation

use super::shared;
use crate::app::services::analytics;
use crate::cli::args::{AnalysisKind, AnalyzeArgs, OutputFormat};
use crate::constants::{
    AGGREGATION_SCAN_CAP, DEFAULT_CLUSTER_GRID_SIZE_DEG, DEFAULT_GRID_SIZE_DEG,
    DEFAULT_OUTLIER_THRESHOLD,
};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

/// Run one statistical analysis over the stored records
pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let store = shared::open_store(&args.common).await?;

    let rows = store.fetch_all(AGGREGATION_SCAN_CAP).await?;
    debug!(rows = rows.len(), kind = ?args.kind, "Running analysis");

    match args.kind {
        AnalysisKind::Summary => {
            let result = analytics::basic_statistics(&rows);
            print_human_or_json(&result, args.format, |r| {
                println!("{}", "Dataset summary".green().bold());
                println!("Records: {}", r.total_rows);
                println!("Average temperature: {:.2} °C", r.avg_temperature);
                println!("Average salinity: {:.3} PSU", r.avg_salinity);
                println!("Depth range: {:.1} - {:.1} m", r.depth_range.min, r.depth_range.max);
                println!(
                    "Latitude range: {:.3} - {:.3}",
                    r.latitude_range.min, r.latitude_range.max
                );
                println!(
                    "Longitude range: {:.3} - {:.3}",
                    r.longitude_range.min, r.longitude_range.max
                );
            })
        }
        AnalysisKind::DepthDistribution => {
            let result = analytics::depth_distribution(&rows);
            print_human_or_json(&result, args.format, |buckets| {
                println!("{}", "Records per depth".green().bold());
                for bucket in buckets {
                    println!("{:>9.1} m  {}", bucket.depth, bucket.count);
                }
            })
        }
        AnalysisKind::Correlation => {
            let result = analytics::temperature_salinity_correlation(&rows);
            print_human_or_json(&result, args.format, |r| {
                println!("{}", "Temperature/salinity correlation".green().bold());
                println!("Pearson r: {:.4}", r.correlation);
                println!("R squared: {:.4}", r.r_squared);
            })
        }
        AnalysisKind::Geographic => {
            let grid = args.grid_size.unwrap_or(DEFAULT_GRID_SIZE_DEG);
            validate_grid(grid)?;
            let result = analytics::geographic_distribution(&rows, grid);
            print_human_or_json(&result, args.format, |cells| {
                println!("{}", format!("Grid cells ({} deg)", grid).green().bold());
                for cell in cells {
                    println!(
                        "({:>7.1}, {:>8.1})  {:>6} records  temp {:>6.2}  sal {:>7.3}",
                        cell.latitude, cell.longitude, cell.count, cell.avg_temperature,
                        cell.avg_salinity
                    );
                }
            })
        }
        AnalysisKind::Temporal => {
            let result = analytics::temporal_analysis(&rows);
            print_human_or_json(&result, args.format, |r| {
                println!("{}", "Monthly".green().bold());
                for m in &r.monthly {
                    println!(
                        "month {:>2}  {:>6} records  temp {:>6.2}  sal {:>7.3}",
                        m.month, m.count, m.avg_temperature, m.avg_salinity
                    );
                }
                println!("{}", "Yearly".green().bold());
                for y in &r.yearly {
                    println!(
                        "{}  {:>6} records  temp {:>6.2}  sal {:>7.3}",
                        y.year, y.count, y.avg_temperature, y.avg_salinity
                    );
                }
            })
        }
        AnalysisKind::DepthProfile => {
            let window = match (args.depth_min, args.depth_max) {
                (Some(lo), Some(hi)) => Some((lo, hi)),
                (None, None) => None,
                _ => {
                    return Err(Error::configuration(
                        "depth-profile needs both --depth-min and --depth-max, or neither"
                            .to_string(),
                    ))
                }
            };
            let result = analytics::depth_profile_analysis(&rows, window);
            print_human_or_json(&result, args.format, |r| {
                println!("{}", "Mean profile by depth".green().bold());
                for i in 0..r.depths.len() {
                    println!(
                        "{:>9.1} m  temp {:>6.2} °C  sal {:>7.3} PSU",
                        r.depths[i], r.temperatures[i], r.salinities[i]
                    );
                }
            })
        }
        AnalysisKind::Outliers => {
            let threshold = args.threshold.unwrap_or(DEFAULT_OUTLIER_THRESHOLD);
            if threshold <= 0.0 {
                return Err(Error::configuration(
                    "Outlier threshold must be positive".to_string(),
                ));
            }
            let result = analytics::detect_outliers(&rows, threshold);
            print_human_or_json(&result, args.format, |r| {
                println!(
                    "{}",
                    format!(
                        "{} temperature, {} salinity outliers (|z| > {})",
                        r.temperature_outliers.len(),
                        r.salinity_outliers.len(),
                        threshold
                    )
                    .green()
                    .bold()
                );
                for o in r.temperature_outliers.iter().chain(&r.salinity_outliers) {
                    println!(
                        "#{:<8} value {:>8.3}  z {:>5.2}  at ({:.3}, {:.3}) depth {:.1} m",
                        o.id, o.value, o.z_score, o.latitude, o.longitude, o.depth
                    );
                }
            })
        }
        AnalysisKind::Clusters => {
            let grid = args.grid_size.unwrap_or(DEFAULT_CLUSTER_GRID_SIZE_DEG);
            validate_grid(grid)?;
            let result = analytics::spatial_clusters(&rows, grid);
            print_human_or_json(&result, args.format, |r| {
                println!(
                    "{}",
                    format!("{} cluster(s) at {} deg grid", r.total_clusters, r.grid_size)
                        .green()
                        .bold()
                );
                for c in &r.clusters {
                    println!(
                        "({:>7.1}, {:>8.1})  {:>6} records  temp {:>6.2}  sal {:>7.3}",
                        c.center_lat, c.center_lon, c.density, c.avg_temperature, c.avg_salinity
                    );
                }
            })
        }
        AnalysisKind::Trends => {
            let result = analytics::trend_analysis(&rows);
            print_human_or_json(&result, args.format, |r| {
                println!("{}", "Monthly trends".green().bold());
                println!("Record count trend: {:+.2} per month", r.monthly_count_trend);
                println!(
                    "Temperature trend: {:+.2} °C per month",
                    r.monthly_temperature_trend
                );
            })
        }
    }
}

fn validate_grid(grid: f64) -> Result<()> {
    if grid <= 0.0 || grid > 90.0 {
        return Err(Error::configuration(format!(
            "Grid size {} must be between 0 and 90 degrees",
            grid
        )));
    }
    Ok(())
}

/// Human format gets the provided printer; every other format gets JSON
fn print_human_or_json<T: Serialize>(
    value: &T,
    format: OutputFormat,
    human: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            human(value);
            Ok(())
        }
        _ => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| Error::export(format!("JSON serialisation failed: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}
