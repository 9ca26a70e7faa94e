//! Shared components for CLI commands
//!
//! Logging setup, store opening and row printing used across the
//! subcommand implementations.

use crate::app::models::ProfileRow;
use crate::app::services::export;
use crate::app::services::storage::ProfileStore;
use crate::cli::args::{CommonArgs, OutputFormat};
use crate::{Config, Result};
use colored::Colorize;

/// Set up structured logging according to the shared verbosity flags
pub fn setup_logging(common: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("argo_processor={}", common.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .ok();

    Ok(())
}

/// Build and validate the configuration from the shared flags
pub fn build_config(common: &CommonArgs) -> Result<Config> {
    let config = Config::with_database_path(common.database_path());
    config.validate()?;
    Ok(config)
}

/// Build the configuration, then open the profile store
pub async fn open_store(common: &CommonArgs) -> Result<ProfileStore> {
    let config = build_config(common)?;
    ProfileStore::open(&config.database.path).await
}

/// Print rows in the requested format
pub fn print_rows(rows: &[ProfileRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", export::to_json(rows)?),
        OutputFormat::Csv => print!("{}", export::to_csv(rows)?),
        OutputFormat::Ascii => print!("{}", export::to_ascii(rows)),
        OutputFormat::Human => print_rows_human(rows),
    }
    Ok(())
}

fn print_rows_human(rows: &[ProfileRow]) {
    if rows.is_empty() {
        println!("{}", "No records matched.".yellow());
        return;
    }

    for row in rows {
        let date = row
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| format!("{}-{:02}", row.year, row.month));
        println!(
            "{} {} {} depth {:>7.1} m  temp {:>7.3} °C  sal {:>7.3} PSU  ({:.3}, {:.3})  {}",
            format!("#{}", row.id).cyan(),
            row.float_id.bold(),
            format!("cycle {}", row.cycle_number).dimmed(),
            row.depth,
            row.temperature,
            row.salinity,
            row.latitude,
            row.longitude,
            date.dimmed(),
        );
    }
    println!("{}", format!("{} record(s)", rows.len()).green());
}

/// Print one row with a heading, for the create/update/delete commands
pub fn print_row_detail(row: &ProfileRow, heading: &str) {
    println!("{}", heading.green().bold());
    print_rows_human(std::slice::from_ref(row));
}
