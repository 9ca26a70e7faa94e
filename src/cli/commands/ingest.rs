//! Ingest command implementation

use super::shared;
use crate::app::services::ingestion::IngestionPipeline;
use crate::app::services::storage::ProfileStore;
use crate::cli::args::IngestArgs;
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Ingest a directory of ARGO NetCDF files into the store
pub async fn run_ingest(args: IngestArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let config = shared::build_config(&args.common)?;
    let store = ProfileStore::open(&config.database.path).await?;

    let mut pipeline = IngestionPipeline::new().with_config(config.ingestion);
    if !args.common.quiet {
        pipeline = pipeline.with_progress();
    }

    info!(input = %args.input.display(), "Starting ingestion");
    let stats = pipeline.ingest_directory(&args.input, &store).await?;

    if !args.common.quiet {
        println!("{}", "Ingestion complete".green().bold());
        println!("{}", stats.summary());
        if !stats.errors.is_empty() {
            println!("{}", "Errors:".red().bold());
            for error in &stats.errors {
                println!("  {}", error.red());
            }
        }
    }
    Ok(())
}
