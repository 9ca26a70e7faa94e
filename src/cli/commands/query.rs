//! Query and nearest command implementations

use super::shared;
use crate::app::services::intent::IntentParser;
use crate::app::services::knowledge::KnowledgeStore;
use crate::app::services::storage;
use crate::cli::args::{NearestArgs, OutputFormat, QueryArgs};
use crate::constants::{DEFAULT_NEAREST_LIMIT, DEFAULT_NEAREST_RADIUS_KM};
use crate::Result;
use colored::Colorize;
use tracing::debug;

/// Query stored records with explicit filters or a free-text question
pub async fn run_query(args: QueryArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;

    let filter = match &args.ask {
        Some(question) => {
            let parser = IntentParser::new()?;
            let mut filter = parser.parse(question);
            if filter.is_empty() {
                // Nothing recognisable to filter on: answer from the
                // knowledge base instead of scanning the database
                let knowledge = KnowledgeStore::with_builtin_corpus();
                println!("{}", knowledge.answer(question, 3));
                return Ok(());
            }
            debug!(?filter, "Parsed question into filter");
            filter.skip = args.skip;
            filter.limit = args.limit;
            filter
        }
        None => args.to_filter(),
    };

    let store = shared::open_store(&args.common).await?;
    let rows = storage::query(&store, &filter).await?;
    shared::print_rows(&rows, args.format)
}

/// Find the records closest to a coordinate
pub async fn run_nearest(args: NearestArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let store = shared::open_store(&args.common).await?;

    let radius = args.radius.unwrap_or(DEFAULT_NEAREST_RADIUS_KM);
    let limit = args.limit.unwrap_or(DEFAULT_NEAREST_LIMIT);
    let results = storage::nearest(&store, args.latitude, args.longitude, radius, limit).await?;

    match args.format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!(
                    "{}",
                    format!("No records within {} km.", radius).yellow()
                );
                return Ok(());
            }
            for (row, distance) in &results {
                println!(
                    "{} {} at ({:.3}, {:.3})  {}",
                    format!("#{}", row.id).cyan(),
                    row.float_id.bold(),
                    row.latitude,
                    row.longitude,
                    format!("{:.1} km away", distance).green(),
                );
            }
        }
        format => {
            let rows: Vec<_> = results.into_iter().map(|(row, _)| row).collect();
            shared::print_rows(&rows, format)?;
        }
    }
    Ok(())
}
