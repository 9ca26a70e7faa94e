//! Create, update and delete commands for single records

use super::shared;
use crate::app::models::ProfileRow;
use crate::cli::args::{CreateArgs, DeleteArgs, UpdateArgs};
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Insert one record built from command-line flags
pub async fn run_create(args: CreateArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let store = shared::open_store(&args.common).await?;

    let row = ProfileRow {
        id: 0,
        float_id: args.float_id.clone(),
        latitude: args.latitude,
        longitude: args.longitude,
        depth: args.depth,
        pressure: args.pressure,
        temperature: args.temperature,
        salinity: args.salinity,
        month: args.month,
        year: args.year,
        date: args.date,
        cycle_number: args.cycle_number,
        level_number: 0,
        metadata: None,
    };

    let id = store.insert_row(&row).await?;
    info!(id, float_id = %args.float_id, "Record created");

    match store.get_row(id).await? {
        Some(stored) => shared::print_row_detail(&stored, "Record created"),
        None => println!("{}", format!("Record {} created", id).green()),
    }
    Ok(())
}

/// Overwrite the provided fields of an existing record
pub async fn run_update(args: UpdateArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let store = shared::open_store(&args.common).await?;

    let update = args.to_update();
    if update.is_empty() {
        println!("{}", "No fields to update.".yellow());
        return Ok(());
    }

    match store.update_row(args.id, &update).await? {
        Some(updated) => {
            info!(id = args.id, "Record updated");
            shared::print_row_detail(&updated, "Record updated");
        }
        None => println!("{}", format!("No record with id {}", args.id).yellow()),
    }
    Ok(())
}

/// Delete one record by id
pub async fn run_delete(args: DeleteArgs) -> Result<()> {
    shared::setup_logging(&args.common)?;
    let store = shared::open_store(&args.common).await?;

    if store.delete_row(args.id).await? {
        info!(id = args.id, "Record deleted");
        println!("{}", format!("Record {} deleted", args.id).green());
    } else {
        println!("{}", format!("No record with id {}", args.id).yellow());
    }
    Ok(())
}
