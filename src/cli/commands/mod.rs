//! Command implementations for the ARGO processor CLI
//!
//! Each subcommand lives in its own module; `run` dispatches to the right
//! handler after clap has parsed the arguments.

pub mod analyze;
pub mod ingest;
pub mod profile;
pub mod query;
pub mod shared;
pub mod validate;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler. Callers ensure a subcommand is
/// present before entering the runtime.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Err(Error::configuration("No command provided".to_string()));
    };

    match command {
        Commands::Ingest(args) => ingest::run_ingest(args).await,
        Commands::Query(args) => query::run_query(args).await,
        Commands::Nearest(args) => query::run_nearest(args).await,
        Commands::Analyze(args) => analyze::run_analyze(args).await,
        Commands::Validate(args) => validate::run_validate(args).await,
        Commands::Create(args) => profile::run_create(args).await,
        Commands::Update(args) => profile::run_update(args).await,
        Commands::Delete(args) => profile::run_delete(args).await,
    }
}
