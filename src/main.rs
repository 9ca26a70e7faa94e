use argo_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(argo_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - output has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ARGO Processor - Ocean Float Profile Data Tool");
    println!("==============================================");
    println!();
    println!("Ingest ARGO float NetCDF profile files into a local SQLite database,");
    println!("then query, analyse and export the stored per-level records.");
    println!();
    println!("USAGE:");
    println!("    argo-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Ingest a directory of ARGO NetCDF files into the store");
    println!("    query       Query stored records with filters or a free-text question");
    println!("    nearest     Find records nearest to a coordinate");
    println!("    analyze     Run a statistical analysis over stored records");
    println!("    validate    Check that NetCDF files are readable without storing anything");
    println!("    create      Insert a single record by hand");
    println!("    update      Overwrite fields of an existing record");
    println!("    delete      Delete a record by id");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest every .nc file under a directory:");
    println!("    argo-processor ingest /path/to/argo/files --database argo.db");
    println!();
    println!("    # Query with explicit filters:");
    println!("    argo-processor query --depth-min 100 --depth-max 1000 --month 3");
    println!();
    println!("    # Ask a free-text question:");
    println!("    argo-processor query --ask \"salinity near the equator in march 2023\"");
    println!();
    println!("    # Summary statistics as JSON:");
    println!("    argo-processor analyze summary --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    argo-processor <COMMAND> --help");
}
