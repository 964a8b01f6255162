//! Offline bulk importer for the recipe combination table.
//!
//! Runs as an exclusive maintenance operation: the table is replaced
//! delete-then-insert and is left partially populated if the run dies.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use tracing::{error, info};

use ladle_algo::config::Settings;
use ladle_algo::services::{import, PostgresClient};

#[derive(Parser)]
#[command(
    name = "import-combinations",
    about = "Replace the recipe combination table from a CSV file"
)]
struct CliArgs {
    /// CSV file with columns: mealType, mainIngredient,
    /// supportingIngredients, tasteProfile, cookTime, appliance
    file: PathBuf,

    /// Rows per insert transaction (defaults to the import.batch_size setting)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Validate the file and report counts without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = CliArgs::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let file = match File::open(&args.file) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to open {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    if args.dry_run {
        match import::scan(file) {
            Ok(outcome) => {
                info!(
                    "Dry run over {}: {} valid rows, {} skipped",
                    args.file.display(),
                    outcome.valid,
                    outcome.skipped
                );
            }
            Err(e) => {
                error!("Dry run failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let store = match PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await
    {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    let batch_size = args.batch_size.unwrap_or(settings.import.batch_size);

    match import::import_combinations(&store, file, batch_size).await {
        Ok(report) => {
            info!(
                "Import {} complete: {} inserted, {} skipped",
                report.run_id, report.inserted, report.skipped
            );
        }
        Err(e) => {
            error!("Import aborted: {}", e);
            std::process::exit(1);
        }
    }
}
