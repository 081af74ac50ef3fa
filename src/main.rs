//! Kahoot Store
//!
//! Operator entry point: materializes the schema, loads example data, and
//! inspects the database behind the store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use kahoot_store::{config::Settings, database::DatabaseService, utils::logging};

#[derive(Parser, Debug)]
#[command(
    name = "kahoot-store",
    author,
    version,
    about = "Operator tooling for the kahoot store database"
)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); environment variables still apply on top
    #[arg(long, short = 'c', value_name = "FILE", env = "KAHOOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create every table that does not exist yet
    Setup,
    /// Create tables, then load the example data set
    Seed,
    /// Truncate every table and restart ids at 1
    Reset,
    /// Run the health check and print pool status
    Check,
    /// Print the user join views as JSON
    Report,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("Failed to load configuration")?,
    };
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_ref())?;
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", kahoot_store::info());

    let db = DatabaseService::connect(&settings.database)
        .await
        .context("Failed to connect to database")?;

    let outcome = run(&db, cli.command).await;
    db.close().await;
    outcome
}

async fn run(db: &DatabaseService, command: Commands) -> Result<()> {
    match command {
        Commands::Setup => {
            db.setup().await?;
            info!("Schema ready");
        }
        Commands::Seed => {
            db.setup().await?;
            let summary = db.seed().await.context("Failed to load example data")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Reset => {
            db.reset().await?;
            info!("All tables truncated");
        }
        Commands::Check => {
            db.health_check().await.context("Health check failed")?;
            println!("{}", serde_json::to_string_pretty(&db.pool_status())?);
        }
        Commands::Report => {
            let report = db.report().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
