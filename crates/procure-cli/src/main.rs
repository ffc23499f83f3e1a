mod db;
mod nearest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "procure-cli")]
#[command(about = "Procurement site lookup command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Find the enabled supplier closest to a warehouse
    Nearest {
        /// Warehouse name, as stored in the warehouses table
        warehouse: String,
        /// Print the result as JSON instead of a table row
        #[arg(long)]
        json: bool,
    },
    /// Show recently recorded location errors
    Errors {
        /// Maximum number of entries to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("procure-cli ready; run with --help for commands");
        return Ok(());
    };

    let config = procure_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = procure_db::connect_pool(&config.database).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_db_ping(&pool).await?,
            DbCommands::Migrate => db::run_db_migrate(&pool).await?,
            DbCommands::Seed { path } => {
                let path: PathBuf = path.unwrap_or_else(|| config.sites_path.clone());
                db::run_db_seed(&pool, &path).await?;
            }
        },
        Commands::Nearest { warehouse, json } => {
            nearest::run_nearest(&pool, &warehouse, json).await?;
        }
        Commands::Errors { limit } => nearest::run_errors(&pool, limit).await?,
    }

    pool.close().await;
    Ok(())
}
