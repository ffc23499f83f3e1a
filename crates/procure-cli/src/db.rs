//! `db` sub-commands: connectivity check, migrations and site seeding.

use std::path::{Path, PathBuf};

use clap::Subcommand;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert warehouses and suppliers from a sites YAML file
    Seed {
        /// Sites file to load (defaults to `PROCURE_SITES_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub(crate) async fn run_db_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    procure_db::ping(pool).await?;
    println!("database ok");
    Ok(())
}

pub(crate) async fn run_db_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = procure_db::run_migrations(pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Load `path`, validate it, and upsert every site in one transaction.
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if any
/// upsert fails. A failed upsert rolls back the whole seed.
pub(crate) async fn run_db_seed(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let sites = procure_core::load_sites(path)?;
    let summary = procure_db::seed_sites(pool, &sites).await?;
    tracing::info!(
        path = %path.display(),
        warehouses = summary.warehouses,
        suppliers = summary.suppliers,
        "seed complete"
    );
    println!(
        "seeded {} warehouse(s) and {} supplier(s) from {}",
        summary.warehouses,
        summary.suppliers,
        path.display()
    );
    Ok(())
}
