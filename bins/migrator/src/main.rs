//! Database migration runner for Numo.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database URL comes from the same configuration as the server
//! (`config/` files and `NUMO__DATABASE__URL`).

use anyhow::{Context, bail};
use numo_db::migration::{Migrator, MigratorTrait};
use numo_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "numo=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = numo_db::connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        "fresh" => Migrator::fresh(&db).await?,
        other => bail!("unknown command `{other}`; expected up, down, status or fresh"),
    }

    info!(command = %command, "Migration command finished");

    Ok(())
}
