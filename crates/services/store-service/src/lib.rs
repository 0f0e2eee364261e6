//! Store Service Library
//!
//! Data layer of the storefront: users and their credentials, categories
//! and products. Callers reach it through [`service::Services`]; the binary
//! only wraps migrations, seeding and a connectivity check.

pub mod config;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use tracing::info;

use crate::config::StoreServiceConfig;
use crate::infra::Database;
use crate::service::{ServiceContainer, Services};

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let state = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, state);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-applying migrations");
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect, migrate and insert the sample catalog.
pub async fn run_seed() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreServiceConfig::from_env();
    let db = Database::connect(&config.database).await?;
    let services = Services::from_connection(db.get_connection());

    let summary = seed::seed_catalog(services.catalog().as_ref()).await?;
    println!(
        "Seeded {} categories and {} products ({} categories already present)",
        summary.categories_created, summary.products_created, summary.categories_skipped
    );

    Ok(())
}

/// Verify the configured database answers queries.
pub async fn check_database() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreServiceConfig::from_env();
    info!(database = ?config.database, "Checking database connectivity");

    let db = Database::connect_without_migrations(&config.database).await?;
    db.ping().await?;
    println!("Database connection OK");

    Ok(())
}
