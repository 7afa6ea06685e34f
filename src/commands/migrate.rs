//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::{Config, ConfigError};
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    if config.database.dsn.is_empty() {
        return Err(ConfigError::invalid("database.dsn", "required for migrations").into());
    }

    let db = Database::connect(&config.database).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("running pending migrations");
            db.run_migrations().await?;
            tracing::info!("migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("rolling back last migration");
            db.rollback_migration().await?;
            tracing::info!("rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("dropping all tables and re-running every migration");
            db.fresh_migrations().await?;
            tracing::info!("fresh migrations completed successfully");
        }
    }

    Ok(())
}
