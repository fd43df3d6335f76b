/// Database migration runner
///
/// The schema lives in the workspace-level `migrations/` directory as
/// reversible `{version}_{name}.up.sql` / `.down.sql` pairs and is embedded
/// into the binary at compile time.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPool;
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or the recorded checksum of
/// an applied migration no longer matches its file.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Starting database migrations"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Versions of the embedded migrations, in apply order
pub fn migration_versions() -> Vec<i64> {
    MIGRATOR
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| m.version)
        .collect()
}
