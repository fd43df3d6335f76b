/// Database layer for Plando
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations from the workspace `migrations/`
///
/// # Example
///
/// ```no_run
/// use plando_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     plando_shared::db::migrations::run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
