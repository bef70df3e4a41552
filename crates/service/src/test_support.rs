use configs::DatabaseConfig;
use models::db::connect_and_migrate;
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory SQLite database for the current test.
///
/// The pool is pinned to one connection: every SQLite `:memory:` connection
/// is a separate database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { max_connections: 1, min_connections: 1, ..DatabaseConfig::with_url("sqlite::memory:") };
    let db = connect_and_migrate(&cfg).await?;
    Ok(db)
}
