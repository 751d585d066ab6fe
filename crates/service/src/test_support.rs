#![cfg(test)]
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh shared-cache in-memory SQLite database with migrations applied.
/// Every test gets its own database name, keeping tests independent of
/// each other and of execution order.
pub async fn get_db() -> Result<DatabaseConnection> {
    let url = format!(
        "sqlite:file:service_{}?mode=memory&cache=shared",
        Uuid::new_v4().simple()
    );
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
