use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;


/// Fresh shared-cache in-memory SQLite database with migrations applied.
/// Each caller gets its own database, so tests stay order-independent.
pub(crate) async fn test_db() -> Result<DatabaseConnection> {
    let url = format!(
        "sqlite:file:models_{}?mode=memory&cache=shared",
        Uuid::new_v4().simple()
    );
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
