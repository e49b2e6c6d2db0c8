use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

use super::migrations::Migrator;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    if database_url.contains(":memory:") {
        // Every pooled connection would open its own empty in-memory database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(20).min_connections(5);
    }

    opt.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => "sqlite://developer_path.db?mode=rwc".to_string(),
    }
}

/// Connects and brings the schema up to date
pub async fn open_database(database_path: &str) -> Result<DatabaseConnection, DbErr> {
    let db = establish_connection(&get_database_url(Some(database_path))).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");
    Ok(db)
}
