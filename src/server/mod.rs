pub mod app;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use sea_orm_migration::prelude::*;
use tracing::info;

use crate::application::identity::ConfiguredIdentityService;
use crate::application::Mediator;
use crate::config::AppConfig;
use crate::database::{connection::*, migrations::Migrator, seed_data};

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

pub async fn start_server(config: &AppConfig) -> Result<()> {
    let db = open_database(&config.database.path).await?;
    let app = app::create_app(db, config)?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    log_routes(&address);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(address: &str) {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /swagger                    - Swagger UI documentation");
    info!("  /api/specification.json     - OpenAPI document");
    info!("  /api/paths/*                - Paths, modules, sections, themes, sources");
    info!("  /api/tags                   - Tag vocabulary");
    info!("Send X-User-Id to act as a configured user on http://{}", address);
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Migrates the database and inserts the sample path unless it is already there
pub async fn seed_database(database_path: &str) -> Result<()> {
    let db = open_database(database_path).await?;
    let mediator = Mediator::with_defaults(db, Arc::new(ConfiguredIdentityService::default()));
    seed_data::seed_sample_path(&mediator).await?;
    Ok(())
}
