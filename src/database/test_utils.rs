use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::database::entities::{modules, path_modules, paths, themes, NecessityLevel};

pub async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite with the real schema
    let db = super::establish_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    crate::database::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn insert_path(db: &DatabaseConnection, title: &str) -> paths::Model {
    paths::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("{} description", title)),
        is_visible: Set(true),
        key: Set(title.to_lowercase().replace(' ', "-")),
        tags: Set("[]".to_string()),
        created: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert path")
}

pub async fn insert_module(
    db: &DatabaseConnection,
    path_id: i32,
    title: &str,
    order: i32,
) -> modules::Model {
    let module = modules::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("{} description", title)),
        necessity: Set(NecessityLevel::GoodToKnow),
        tags: Set("[]".to_string()),
        created: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert module");

    path_modules::ActiveModel {
        path_id: Set(path_id),
        module_id: Set(module.id),
        order: Set(order),
    }
    .insert(db)
    .await
    .expect("Failed to link module");

    module
}

pub async fn insert_theme(db: &DatabaseConnection, module_id: i32, title: &str) -> themes::Model {
    themes::ActiveModel {
        module_id: Set(module_id),
        title: Set(title.to_string()),
        description: Set(format!("{} description", title)),
        tags: Set("[]".to_string()),
        created: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert theme")
}
