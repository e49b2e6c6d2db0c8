//! API integration tests
//!
//! Drive the router end to end against a migrated temporary SQLite file.

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use developer_path::config::{AppConfig, IdentityUser};
use developer_path::database::open_database;
use developer_path::server::app::create_app;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

const ADMIN: &str = "1";
const EDITOR: &str = "2";

struct TestApp {
    server: TestServer,
    _db_file: NamedTempFile,
}

async fn setup_test_server() -> Result<TestApp> {
    let db_file = NamedTempFile::new()?;
    let db = open_database(&db_file.path().display().to_string()).await?;

    let mut config = AppConfig::default();
    config.identity.users = vec![
        IdentityUser {
            id: ADMIN.to_string(),
            name: "Ada".to_string(),
            roles: vec!["Administrator".to_string()],
        },
        IdentityUser {
            id: EDITOR.to_string(),
            name: "Linus".to_string(),
            roles: vec![],
        },
    ];

    let app = create_app(db, &config)?;
    Ok(TestApp {
        server: TestServer::new(app)?,
        _db_file: db_file,
    })
}

fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(user_id).unwrap(),
    )
}

async fn create_path(server: &TestServer, title: &str) -> Value {
    let response = as_user(server.post("/api/paths"), ADMIN)
        .json(&json!({
            "title": title,
            "description": format!("{} description", title),
            "isVisible": true,
            "tags": ["rust"]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

async fn create_module(server: &TestServer, path_id: i64, title: &str) -> Value {
    let response = as_user(
        server.post(&format!("/api/paths/{}/modules", path_id)),
        EDITOR,
    )
    .json(&json!({
        "title": title,
        "description": "Module description",
        "necessity": "MustKnow"
    }))
    .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "developer-path");
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_openapi_document() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app.server.get("/api/specification.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let document: Value = response.json();
    assert!(document["paths"]["/api/paths"].is_object());
    assert!(document["components"]["schemas"]["SourceDto"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_path_crud() -> Result<()> {
    let app = setup_test_server().await?;
    let server = &app.server;

    let response = as_user(server.post("/api/paths"), ADMIN)
        .json(&json!({
            "title": "Rust Developer",
            "description": "From zero to async",
            "isVisible": true,
            "key": "rust-dev",
            "tags": ["rust", "backend"]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let path: Value = response.json();
    let id = path["id"].as_i64().unwrap();
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("/api/paths/{}", id)
    );

    let fetched: Value = server.get(&format!("/api/paths/{}", id)).await.json();
    assert_eq!(fetched["title"], "Rust Developer");
    assert_eq!(fetched["key"], "rust-dev");
    assert_eq!(fetched["isVisible"], true);
    assert_eq!(fetched["tags"], json!(["rust", "backend"]));

    let response = as_user(server.put(&format!("/api/paths/{}", id)), ADMIN)
        .json(&json!({
            "title": "Rust Engineer",
            "description": "From zero to async",
            "isVisible": false,
            "tags": []
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Rust Engineer");
    assert_eq!(updated["key"], "rust-dev");

    let response = as_user(server.delete(&format!("/api/paths/{}", id)), ADMIN).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/paths/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_path_mutations_need_administrator() -> Result<()> {
    let app = setup_test_server().await?;
    let body = json!({ "title": "Hidden", "description": "Not allowed" });

    let response = app.server.post("/api/paths").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = as_user(app.server.post("/api/paths"), EDITOR)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_validation_errors_are_reported_per_field() -> Result<()> {
    let app = setup_test_server().await?;

    let response = as_user(app.server.post("/api/paths"), ADMIN)
        .json(&json!({ "title": "", "description": "x".repeat(3001) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["errors"]["title"][0], "The Title field is required.");
    assert!(body["errors"]["description"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() -> Result<()> {
    let app = setup_test_server().await?;

    let response = as_user(app.server.post("/api/paths"), ADMIN)
        .text("{ not json")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app.server.get("/api/paths/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_update_with_mismatched_id_leaves_path_unchanged() -> Result<()> {
    let app = setup_test_server().await?;
    let path = create_path(&app.server, "Original").await;
    let id = path["id"].as_i64().unwrap();

    let response = as_user(app.server.put(&format!("/api/paths/{}", id)), ADMIN)
        .json(&json!({
            "id": id + 1,
            "title": "Changed",
            "description": "Changed"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let fetched: Value = app.server.get(&format!("/api/paths/{}", id)).await.json();
    assert_eq!(fetched["title"], "Original");
    Ok(())
}

#[tokio::test]
async fn test_module_paging() -> Result<()> {
    let app = setup_test_server().await?;
    let server = &app.server;
    let path = create_path(server, "Some Path").await;
    let path_id = path["id"].as_i64().unwrap();
    for n in 1..=3 {
        create_module(server, path_id, &format!("New Module{}", n)).await;
    }

    let all: Vec<Value> = server
        .get(&format!("/api/paths/{}/modules", path_id))
        .await
        .json();
    assert_eq!(all.len(), 3);

    let response = server
        .get(&format!("/api/paths/{}/modules", path_id))
        .add_query_param("pageNumber", 2)
        .add_query_param("pageSize", 2)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let metadata: Value =
        serde_json::from_str(response.headers().get("x-pagination").unwrap().to_str()?)?;
    assert_eq!(metadata, json!({ "pageNumber": 2, "pageSize": 2 }));
    let page: Vec<Value> = response.json();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["title"], "New Module3");

    let page: Vec<Value> = server
        .get(&format!("/api/paths/{}/modules", path_id))
        .add_query_param("pageNumber", 3)
        .add_query_param("pageSize", 999)
        .await
        .json();
    assert!(page.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_module_delete_cascades_to_themes_and_sources() -> Result<()> {
    let app = setup_test_server().await?;
    let server = &app.server;
    let path_id = create_path(server, "Backend").await["id"].as_i64().unwrap();
    let module_id = create_module(server, path_id, "Databases").await["id"]
        .as_i64()
        .unwrap();
    let base = format!("/api/paths/{}/modules/{}", path_id, module_id);

    let response = as_user(server.post(&format!("{}/themes", base)), EDITOR)
        .json(&json!({
            "title": "Indexes",
            "description": "B-trees and friends",
            "complexity": "Intermediate"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let theme_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = as_user(
        server.post(&format!("{}/themes/{}/sources", base, theme_id)),
        EDITOR,
    )
    .json(&json!({
        "title": "Use The Index, Luke",
        "url": "https://use-the-index-luke.com/",
        "type": "Blog",
        "availability": "Free",
        "relevance": "UpToDate"
    }))
    .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let source: Value = response.json();
    assert_eq!(source["type"], "Blog");

    let response = as_user(server.delete(&base), EDITOR).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("{}/themes/{}", base, theme_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_missing_ancestor_is_not_found() -> Result<()> {
    let app = setup_test_server().await?;
    let path_id = create_path(&app.server, "Frontend").await["id"]
        .as_i64()
        .unwrap();

    let response = as_user(
        app.server
            .post(&format!("/api/paths/{}/modules/99999/themes", path_id)),
        EDITOR,
    )
    .json(&json!({ "title": "Grid", "description": "Two dimensional layout" }))
    .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Entity \"Module\" (99999) was not found");
    Ok(())
}

#[tokio::test]
async fn test_soft_delete_and_restore() -> Result<()> {
    let app = setup_test_server().await?;
    let server = &app.server;
    let id = create_path(server, "Retired").await["id"].as_i64().unwrap();

    as_user(server.delete(&format!("/api/paths/{}", id)), ADMIN).await;

    let response = server.get("/api/paths/deleted").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let deleted: Vec<Value> = as_user(server.get("/api/paths/deleted"), ADMIN)
        .await
        .json();
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0]["deleted"].is_string());

    let response = as_user(server.patch(&format!("/api/paths/deleted/{}", id)), ADMIN)
        .json(&json!([{ "op": "replace", "path": "/deleted", "value": null }]))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get(&format!("/api/paths/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_patch_path() -> Result<()> {
    let app = setup_test_server().await?;
    let id = create_path(&app.server, "Draft").await["id"].as_i64().unwrap();

    let response = as_user(app.server.patch(&format!("/api/paths/{}", id)), ADMIN)
        .json(&json!([{ "op": "replace", "path": "/title", "value": "Published" }]))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["title"], "Published");

    let response = as_user(app.server.patch(&format!("/api/paths/{}", id)), ADMIN)
        .json(&json!([{ "op": "remove", "path": "/nothing" }]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_tags() -> Result<()> {
    let app = setup_test_server().await?;
    let server = &app.server;

    let response = as_user(server.post("/api/tags"), EDITOR)
        .json(&json!({ "name": "tokio" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let tag_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = as_user(server.post("/api/tags"), EDITOR)
        .json(&json!({ "name": "tokio" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let tags: Vec<Value> = server.get("/api/tags").await.json();
    assert_eq!(tags, vec![json!({ "id": tag_id, "name": "tokio" })]);

    let response = as_user(server.delete(&format!("/api/tags/{}", tag_id)), EDITOR).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_anonymous() -> Result<()> {
    let app = setup_test_server().await?;
    let path_id = create_path(&app.server, "Gatekeeping").await["id"]
        .as_i64()
        .unwrap();

    let response = as_user(
        app.server.post(&format!("/api/paths/{}/modules", path_id)),
        "not-a-configured-user",
    )
    .json(&json!({ "title": "Sneaky", "description": "Should not be written" }))
    .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let modules: Vec<Value> = app
        .server
        .get(&format!("/api/paths/{}/modules", path_id))
        .await
        .json();
    assert!(modules.is_empty());

    let response = as_user(app.server.get("/api/tags"), "not-a-configured-user").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_deleted_collection_only_lists() -> Result<()> {
    let app = setup_test_server().await?;

    let response = as_user(app.server.put("/api/paths/deleted"), ADMIN)
        .json(&json!({ "title": "x", "description": "y" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    let response = as_user(app.server.delete("/api/paths/deleted"), ADMIN).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
