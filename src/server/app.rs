use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, patch},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, modules, paths, sections, sources, tags, themes};
use crate::application::identity::{ConfiguredIdentityService, IdentityService};
use crate::application::Mediator;
use crate::auth::{AllowAllAuthorizer, Authorizer, RoleAuthorizer};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub mediator: Mediator,
    pub identity: Arc<dyn IdentityService>,
}

impl AppState {
    /// Wires the mediator with the identity directory and authorizer chosen by `config`
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let identity: Arc<dyn IdentityService> = Arc::new(ConfiguredIdentityService::new(
            config.identity.users.clone(),
        ));
        let authorizer: Arc<dyn Authorizer> = if config.auth.enabled {
            Arc::new(RoleAuthorizer::new(config.auth.admin_role.clone()))
        } else {
            Arc::new(AllowAllAuthorizer)
        };

        Self {
            mediator: Mediator::new(db, identity.clone(), authorizer),
            identity,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Developer Path API",
        description = "Learning paths made of modules, sections, themes and sources"
    ),
    paths(
        health::health_check,
        paths::list_paths,
        paths::get_path,
        paths::get_path_details,
        paths::create_path,
        paths::update_path,
        paths::patch_path,
        paths::delete_path,
        paths::list_deleted_paths,
        paths::restore_path,
        modules::list_modules,
        modules::get_module,
        modules::get_module_details,
        modules::create_module,
        modules::update_module,
        modules::delete_module,
        sections::list_sections,
        sections::get_section,
        sections::create_section,
        sections::update_section,
        sections::delete_section,
        themes::list_themes,
        themes::get_theme,
        themes::get_theme_details,
        themes::create_theme,
        themes::update_theme,
        themes::delete_theme,
        sources::list_sources,
        sources::get_source,
        sources::create_source,
        sources::update_source,
        sources::delete_source,
        tags::list_tags,
        tags::create_tag,
        tags::delete_tag,
    ),
    components(schemas(
        crate::application::models::PathDto,
        crate::application::models::PathDetails,
        crate::application::models::PathModuleDto,
        crate::application::models::PathTitleDto,
        crate::application::models::DeletedPathDto,
        crate::application::models::ModuleDto,
        crate::application::models::ModuleTitleDto,
        crate::application::models::ModuleDetails,
        crate::application::models::SectionDto,
        crate::application::models::ThemeDto,
        crate::application::models::ThemeTitleDto,
        crate::application::models::ThemeDetails,
        crate::application::models::SourceDto,
        crate::application::models::TagDto,
        crate::application::paging::PaginationData,
        crate::application::paths::CreatePath,
        crate::application::paths::UpdatePath,
        crate::application::modules::CreateModule,
        crate::application::modules::UpdateModule,
        crate::application::sections::CreateSection,
        crate::application::sections::UpdateSection,
        crate::application::themes::CreateTheme,
        crate::application::themes::UpdateTheme,
        crate::application::sources::SourceFields,
        crate::application::sources::CreateSource,
        crate::application::sources::UpdateSource,
        crate::application::tags::CreateTag,
        crate::database::entities::NecessityLevel,
        crate::database::entities::ComplexityLevel,
        crate::database::entities::SourceType,
        crate::database::entities::AvailabilityLevel,
        crate::database::entities::RelevanceLevel,
    )),
    tags(
        (name = "paths", description = "Learning paths"),
        (name = "modules", description = "Modules of a path"),
        (name = "sections", description = "Sections of a module"),
        (name = "themes", description = "Themes of a module"),
        (name = "sources", description = "Sources of a theme"),
        (name = "tags", description = "Tag vocabulary"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn create_app(db: DatabaseConnection, config: &AppConfig) -> Result<Router> {
    let state = AppState::new(db, config);

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = match config.server.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(SwaggerUi::new("/swagger").url("/api/specification.json", ApiDoc::openapi()))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Paths
        .route("/paths", get(paths::list_paths).post(paths::create_path))
        // Static segment: only GET exists here, other methods answer 405 rather than
        // falling through to `/paths/:path_id`
        .route("/paths/deleted", get(paths::list_deleted_paths))
        .route("/paths/deleted/:id", patch(paths::restore_path))
        .route(
            "/paths/:path_id",
            get(paths::get_path)
                .put(paths::update_path)
                .patch(paths::patch_path)
                .delete(paths::delete_path),
        )
        .route("/paths/:path_id/details", get(paths::get_path_details))
        // Modules
        .route(
            "/paths/:path_id/modules",
            get(modules::list_modules).post(modules::create_module),
        )
        .route(
            "/paths/:path_id/modules/:module_id",
            get(modules::get_module)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
        .route(
            "/paths/:path_id/modules/:module_id/details",
            get(modules::get_module_details),
        )
        // Sections
        .route(
            "/paths/:path_id/modules/:module_id/sections",
            get(sections::list_sections).post(sections::create_section),
        )
        .route(
            "/paths/:path_id/modules/:module_id/sections/:id",
            get(sections::get_section)
                .put(sections::update_section)
                .delete(sections::delete_section),
        )
        // Themes
        .route(
            "/paths/:path_id/modules/:module_id/themes",
            get(themes::list_themes).post(themes::create_theme),
        )
        .route(
            "/paths/:path_id/modules/:module_id/themes/:theme_id",
            get(themes::get_theme)
                .put(themes::update_theme)
                .delete(themes::delete_theme),
        )
        .route(
            "/paths/:path_id/modules/:module_id/themes/:theme_id/details",
            get(themes::get_theme_details),
        )
        // Sources
        .route(
            "/paths/:path_id/modules/:module_id/themes/:theme_id/sources",
            get(sources::list_sources).post(sources::create_source),
        )
        .route(
            "/paths/:path_id/modules/:module_id/themes/:theme_id/sources/:id",
            get(sources::get_source)
                .put(sources::update_source)
                .delete(sources::delete_source),
        )
        // Tags
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/tags/:id", delete(tags::delete_tag))
}
