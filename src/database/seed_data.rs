use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use crate::application::modules::CreateModule;
use crate::application::paths::CreatePath;
use crate::application::sections::CreateSection;
use crate::application::sources::{CreateSource, SourceFields};
use crate::application::tags::CreateTag;
use crate::application::themes::CreateTheme;
use crate::application::{Mediator, RequestContext};
use crate::database::entities::{
    paths, AvailabilityLevel, ComplexityLevel, NecessityLevel, RelevanceLevel, SourceType,
};

pub const SAMPLE_PATH_KEY: &str = "rust-backend-developer";

const SAMPLE_TAGS: [&str; 4] = ["rust", "async", "backend", "databases"];

/// Inserts a small but complete learning path through the regular commands
pub async fn seed_sample_path(mediator: &Mediator) -> Result<()> {
    let existing = paths::Entity::find()
        .filter(paths::Column::Key.eq(SAMPLE_PATH_KEY))
        .one(mediator.db())
        .await?;

    if existing.is_some() {
        info!("Sample path already exists, skipping seed data creation");
        return Ok(());
    }

    info!("Creating sample path: Rust Backend Developer");
    let ctx = RequestContext::system();

    for name in SAMPLE_TAGS {
        mediator
            .send(
                &ctx,
                CreateTag {
                    name: name.to_string(),
                },
            )
            .await?;
    }

    let path = mediator
        .send(
            &ctx,
            CreatePath {
                title: "Rust Backend Developer".to_string(),
                description: "Services, storage and concurrency with Rust".to_string(),
                is_visible: true,
                key: Some(SAMPLE_PATH_KEY.to_string()),
                tags: vec!["rust".to_string(), "backend".to_string()],
            },
        )
        .await?;

    let language = mediator
        .send(
            &ctx,
            CreateModule {
                path_id: path.id,
                title: "Language fundamentals".to_string(),
                description: "Ownership, borrowing, traits and error handling".to_string(),
                necessity: NecessityLevel::MustKnow,
                order: 0,
                tags: vec!["rust".to_string()],
                prerequisite_ids: vec![],
            },
        )
        .await?;

    let concurrency = mediator
        .send(
            &ctx,
            CreateModule {
                path_id: path.id,
                title: "Async and concurrency".to_string(),
                description: "Futures, executors and shared state".to_string(),
                necessity: NecessityLevel::GoodToKnow,
                order: 1,
                tags: vec!["async".to_string()],
                prerequisite_ids: vec![language.id],
            },
        )
        .await?;

    let basics = mediator
        .send(
            &ctx,
            CreateSection {
                path_id: path.id,
                module_id: language.id,
                title: "Memory model".to_string(),
                necessity: NecessityLevel::MustKnow,
                order: 0,
                tags: vec![],
            },
        )
        .await?;

    let ownership = mediator
        .send(
            &ctx,
            CreateTheme {
                path_id: path.id,
                module_id: language.id,
                section_id: Some(basics.id),
                title: "Ownership and borrowing".to_string(),
                description: "Moves, references and lifetimes".to_string(),
                complexity: ComplexityLevel::Beginner,
                necessity: NecessityLevel::MustKnow,
                order: 0,
                tags: vec!["rust".to_string()],
                related_theme_ids: vec![],
            },
        )
        .await?;

    mediator
        .send(
            &ctx,
            CreateSource {
                path_id: path.id,
                module_id: language.id,
                theme_id: ownership.id,
                fields: SourceFields {
                    title: "The Rust Programming Language, chapter 4".to_string(),
                    description: "Understanding ownership".to_string(),
                    url: "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html"
                        .to_string(),
                    order: 0,
                    source_type: SourceType::Book,
                    availability: AvailabilityLevel::Free,
                    relevance: RelevanceLevel::UpToDate,
                    tags: vec!["rust".to_string()],
                },
            },
        )
        .await?;

    let futures = mediator
        .send(
            &ctx,
            CreateTheme {
                path_id: path.id,
                module_id: concurrency.id,
                section_id: None,
                title: "Futures and async/await".to_string(),
                description: "How async functions compile and run".to_string(),
                complexity: ComplexityLevel::Intermediate,
                necessity: NecessityLevel::GoodToKnow,
                order: 0,
                tags: vec!["async".to_string()],
                related_theme_ids: vec![ownership.id],
            },
        )
        .await?;

    mediator
        .send(
            &ctx,
            CreateSource {
                path_id: path.id,
                module_id: concurrency.id,
                theme_id: futures.id,
                fields: SourceFields {
                    title: "Tokio tutorial".to_string(),
                    description: "Building an async Redis clone".to_string(),
                    url: "https://tokio.rs/tokio/tutorial".to_string(),
                    order: 0,
                    source_type: SourceType::Documentation,
                    availability: AvailabilityLevel::Free,
                    relevance: RelevanceLevel::UpToDate,
                    tags: vec!["async".to_string()],
                },
            },
        )
        .await?;

    info!("Successfully created sample path {}", path.id);
    Ok(())
}
