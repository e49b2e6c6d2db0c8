use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create paths table
        manager
            .create_table(
                with_audit_columns(
                    Table::create()
                        .table(Paths::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Paths::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Paths::Title).string_len(100).not_null())
                        .col(ColumnDef::new(Paths::Description).string_len(3000).not_null())
                        .col(
                            ColumnDef::new(Paths::IsVisible)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Paths::Key)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Paths::Tags).text().not_null().default("[]"))
                        .col(ColumnDef::new(Paths::Deleted).timestamp_with_time_zone()),
                )
                .to_owned(),
            )
            .await?;

        // Create modules table
        manager
            .create_table(
                with_audit_columns(
                    Table::create()
                        .table(Modules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Modules::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Modules::Title).string_len(100).not_null())
                        .col(ColumnDef::new(Modules::Description).string_len(3000).not_null())
                        .col(
                            ColumnDef::new(Modules::Necessity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Modules::Tags).text().not_null().default("[]")),
                )
                .to_owned(),
            )
            .await?;

        // Create path_modules join table
        manager
            .create_table(
                Table::create()
                    .table(PathModules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PathModules::PathId).integer().not_null())
                    .col(ColumnDef::new(PathModules::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(PathModules::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(PathModules::PathId)
                            .col(PathModules::ModuleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_path_modules_path_id")
                            .from(PathModules::Table, PathModules::PathId)
                            .to(Paths::Table, Paths::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_path_modules_module_id")
                            .from(PathModules::Table, PathModules::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create module_prerequisites self join
        manager
            .create_table(
                Table::create()
                    .table(ModulePrerequisites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ModulePrerequisites::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(ModulePrerequisites::PrerequisiteId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ModulePrerequisites::ModuleId)
                            .col(ModulePrerequisites::PrerequisiteId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_prerequisites_module_id")
                            .from(ModulePrerequisites::Table, ModulePrerequisites::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_prerequisites_prerequisite_id")
                            .from(ModulePrerequisites::Table, ModulePrerequisites::PrerequisiteId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sections table
        manager
            .create_table(
                with_audit_columns(
                    Table::create()
                        .table(Sections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sections::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sections::ModuleId).integer().not_null())
                        .col(ColumnDef::new(Sections::Title).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Sections::Necessity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Sections::Order).integer().not_null().default(0))
                        .col(ColumnDef::new(Sections::Tags).text().not_null().default("[]"))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sections_module_id")
                                .from(Sections::Table, Sections::ModuleId)
                                .to(Modules::Table, Modules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create themes table
        manager
            .create_table(
                with_audit_columns(
                    Table::create()
                        .table(Themes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Themes::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Themes::ModuleId).integer().not_null())
                        .col(ColumnDef::new(Themes::SectionId).integer())
                        .col(ColumnDef::new(Themes::Title).string_len(200).not_null())
                        .col(ColumnDef::new(Themes::Description).string_len(3000).not_null())
                        .col(
                            ColumnDef::new(Themes::Complexity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Themes::Necessity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Themes::Order).integer().not_null().default(0))
                        .col(ColumnDef::new(Themes::Tags).text().not_null().default("[]"))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_themes_module_id")
                                .from(Themes::Table, Themes::ModuleId)
                                .to(Modules::Table, Modules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_themes_section_id")
                                .from(Themes::Table, Themes::SectionId)
                                .to(Sections::Table, Sections::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create theme_relations self join
        manager
            .create_table(
                Table::create()
                    .table(ThemeRelations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ThemeRelations::PrerequisiteId).integer().not_null())
                    .col(ColumnDef::new(ThemeRelations::RelatedId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ThemeRelations::PrerequisiteId)
                            .col(ThemeRelations::RelatedId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_theme_relations_prerequisite_id")
                            .from(ThemeRelations::Table, ThemeRelations::PrerequisiteId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_theme_relations_related_id")
                            .from(ThemeRelations::Table, ThemeRelations::RelatedId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sources table
        manager
            .create_table(
                with_audit_columns(
                    Table::create()
                        .table(Sources::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sources::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sources::ThemeId).integer().not_null())
                        .col(ColumnDef::new(Sources::Title).string_len(200).not_null())
                        .col(
                            ColumnDef::new(Sources::Description)
                                .string_len(10000)
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(Sources::Url).string_len(500).not_null())
                        .col(ColumnDef::new(Sources::Order).integer().not_null().default(0))
                        .col(ColumnDef::new(Sources::Type).integer().not_null().default(0))
                        .col(
                            ColumnDef::new(Sources::Availability)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Sources::Relevance)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Sources::Tags).text().not_null().default("[]"))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sources_theme_id")
                                .from(Sources::Table, Sources::ThemeId)
                                .to(Themes::Table, Themes::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create tags table
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Tags::Created).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Tags::CreatedBy).string())
                    .to_owned(),
            )
            .await?;

        // Indexes for the parent lookups every handler performs
        manager
            .create_index(
                Index::create()
                    .name("idx_path_modules_module_id")
                    .table(PathModules::Table)
                    .col(PathModules::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_module_id")
                    .table(Sections::Table)
                    .col(Sections::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_themes_module_id")
                    .table(Themes::Table)
                    .col(Themes::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sources_theme_id")
                    .table(Sources::Table)
                    .col(Sources::ThemeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sources::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ThemeRelations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ModulePrerequisites::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(PathModules::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Paths::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

/// Appends the four audit columns shared by every mutable entity
fn with_audit_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Audit::Created)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Audit::CreatedBy).string())
        .col(ColumnDef::new(Audit::LastModified).timestamp_with_time_zone())
        .col(ColumnDef::new(Audit::LastModifiedBy).string())
}

#[derive(Iden)]
enum Audit {
    Created,
    CreatedBy,
    LastModified,
    LastModifiedBy,
}

#[derive(Iden)]
enum Paths {
    Table,
    Id,
    Title,
    Description,
    IsVisible,
    Key,
    Tags,
    Deleted,
}

#[derive(Iden)]
enum Modules {
    Table,
    Id,
    Title,
    Description,
    Necessity,
    Tags,
}

#[derive(Iden)]
enum PathModules {
    Table,
    PathId,
    ModuleId,
    Order,
}

#[derive(Iden)]
enum ModulePrerequisites {
    Table,
    ModuleId,
    PrerequisiteId,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
    ModuleId,
    Title,
    Necessity,
    Order,
    Tags,
}

#[derive(Iden)]
enum Themes {
    Table,
    Id,
    ModuleId,
    SectionId,
    Title,
    Description,
    Complexity,
    Necessity,
    Order,
    Tags,
}

#[derive(Iden)]
enum ThemeRelations {
    Table,
    PrerequisiteId,
    RelatedId,
}

#[derive(Iden)]
enum Sources {
    Table,
    Id,
    ThemeId,
    Title,
    Description,
    Url,
    Order,
    Type,
    Availability,
    Relevance,
    Tags,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
    Created,
    CreatedBy,
}
