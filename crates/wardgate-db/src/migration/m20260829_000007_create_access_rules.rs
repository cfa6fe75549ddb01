//! create access_rules table migration

use sea_orm_migration::prelude::*;

use super::m20260829_000006_create_resources::Resources;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessRules::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessRules::Name).string().not_null())
                    .col(ColumnDef::new(AccessRules::ResourceId).string().not_null())
                    .col(
                        ColumnDef::new(AccessRules::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AccessRules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccessRules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_access_rules_resource")
                            .from(AccessRules::Table, AccessRules::ResourceId)
                            .to(Resources::Table, Resources::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // index on resource_id for the evaluator's per-resource scan
        manager
            .create_index(
                Index::create()
                    .name("idx_access_rules_resource_id")
                    .table(AccessRules::Table)
                    .col(AccessRules::ResourceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessRules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccessRules {
    Table,
    Id,
    Name,
    ResourceId,
    Enabled,
    CreatedAt,
    UpdatedAt,
}
