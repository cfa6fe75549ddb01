//! create resources table migration

use sea_orm_migration::prelude::*;

use super::m20260829_000004_create_remote_networks::RemoteNetworks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::Name).string().not_null())
                    .col(
                        ColumnDef::new(Resources::ResourceType)
                            .string()
                            .not_null()
                            .default("STANDARD"),
                    )
                    .col(ColumnDef::new(Resources::Address).string().not_null())
                    .col(
                        ColumnDef::new(Resources::Protocol)
                            .string()
                            .not_null()
                            .default("TCP"),
                    )
                    .col(ColumnDef::new(Resources::PortFrom).integer())
                    .col(ColumnDef::new(Resources::PortTo).integer())
                    .col(ColumnDef::new(Resources::Alias).string())
                    .col(ColumnDef::new(Resources::RemoteNetworkId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_remote_network")
                            .from(Resources::Table, Resources::RemoteNetworkId)
                            .to(RemoteNetworks::Table, RemoteNetworks::Id)
                            // deleting a network detaches its resources
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // index on remote_network_id for the compiler's per-network scan
        manager
            .create_index(
                Index::create()
                    .name("idx_resources_remote_network_id")
                    .table(Resources::Table)
                    .col(Resources::RemoteNetworkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Resources {
    Table,
    Id,
    Name,
    ResourceType,
    Address,
    Protocol,
    PortFrom,
    PortTo,
    Alias,
    RemoteNetworkId,
}
