//! create connectors table migration

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
                    .table(Connectors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Connectors::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Connectors::Name).string().not_null())
                    .col(ColumnDef::new(Connectors::Hostname).string().not_null())
                    .col(
                        ColumnDef::new(Connectors::RemoteNetworkId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Connectors::LastPolicyVersion)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Connectors::LastSeenAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Connectors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_connectors_remote_network")
                            .from(Connectors::Table, Connectors::RemoteNetworkId)
                            .to(RemoteNetworks::Table, RemoteNetworks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // index on remote_network_id for listing a network's connectors
        manager
            .create_index(
                Index::create()
                    .name("idx_connectors_remote_network_id")
                    .table(Connectors::Table)
                    .col(Connectors::RemoteNetworkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Connectors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Connectors {
    Table,
    Id,
    Name,
    Hostname,
    RemoteNetworkId,
    LastPolicyVersion,
    LastSeenAt,
    CreatedAt,
}
