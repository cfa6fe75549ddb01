//! create remote_networks table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RemoteNetworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RemoteNetworks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RemoteNetworks::Name).string().not_null())
                    .col(ColumnDef::new(RemoteNetworks::Location).string().not_null())
                    .col(
                        ColumnDef::new(RemoteNetworks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RemoteNetworks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RemoteNetworks {
    Table,
    Id,
    Name,
    Location,
    CreatedAt,
}
