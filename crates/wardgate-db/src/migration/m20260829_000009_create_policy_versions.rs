//! create connector_policy_versions ledger table migration

use sea_orm_migration::prelude::*;

use super::m20260829_000005_create_connectors::Connectors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConnectorPolicyVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConnectorPolicyVersions::ConnectorId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ConnectorPolicyVersions::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ConnectorPolicyVersions::PolicyHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConnectorPolicyVersions::CompiledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_policy_versions_connector")
                            .from(
                                ConnectorPolicyVersions::Table,
                                ConnectorPolicyVersions::ConnectorId,
                            )
                            .to(Connectors::Table, Connectors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ConnectorPolicyVersions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConnectorPolicyVersions {
    Table,
    ConnectorId,
    Version,
    PolicyHash,
    CompiledAt,
}
