//! create access_rule_groups join table migration
//!
//! group_id has no foreign key: groups may be synced from an external
//! directory under weak consistency, and compilation must tolerate
//! bindings whose group has vanished.

use sea_orm_migration::prelude::*;

use super::m20260829_000007_create_access_rules::AccessRules;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessRuleGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AccessRuleGroups::RuleId).string().not_null())
                    .col(
                        ColumnDef::new(AccessRuleGroups::GroupId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AccessRuleGroups::RuleId)
                            .col(AccessRuleGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_access_rule_groups_rule")
                            .from(AccessRuleGroups::Table, AccessRuleGroups::RuleId)
                            .to(AccessRules::Table, AccessRules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessRuleGroups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccessRuleGroups {
    Table,
    RuleId,
    GroupId,
}
