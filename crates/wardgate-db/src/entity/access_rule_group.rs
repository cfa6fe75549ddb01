//! access-rule-to-group binding join entity.
//!
//! the group side intentionally carries no foreign key: group membership
//! may be synced from an external directory under weak consistency, so a
//! binding can transiently reference a group that no longer exists. the
//! policy resolver treats such bindings as contributing zero identities.

use sea_orm::entity::prelude::*;

/// (rule, group) binding pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_rule_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rule_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::access_rule::Entity",
        from = "Column::RuleId",
        to = "super::access_rule::Column::Id"
    )]
    AccessRule,
}

impl Related<super::access_rule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessRule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
