//! access rule entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use wardgate_types::{AccessRule, AccessRuleId, ResourceId};

/// access rule database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub resource_id: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resource::Entity",
        from = "Column::ResourceId",
        to = "super::resource::Column::Id"
    )]
    Resource,
    #[sea_orm(has_many = "super::access_rule_group::Entity")]
    AccessRuleGroups,
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl Related<super::access_rule_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessRuleGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AccessRule {
    fn from(model: Model) -> Self {
        Self {
            id: AccessRuleId(model.id),
            name: model.name,
            resource_id: ResourceId(model.resource_id),
            enabled: model.enabled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&AccessRule> for ActiveModel {
    fn from(rule: &AccessRule) -> Self {
        Self {
            id: Set(rule.id.0.clone()),
            name: Set(rule.name.clone()),
            resource_id: Set(rule.resource_id.0.clone()),
            enabled: Set(rule.enabled),
            created_at: Set(rule.created_at),
            updated_at: Set(rule.updated_at),
        }
    }
}
