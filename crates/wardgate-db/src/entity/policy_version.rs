//! per-connector policy version ledger entity.
//!
//! exactly one row per connector, created by the first compile and
//! updated thereafter. never deleted while the connector exists.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// policy version ledger database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "connector_policy_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub connector_id: String,
    /// monotonically non-decreasing compiled version.
    pub version: i64,
    /// hex digest of the canonical policy content at this version.
    pub policy_hash: String,
    pub compiled_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::connector::Entity",
        from = "Column::ConnectorId",
        to = "super::connector::Column::Id"
    )]
    Connector,
}

impl Related<super::connector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Connector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
