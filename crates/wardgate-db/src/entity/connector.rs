//! connector entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use wardgate_types::{Connector, ConnectorId, RemoteNetworkId};

/// connector database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "connectors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub remote_network_id: String,
    /// version the connector self-reported having applied.
    pub last_policy_version: i64,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::remote_network::Entity",
        from = "Column::RemoteNetworkId",
        to = "super::remote_network::Column::Id"
    )]
    RemoteNetwork,
    #[sea_orm(has_one = "super::policy_version::Entity")]
    PolicyVersion,
}

impl Related<super::remote_network::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RemoteNetwork.def()
    }
}

impl Related<super::policy_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PolicyVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Connector {
    fn from(model: Model) -> Self {
        Self {
            id: ConnectorId(model.id),
            name: model.name,
            hostname: model.hostname,
            remote_network_id: RemoteNetworkId(model.remote_network_id),
            last_policy_version: model.last_policy_version,
            last_seen_at: model.last_seen_at,
            created_at: model.created_at,
        }
    }
}

impl From<&Connector> for ActiveModel {
    fn from(connector: &Connector) -> Self {
        Self {
            id: Set(connector.id.0.clone()),
            name: Set(connector.name.clone()),
            hostname: Set(connector.hostname.clone()),
            remote_network_id: Set(connector.remote_network_id.0.clone()),
            last_policy_version: Set(connector.last_policy_version),
            last_seen_at: Set(connector.last_seen_at),
            created_at: Set(connector.created_at),
        }
    }
}
