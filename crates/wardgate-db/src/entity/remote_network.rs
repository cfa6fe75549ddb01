//! remote network entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use wardgate_types::{RemoteNetwork, RemoteNetworkId};

/// remote network database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "remote_networks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::connector::Entity")]
    Connectors,
    #[sea_orm(has_many = "super::resource::Entity")]
    Resources,
}

impl Related<super::connector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Connectors.def()
    }
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RemoteNetwork {
    fn from(model: Model) -> Self {
        Self {
            id: RemoteNetworkId(model.id),
            name: model.name,
            location: model.location,
            created_at: model.created_at,
        }
    }
}

impl From<&RemoteNetwork> for ActiveModel {
    fn from(network: &RemoteNetwork) -> Self {
        Self {
            id: Set(network.id.0.clone()),
            name: Set(network.name.clone()),
            location: Set(network.location.clone()),
            created_at: Set(network.created_at),
        }
    }
}
