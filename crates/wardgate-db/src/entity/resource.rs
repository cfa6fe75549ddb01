//! resource entity for database storage.

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use tracing::warn;

use wardgate_types::{Protocol, RemoteNetworkId, Resource, ResourceId, ResourceType};

/// resource database model.
///
/// ports are stored as nullable integers: both null means all ports,
/// a single value means one port, both set means an inclusive range.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub resource_type: String,
    pub address: String,
    pub protocol: String,
    pub port_from: Option<i32>,
    pub port_to: Option<i32>,
    pub alias: Option<String>,
    /// nullable: deleting a network detaches its resources.
    pub remote_network_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::remote_network::Entity",
        from = "Column::RemoteNetworkId",
        to = "super::remote_network::Column::Id"
    )]
    RemoteNetwork,
    #[sea_orm(has_many = "super::access_rule::Entity")]
    AccessRules,
}

impl Related<super::remote_network::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RemoteNetwork.def()
    }
}

impl Related<super::access_rule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessRules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resource {
    fn from(model: Model) -> Self {
        let resource_type = match model.resource_type.parse() {
            Ok(t) => t,
            Err(e) => {
                warn!(resource_id = %model.id, error = %e, "unknown resource type in store, treating as STANDARD");
                ResourceType::Standard
            }
        };
        let protocol = match model.protocol.parse() {
            Ok(p) => p,
            Err(e) => {
                warn!(resource_id = %model.id, error = %e, "unknown protocol in store, treating as TCP");
                Protocol::Tcp
            }
        };
        Self {
            id: ResourceId(model.id),
            name: model.name,
            resource_type,
            address: model.address,
            protocol,
            port_from: model.port_from.map(|p| p as u16),
            port_to: model.port_to.map(|p| p as u16),
            alias: model.alias,
            remote_network_id: model.remote_network_id.map(RemoteNetworkId),
        }
    }
}

impl From<&Resource> for ActiveModel {
    fn from(resource: &Resource) -> Self {
        Self {
            id: Set(resource.id.0.clone()),
            name: Set(resource.name.clone()),
            resource_type: Set(resource.resource_type.to_string()),
            address: Set(resource.address.clone()),
            protocol: Set(resource.protocol.to_string()),
            port_from: Set(resource.port_from.map(i32::from)),
            port_to: Set(resource.port_to.map(i32::from)),
            alias: Set(resource.alias.clone()),
            remote_network_id: Set(resource.remote_network_id.as_ref().map(|n| n.0.clone())),
        }
    }
}
