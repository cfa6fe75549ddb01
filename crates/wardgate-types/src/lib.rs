//! domain types for wardgate.
//!
//! wardgate models a zero-trust access control plane: identities (users
//! and groups), protected resources, remote networks with connectors,
//! and access rules binding groups to resources. These types are shared
//! between the persistence layer, the policy compiler, and the server.

#![warn(missing_docs)]

mod access_rule;
mod config;
mod group;
mod network;
mod resource;
mod user;

pub use access_rule::{AccessRule, AccessRuleId};
pub use config::{Config, DatabaseConfig};
pub use group::{Group, GroupId};
pub use network::{Connector, ConnectorId, RemoteNetwork, RemoteNetworkId};
pub use resource::{Protocol, Resource, ResourceId, ResourceType};
pub use user::{CertificateIdentity, User, UserId, UserStatus};
