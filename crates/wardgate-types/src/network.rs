//! remote network and connector types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// unique identifier for a remote network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteNetworkId(pub String);

impl RemoteNetworkId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RemoteNetworkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for RemoteNetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a private network segment reachable through its connectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteNetwork {
    /// unique identifier.
    pub id: RemoteNetworkId,

    /// display name.
    pub name: String,

    /// location tag (e.g. "AWS", "ON_PREM").
    pub location: String,

    /// when the network was created.
    pub created_at: DateTime<Utc>,
}

impl RemoteNetwork {
    /// create a new remote network.
    pub fn new(id: RemoteNetworkId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            created_at: Utc::now(),
        }
    }
}

/// unique identifier for a connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorId(pub String);

impl ConnectorId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// an enforcement point deployed inside one remote network.
///
/// `last_policy_version` is the version the connector itself reported
/// having applied; the authoritative compiled version lives in the
/// per-connector policy version ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    /// unique identifier.
    pub id: ConnectorId,

    /// display name.
    pub name: String,

    /// hostname the connector runs on.
    pub hostname: String,

    /// the network this connector serves.
    pub remote_network_id: RemoteNetworkId,

    /// last policy version the connector reported applying.
    pub last_policy_version: i64,

    /// when the connector last checked in.
    pub last_seen_at: Option<DateTime<Utc>>,

    /// when the connector was registered.
    pub created_at: DateTime<Utc>,
}

impl Connector {
    /// register a connector in a network.
    pub fn new(
        id: ConnectorId,
        name: impl Into<String>,
        hostname: impl Into<String>,
        remote_network_id: RemoteNetworkId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            hostname: hostname.into(),
            remote_network_id,
            last_policy_version: 0,
            last_seen_at: None,
            created_at: Utc::now(),
        }
    }
}
