//! protected resource types.

use serde::{Deserialize, Serialize};

use crate::RemoteNetworkId;

/// unique identifier for a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// how clients reach a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    /// generic network resource.
    Standard,
    /// browser-accessible resource (gets an aliased hostname).
    Browser,
    /// background service accessed by automation, not people.
    Background,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Standard => write!(f, "STANDARD"),
            ResourceType::Browser => write!(f, "BROWSER"),
            ResourceType::Background => write!(f, "BACKGROUND"),
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STANDARD" => Ok(ResourceType::Standard),
            "BROWSER" => Ok(ResourceType::Browser),
            "BACKGROUND" => Ok(ResourceType::Background),
            other => Err(format!("unknown resource type: {}", other)),
        }
    }
}

/// transport protocol for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// tcp.
    Tcp,
    /// udp.
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            other => Err(format!("unknown protocol: {}", other)),
        }
    }
}

/// a protected network resource.
///
/// port semantics: both `port_from` and `port_to` absent means all ports;
/// equal values mean a single port; both set means an inclusive range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// unique identifier.
    pub id: ResourceId,

    /// display name.
    pub name: String,

    /// resource type.
    pub resource_type: ResourceType,

    /// network address (hostname, ip, or host:port).
    pub address: String,

    /// transport protocol.
    pub protocol: Protocol,

    /// start of the allowed port range, when restricted.
    pub port_from: Option<u16>,

    /// end of the allowed port range, when restricted.
    pub port_to: Option<u16>,

    /// optional browser alias.
    pub alias: Option<String>,

    /// owning remote network. None when the network was deleted and the
    /// resource was detached rather than removed.
    pub remote_network_id: Option<RemoteNetworkId>,
}

impl Resource {
    /// create a standard tcp resource on all ports, attached to a network.
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        address: impl Into<String>,
        remote_network_id: RemoteNetworkId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            resource_type: ResourceType::Standard,
            address: address.into(),
            protocol: Protocol::Tcp,
            port_from: None,
            port_to: None,
            alias: None,
            remote_network_id: Some(remote_network_id),
        }
    }

    /// restrict the resource to a single port, consuming self.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port_from = Some(port);
        self.port_to = Some(port);
        self
    }

    /// restrict the resource to an inclusive port range, consuming self.
    pub fn with_port_range(mut self, from: u16, to: u16) -> Self {
        self.port_from = Some(from);
        self.port_to = Some(to);
        self
    }
}
