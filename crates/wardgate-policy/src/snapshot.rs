//! compiled policy snapshot wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wardgate_types::{CertificateIdentity, ConnectorId, Protocol, ResourceId};

use crate::hash::PolicyHash;

/// one resource's entry in a compiled snapshot.
///
/// `allowed_identities` is sorted ascending. an empty list is a valid,
/// intentional deny-all for the resource - the entry is retained so the
/// connector fails closed instead of passing traffic by omission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePolicy {
    /// the resource this entry enforces.
    pub resource_id: ResourceId,

    /// network address to enforce at.
    pub address: String,

    /// transport protocol.
    pub protocol: Protocol,

    /// start of the allowed port range; null with `port_to` null means
    /// all ports.
    pub port_from: Option<u16>,

    /// end of the allowed port range.
    pub port_to: Option<u16>,

    /// certificate identities allowed to reach this resource, sorted
    /// ascending.
    pub allowed_identities: Vec<CertificateIdentity>,
}

/// the immutable, versioned, hashed output of one compilation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySnapshot {
    /// the connector this snapshot was compiled for.
    pub connector_id: ConnectorId,

    /// ledger version of this snapshot's content.
    pub policy_version: i64,

    /// when this compile ran. not part of the hashed content.
    pub compiled_at: DateTime<Utc>,

    /// digest of the canonical resource entries.
    pub policy_hash: PolicyHash,

    /// resource entries, sorted ascending by resource id.
    pub resources: Vec<ResourcePolicy>,
}

/// serialise resource entries into the canonical byte form the policy
/// hash is computed over.
///
/// the entries must already be in canonical order (resources ascending by
/// id, identities ascending within each entry); this function only fixes
/// the encoding, it does not sort.
pub fn canonical_policy_bytes(resources: &[ResourcePolicy]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(resource_id: &str, identities: &[&str]) -> ResourcePolicy {
        ResourcePolicy {
            resource_id: ResourceId::from(resource_id),
            address: format!("{}.internal", resource_id),
            protocol: Protocol::Tcp,
            port_from: None,
            port_to: None,
            allowed_identities: identities
                .iter()
                .map(|i| CertificateIdentity::from(*i))
                .collect(),
        }
    }

    #[test]
    fn test_canonical_bytes_are_stable() {
        let entries = vec![entry("res_1", &["cert-a", "cert-b"])];
        let first = canonical_policy_bytes(&entries).unwrap();
        let second = canonical_policy_bytes(&entries).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_bytes_reflect_identity_changes() {
        let one = canonical_policy_bytes(&[entry("res_1", &["cert-a"])]).unwrap();
        let two = canonical_policy_bytes(&[entry("res_1", &["cert-a", "cert-b"])]).unwrap();
        assert_ne!(one, two);
    }

    #[test]
    fn test_empty_allowed_identities_serialize_as_empty_array() {
        let json = serde_json::to_value(&[entry("res_1", &[])]).unwrap();
        assert_eq!(json[0]["allowed_identities"], serde_json::json!([]));
        assert_eq!(json[0]["port_from"], serde_json::Value::Null);
    }
}
