//! the policy compiler and staleness check.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use wardgate_db::{Database, PolicyVersionRecord};
use wardgate_types::ConnectorId;

use crate::error::{Error, Result};
use crate::evaluator::RuleEvaluator;
use crate::hash::PolicyHash;
use crate::snapshot::{PolicySnapshot, ResourcePolicy, canonical_policy_bytes};

/// result of the poll-time staleness check.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Staleness {
    /// whether the connector's reported version is behind the ledger.
    pub update_available: bool,
    /// the ledger's current version for the connector (0 before any
    /// compile).
    pub current_version: i64,
}

/// compiles per-connector policy snapshots and maintains the version
/// ledger.
///
/// compilation is demand-driven: heartbeat traffic goes through the
/// cheap [`check_staleness`](Self::check_staleness) path and never
/// triggers a recompile. Concurrent compiles for the same connector are
/// serialised on a per-connector mutex so interleavings converge to the
/// same ledger state; compiles for different connectors run
/// independently.
pub struct PolicyCompiler<D> {
    db: D,
    evaluator: RuleEvaluator<D>,
    locks: Arc<Mutex<HashMap<ConnectorId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl<D: Database + Clone> PolicyCompiler<D> {
    /// create a compiler over the given store.
    pub fn new(db: D) -> Self {
        let evaluator = RuleEvaluator::new(db.clone());
        Self {
            db,
            evaluator,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// get or create the serialisation lock for a connector.
    fn connector_lock(&self, connector_id: &ConnectorId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("connector lock map poisoned");
        locks
            .entry(connector_id.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// compile the policy snapshot for a connector.
    ///
    /// steps run in fixed order for hash determinism: resources are
    /// scanned ascending by id, each entry's identities are sorted, and
    /// the hash covers only the canonical entry list. the ledger version
    /// advances only when the hash changes; recompiling identical state
    /// refreshes `compiled_at` but bumps nothing.
    pub async fn compile(&self, connector_id: &ConnectorId) -> Result<PolicySnapshot> {
        let lock = self.connector_lock(connector_id);
        let _guard = lock.lock().await;

        let connector = self
            .db
            .get_connector(connector_id)
            .await?
            .ok_or_else(|| Error::ConnectorNotFound(connector_id.clone()))?;

        let resources = self
            .db
            .list_resources_for_network(&connector.remote_network_id)
            .await?;

        let mut entries = Vec::with_capacity(resources.len());
        for resource in resources {
            let identities = self.evaluator.allowed_identities(&resource.id).await?;
            // a resource with no allowed identities stays in the
            // snapshot with an empty list: connectors must fail closed,
            // not pass traffic because the resource was omitted
            entries.push(ResourcePolicy {
                resource_id: resource.id,
                address: resource.address,
                protocol: resource.protocol,
                port_from: resource.port_from,
                port_to: resource.port_to,
                allowed_identities: identities.into_iter().collect(),
            });
        }

        let hash = PolicyHash::digest(&canonical_policy_bytes(&entries)?);
        let hash_hex = hash.to_string();

        let stored = self.db.get_policy_version(connector_id).await?;
        let (version, changed) = match &stored {
            Some(record) if record.policy_hash == hash_hex => (record.version, false),
            Some(record) => (record.version + 1, true),
            None => (1, true),
        };

        let compiled_at = Utc::now();
        self.db
            .upsert_policy_version(&PolicyVersionRecord {
                connector_id: connector_id.clone(),
                version,
                policy_hash: hash_hex,
                compiled_at,
            })
            .await?;

        if changed {
            info!(
                connector_id = %connector_id,
                version,
                hash = %hash,
                resources = entries.len(),
                "policy version advanced"
            );
        } else {
            debug!(connector_id = %connector_id, version, "policy unchanged, version kept");
        }

        Ok(PolicySnapshot {
            connector_id: connector_id.clone(),
            policy_version: version,
            compiled_at,
            policy_hash: hash,
            resources: entries,
        })
    }

    /// check whether a connector's self-reported policy version is
    /// behind the ledger.
    ///
    /// pure read: never compiles, never touches the ledger. kept as a
    /// distinct entry point so high-frequency heartbeats cannot force
    /// recompute storms.
    pub async fn check_staleness(
        &self,
        connector_id: &ConnectorId,
        reported_version: i64,
    ) -> Result<Staleness> {
        if self.db.get_connector(connector_id).await?.is_none() {
            return Err(Error::ConnectorNotFound(connector_id.clone()));
        }

        let current_version = self
            .db
            .get_policy_version(connector_id)
            .await?
            .map(|record| record.version)
            .unwrap_or(0);

        Ok(Staleness {
            update_available: reported_version < current_version,
            current_version,
        })
    }
}

impl<D: Database + Clone> Clone for PolicyCompiler<D> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            evaluator: RuleEvaluator::new(self.db.clone()),
            locks: Arc::clone(&self.locks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardgate_db::WardgateDb;
    use wardgate_types::{
        AccessRule, AccessRuleId, Connector, Group, GroupId, RemoteNetwork, RemoteNetworkId,
        Resource, ResourceId, User, UserId,
    };

    struct Fixture {
        db: WardgateDb,
        connector_id: ConnectorId,
        rule_id: AccessRuleId,
        group_id: GroupId,
        user_id: UserId,
    }

    /// one network with one connector and one resource, guarded by an
    /// enabled rule binding a group with one enrolled and one unenrolled
    /// member.
    async fn fixture() -> Fixture {
        let db = WardgateDb::new_in_memory().await.unwrap();

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();
        let connector = Connector::new(
            ConnectorId::from("con_1"),
            "conn",
            "host-1",
            network.id.clone(),
        );
        db.create_connector(&connector).await.unwrap();

        let resource = Resource::new(
            ResourceId::from("res_1"),
            "db",
            "db.internal:5432",
            network.id.clone(),
        )
        .with_port(5432);
        db.create_resource(&resource).await.unwrap();

        let group = Group::new(GroupId::from("grp_1"), "Engineering", "eng");
        db.create_group(&group).await.unwrap();
        let enrolled = User::new(UserId::from("usr_1"), "Alice", "alice@example.com")
            .with_certificate_identity("cert-u1");
        let unenrolled = User::new(UserId::from("usr_2"), "Bob", "bob@example.com");
        db.create_user(&enrolled).await.unwrap();
        db.create_user(&unenrolled).await.unwrap();
        db.add_group_member(&group.id, &enrolled.id).await.unwrap();
        db.add_group_member(&group.id, &unenrolled.id).await.unwrap();

        let rule = AccessRule::new(AccessRuleId::from("rule_1"), "db access", resource.id.clone());
        db.create_access_rule(&rule).await.unwrap();
        db.bind_rule_group(&rule.id, &group.id).await.unwrap();

        Fixture {
            db,
            connector_id: connector.id,
            rule_id: rule.id,
            group_id: group.id,
            user_id: enrolled.id,
        }
    }

    #[tokio::test]
    async fn test_compile_example_scenario() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let snapshot = compiler.compile(&fx.connector_id).await.unwrap();
        assert_eq!(snapshot.policy_version, 1);
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.resources[0].resource_id.as_str(), "res_1");
        let identities: Vec<&str> = snapshot.resources[0]
            .allowed_identities
            .iter()
            .map(|i| i.as_str())
            .collect();
        // u2 has no certificate and is absent
        assert_eq!(identities, vec!["cert-u1"]);

        // removing u1 from the group fails the resource closed and
        // advances the version
        fx.db
            .remove_group_member(&fx.group_id, &fx.user_id)
            .await
            .unwrap();
        let snapshot = compiler.compile(&fx.connector_id).await.unwrap();
        assert_eq!(snapshot.policy_version, 2);
        assert_eq!(snapshot.resources.len(), 1);
        assert!(snapshot.resources[0].allowed_identities.is_empty());
    }

    #[tokio::test]
    async fn test_compile_is_deterministic() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let first = compiler.compile(&fx.connector_id).await.unwrap();
        let second = compiler.compile(&fx.connector_id).await.unwrap();

        assert_eq!(first.policy_hash, second.policy_hash);
        assert_eq!(first.resources, second.resources);
        // recompiling identical state is a versioning no-op
        assert_eq!(first.policy_version, second.policy_version);
    }

    #[tokio::test]
    async fn test_missing_connector_is_a_client_error() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let err = compiler
            .compile(&ConnectorId::from("con_404"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConnectorNotFound(_)));

        // no ledger entry was created as a side effect
        assert!(
            fx.db
                .get_policy_version(&ConnectorId::from("con_404"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_resource_with_no_rules_is_retained_empty() {
        let fx = fixture().await;

        let network_id = RemoteNetworkId::from("net_1");
        let bare = Resource::new(
            ResourceId::from("res_0"),
            "bare",
            "bare.internal",
            network_id,
        );
        fx.db.create_resource(&bare).await.unwrap();

        let compiler = PolicyCompiler::new(fx.db.clone());
        let snapshot = compiler.compile(&fx.connector_id).await.unwrap();

        // res_0 sorts first and is present with an empty allow list
        assert_eq!(snapshot.resources.len(), 2);
        assert_eq!(snapshot.resources[0].resource_id.as_str(), "res_0");
        assert!(snapshot.resources[0].allowed_identities.is_empty());
        assert_eq!(snapshot.resources[1].resource_id.as_str(), "res_1");
    }

    #[tokio::test]
    async fn test_hash_changes_only_with_policy_content() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let baseline = compiler.compile(&fx.connector_id).await.unwrap();

        // adding an identity to the allowed set changes the hash
        let carol = User::new(UserId::from("usr_3"), "Carol", "carol@example.com")
            .with_certificate_identity("cert-u3");
        fx.db.create_user(&carol).await.unwrap();
        fx.db.add_group_member(&fx.group_id, &carol.id).await.unwrap();

        let grown = compiler.compile(&fx.connector_id).await.unwrap();
        assert_ne!(baseline.policy_hash, grown.policy_hash);
        assert_eq!(grown.policy_version, baseline.policy_version + 1);

        // removing it again restores the original content hash
        fx.db
            .remove_group_member(&fx.group_id, &carol.id)
            .await
            .unwrap();
        let restored = compiler.compile(&fx.connector_id).await.unwrap();
        assert_eq!(restored.policy_hash, baseline.policy_hash);
        // but the version keeps moving forward, never back
        assert_eq!(restored.policy_version, grown.policy_version + 1);
    }

    #[tokio::test]
    async fn test_disabling_a_rule_removes_its_identities() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let before = compiler.compile(&fx.connector_id).await.unwrap();
        assert_eq!(before.resources[0].allowed_identities.len(), 1);

        fx.db
            .set_access_rule_enabled(&fx.rule_id, false)
            .await
            .unwrap();

        let after = compiler.compile(&fx.connector_id).await.unwrap();
        assert!(after.resources[0].allowed_identities.is_empty());
        assert_eq!(after.policy_version, before.policy_version + 1);
        // the rule record still exists, merely disabled
        fx.db
            .set_access_rule_enabled(&fx.rule_id, true)
            .await
            .unwrap();
        let restored = compiler.compile(&fx.connector_id).await.unwrap();
        assert_eq!(restored.policy_hash, before.policy_hash);
    }

    #[tokio::test]
    async fn test_staleness_check_is_pure() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        // before any compile: version 0, nothing to fetch
        let staleness = compiler
            .check_staleness(&fx.connector_id, 0)
            .await
            .unwrap();
        assert!(!staleness.update_available);
        assert_eq!(staleness.current_version, 0);
        // the check did not create a ledger entry
        assert!(
            fx.db
                .get_policy_version(&fx.connector_id)
                .await
                .unwrap()
                .is_none()
        );

        let snapshot = compiler.compile(&fx.connector_id).await.unwrap();

        let staleness = compiler
            .check_staleness(&fx.connector_id, 0)
            .await
            .unwrap();
        assert!(staleness.update_available);
        assert_eq!(staleness.current_version, snapshot.policy_version);

        let staleness = compiler
            .check_staleness(&fx.connector_id, snapshot.policy_version)
            .await
            .unwrap();
        assert!(!staleness.update_available);

        // repeated checks leave version and hash untouched
        let stored = fx
            .db
            .get_policy_version(&fx.connector_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version, snapshot.policy_version);
        assert_eq!(stored.policy_hash, snapshot.policy_hash.to_string());

        let err = compiler
            .check_staleness(&ConnectorId::from("con_404"), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConnectorNotFound(_)));
    }

    #[tokio::test]
    async fn test_hash_ignores_store_insert_order() {
        // two stores with the same content inserted in different orders
        // compile to the same hash
        async fn build(ids: &[&str]) -> (WardgateDb, ConnectorId) {
            let db = WardgateDb::new_in_memory().await.unwrap();
            let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
            db.create_remote_network(&network).await.unwrap();
            let connector = Connector::new(
                ConnectorId::from("con_1"),
                "conn",
                "host-1",
                network.id.clone(),
            );
            db.create_connector(&connector).await.unwrap();
            for id in ids {
                let resource =
                    Resource::new(ResourceId::from(*id), *id, "addr.internal", network.id.clone());
                db.create_resource(&resource).await.unwrap();
            }
            (db, connector.id)
        }

        let (db_a, conn_a) = build(&["res_1", "res_2", "res_3"]).await;
        let (db_b, conn_b) = build(&["res_3", "res_1", "res_2"]).await;

        let a = PolicyCompiler::new(db_a).compile(&conn_a).await.unwrap();
        let b = PolicyCompiler::new(db_b).compile(&conn_b).await.unwrap();

        assert_eq!(a.policy_hash, b.policy_hash);
        let ids: Vec<&str> = a.resources.iter().map(|r| r.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["res_1", "res_2", "res_3"]);
    }

    #[tokio::test]
    async fn test_concurrent_compiles_converge() {
        let fx = fixture().await;
        let compiler = PolicyCompiler::new(fx.db.clone());

        let (a, b) = tokio::join!(
            compiler.compile(&fx.connector_id),
            compiler.compile(&fx.connector_id)
        );
        let a = a.unwrap();
        let b = b.unwrap();

        // identical state: both observe the same hash, and the second
        // compile does not bump past the first
        assert_eq!(a.policy_hash, b.policy_hash);
        assert_eq!(a.policy_version, 1);
        assert_eq!(b.policy_version, 1);

        let stored = fx
            .db
            .get_policy_version(&fx.connector_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version, 1);
    }
}
