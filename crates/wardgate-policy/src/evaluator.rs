//! rule evaluation - from a resource to its allowed identities.

use std::collections::BTreeSet;

use wardgate_db::Database;
use wardgate_types::{CertificateIdentity, ResourceId};

use crate::Result;
use crate::resolver::IdentityResolver;

/// evaluates which identities may reach a resource.
///
/// the access model is allow-list only: the union over all enabled rules'
/// bound groups is the complete answer, and there is no DENY effect to
/// reconcile. Disabled rules and rules bound to zero groups contribute
/// nothing. Identical store state yields an identical set on every call.
pub struct RuleEvaluator<D> {
    db: D,
    resolver: IdentityResolver<D>,
}

impl<D: Database + Clone> RuleEvaluator<D> {
    /// create an evaluator over the given store.
    pub fn new(db: D) -> Self {
        let resolver = IdentityResolver::new(db.clone());
        Self { db, resolver }
    }

    /// compute the set of certificate identities allowed to reach a
    /// resource via its enabled access rules.
    pub async fn allowed_identities(
        &self,
        resource_id: &ResourceId,
    ) -> Result<BTreeSet<CertificateIdentity>> {
        let mut identities = BTreeSet::new();

        for rule in self.db.list_enabled_access_rules(resource_id).await? {
            for group_id in self.db.list_rule_group_ids(&rule.id).await? {
                identities.extend(self.resolver.resolve_identities(&group_id).await?);
            }
        }

        Ok(identities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardgate_db::WardgateDb;
    use wardgate_types::{
        AccessRule, AccessRuleId, Group, GroupId, RemoteNetwork, RemoteNetworkId, Resource, User,
        UserId,
    };

    struct Fixture {
        db: WardgateDb,
        resource_id: ResourceId,
        rule_id: AccessRuleId,
        group_id: GroupId,
    }

    /// one resource with one enabled rule binding one group containing
    /// one enrolled user.
    async fn fixture() -> Fixture {
        let db = WardgateDb::new_in_memory().await.unwrap();

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();
        let resource = Resource::new(
            ResourceId::from("res_1"),
            "db",
            "db.internal:5432",
            network.id.clone(),
        );
        db.create_resource(&resource).await.unwrap();

        let group = Group::new(GroupId::from("grp_1"), "Engineering", "eng");
        db.create_group(&group).await.unwrap();
        let user = User::new(UserId::from("usr_1"), "Alice", "alice@example.com")
            .with_certificate_identity("cert-u1");
        db.create_user(&user).await.unwrap();
        db.add_group_member(&group.id, &user.id).await.unwrap();

        let rule = AccessRule::new(AccessRuleId::from("rule_1"), "db access", resource.id.clone());
        db.create_access_rule(&rule).await.unwrap();
        db.bind_rule_group(&rule.id, &group.id).await.unwrap();

        Fixture {
            db,
            resource_id: resource.id,
            rule_id: rule.id,
            group_id: group.id,
        }
    }

    #[tokio::test]
    async fn test_enabled_rule_admits_group_identities() {
        let fx = fixture().await;
        let evaluator = RuleEvaluator::new(fx.db.clone());

        let identities = evaluator.allowed_identities(&fx.resource_id).await.unwrap();
        assert_eq!(identities.len(), 1);
        assert!(identities.contains(&CertificateIdentity::from("cert-u1")));
    }

    #[tokio::test]
    async fn test_disabled_rule_contributes_nothing() {
        let fx = fixture().await;
        fx.db
            .set_access_rule_enabled(&fx.rule_id, false)
            .await
            .unwrap();

        let evaluator = RuleEvaluator::new(fx.db.clone());
        let identities = evaluator.allowed_identities(&fx.resource_id).await.unwrap();
        assert!(identities.is_empty());
    }

    #[tokio::test]
    async fn test_orphaned_binding_contributes_nothing() {
        let fx = fixture().await;
        // the group vanishes but its rule binding stays behind
        fx.db.delete_group(&fx.group_id).await.unwrap();

        let evaluator = RuleEvaluator::new(fx.db.clone());
        let identities = evaluator.allowed_identities(&fx.resource_id).await.unwrap();
        assert!(identities.is_empty());
    }

    #[tokio::test]
    async fn test_identities_union_across_rules() {
        let fx = fixture().await;

        let group = Group::new(GroupId::from("grp_2"), "Ops", "ops");
        fx.db.create_group(&group).await.unwrap();
        let user = User::new(UserId::from("usr_2"), "Bob", "bob@example.com")
            .with_certificate_identity("cert-u2");
        fx.db.create_user(&user).await.unwrap();
        fx.db.add_group_member(&group.id, &user.id).await.unwrap();

        let rule = AccessRule::new(
            AccessRuleId::from("rule_2"),
            "ops access",
            fx.resource_id.clone(),
        );
        fx.db.create_access_rule(&rule).await.unwrap();
        fx.db.bind_rule_group(&rule.id, &group.id).await.unwrap();

        let evaluator = RuleEvaluator::new(fx.db.clone());
        let identities = evaluator.allowed_identities(&fx.resource_id).await.unwrap();
        let identities: Vec<&str> = identities.iter().map(|i| i.as_str()).collect();
        assert_eq!(identities, vec!["cert-u1", "cert-u2"]);
    }
}
