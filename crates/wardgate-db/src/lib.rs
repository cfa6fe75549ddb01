//! database layer for wardgate.
//!
//! this crate provides persistent storage for:
//! - Users, groups, and group memberships
//! - Remote networks and their connectors
//! - Resources and access rules with group bindings
//! - The per-connector policy version ledger
//!
//! the policy compiler receives a [`Database`] handle at construction;
//! there is no global connection state.

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;
mod seed;

pub use error::Error;
pub use seed::seed_demo_data;

use std::future::Future;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database as SeaOrmDatabase, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use wardgate_types::{
    AccessRule, AccessRuleId, Config, Connector, ConnectorId, Group, GroupId, RemoteNetwork,
    RemoteNetworkId, Resource, ResourceId, User, UserId,
};

/// per-connector policy version ledger entry.
///
/// one entry per connector, created by the first compile and updated in
/// place thereafter. `version` never decreases while the connector exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyVersionRecord {
    /// the connector this entry versions.
    pub connector_id: ConnectorId,
    /// latest compiled version (0 before any compile).
    pub version: i64,
    /// hex digest of the canonical policy content at this version.
    pub policy_hash: String,
    /// when the latest compile ran.
    pub compiled_at: DateTime<Utc>,
}

impl From<entity::policy_version::Model> for PolicyVersionRecord {
    fn from(model: entity::policy_version::Model) -> Self {
        Self {
            connector_id: ConnectorId(model.connector_id),
            version: model.version,
            policy_hash: model.policy_hash,
            compiled_at: model.compiled_at,
        }
    }
}

impl From<&PolicyVersionRecord> for entity::policy_version::ActiveModel {
    fn from(record: &PolicyVersionRecord) -> Self {
        Self {
            connector_id: Set(record.connector_id.0.clone()),
            version: Set(record.version),
            policy_hash: Set(record.policy_hash.clone()),
            compiled_at: Set(record.compiled_at),
        }
    }
}

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// the storage interface consumed by the policy compiler and the server.
///
/// implemented by [`WardgateDb`]; taken by generic parameter so tests can
/// run against an in-memory sqlite database.
pub trait Database: Send + Sync {
    /// check database connectivity.
    ///
    /// returns `ok(())` if the database is reachable, `err` otherwise.
    /// used for health checks with a recommended timeout of 1 second.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── User Operations ─────────────────────────────────────────────────────

    /// create a new user.
    fn create_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// get a user by id. returns `none` if not found.
    fn get_user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// list all users.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;

    // ─── Group Operations ────────────────────────────────────────────────────

    /// create a new group.
    fn create_group(&self, group: &Group) -> impl Future<Output = Result<Group>> + Send;

    /// get a group by id. returns `none` if not found.
    fn get_group(&self, id: &GroupId) -> impl Future<Output = Result<Option<Group>>> + Send;

    /// delete a group. memberships cascade; rule bindings may be left
    /// orphaned and are tolerated by the policy resolver.
    fn delete_group(&self, id: &GroupId) -> impl Future<Output = Result<()>> + Send;

    /// add a user to a group. idempotence is the caller's concern.
    fn add_group_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// remove a user from a group.
    fn remove_group_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// list the members of a group. a missing group yields an empty list.
    fn list_group_members(
        &self,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<Vec<User>>> + Send;

    // ─── Remote Network Operations ───────────────────────────────────────────

    /// create a new remote network.
    fn create_remote_network(
        &self,
        network: &RemoteNetwork,
    ) -> impl Future<Output = Result<RemoteNetwork>> + Send;

    /// get a remote network by id. returns `none` if not found.
    fn get_remote_network(
        &self,
        id: &RemoteNetworkId,
    ) -> impl Future<Output = Result<Option<RemoteNetwork>>> + Send;

    /// delete a remote network. its resources are detached (network id
    /// set to null), not deleted; its connectors cascade.
    fn delete_remote_network(&self, id: &RemoteNetworkId)
    -> impl Future<Output = Result<()>> + Send;

    // ─── Connector Operations ────────────────────────────────────────────────

    /// register a new connector.
    fn create_connector(
        &self,
        connector: &Connector,
    ) -> impl Future<Output = Result<Connector>> + Send;

    /// get a connector by id. returns `none` if not found.
    fn get_connector(
        &self,
        id: &ConnectorId,
    ) -> impl Future<Output = Result<Option<Connector>>> + Send;

    /// update a connector's `last_seen_at` (heartbeat).
    fn touch_connector(
        &self,
        id: &ConnectorId,
        seen_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// record the policy version a connector reports having applied,
    /// also refreshing `last_seen_at`.
    fn set_connector_reported_version(
        &self,
        id: &ConnectorId,
        version: i64,
        seen_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<()>> + Send;

    // ─── Resource Operations ─────────────────────────────────────────────────

    /// create a new resource.
    fn create_resource(&self, resource: &Resource)
    -> impl Future<Output = Result<Resource>> + Send;

    /// get a resource by id. returns `none` if not found.
    fn get_resource(&self, id: &ResourceId)
    -> impl Future<Output = Result<Option<Resource>>> + Send;

    /// list a network's resources, sorted ascending by resource id.
    ///
    /// the order is part of the policy compiler's determinism contract.
    fn list_resources_for_network(
        &self,
        network_id: &RemoteNetworkId,
    ) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    // ─── Access Rule Operations ──────────────────────────────────────────────

    /// create a new access rule.
    fn create_access_rule(
        &self,
        rule: &AccessRule,
    ) -> impl Future<Output = Result<AccessRule>> + Send;

    /// enable or disable a rule without deleting it.
    fn set_access_rule_enabled(
        &self,
        id: &AccessRuleId,
        enabled: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    /// list the enabled rules protecting a resource.
    fn list_enabled_access_rules(
        &self,
        resource_id: &ResourceId,
    ) -> impl Future<Output = Result<Vec<AccessRule>>> + Send;

    /// bind a group to a rule.
    fn bind_rule_group(
        &self,
        rule_id: &AccessRuleId,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// list the groups bound to a rule.
    fn list_rule_group_ids(
        &self,
        rule_id: &AccessRuleId,
    ) -> impl Future<Output = Result<Vec<GroupId>>> + Send;

    // ─── Policy Version Ledger ───────────────────────────────────────────────

    /// get the ledger entry for a connector, or `none` before the first
    /// compile.
    fn get_policy_version(
        &self,
        connector_id: &ConnectorId,
    ) -> impl Future<Output = Result<Option<PolicyVersionRecord>>> + Send;

    /// create or update the ledger entry for a connector.
    ///
    /// the write is transactional: version, hash, and timestamp land
    /// together or not at all.
    fn upsert_policy_version(
        &self,
        record: &PolicyVersionRecord,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct WardgateDb {
    conn: DatabaseConnection,
}

impl WardgateDb {
    /// create a new database connection from config.
    ///
    /// callers run [`migrate`](Self::migrate) before first use.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        // enable WAL mode for sqlite if configured
        if config.database.db_type == "sqlite" && config.database.write_ahead_log {
            db.enable_wal_mode().await?;
        }

        Ok(db)
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// WAL mode allows concurrent reads during writes. must be called
    /// before any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &wardgate_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidData(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }
}

impl Database for WardgateDb {
    // health check

    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    // user operations

    async fn create_user(&self, user: &User) -> Result<User> {
        let model: entity::user::ActiveModel = user.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let result = entity::user::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let results = entity::user::Entity::find().all(&self.conn).await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // group operations

    async fn create_group(&self, group: &Group) -> Result<Group> {
        let model: entity::group::ActiveModel = group.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_group(&self, id: &GroupId) -> Result<Option<Group>> {
        let result = entity::group::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn delete_group(&self, id: &GroupId) -> Result<()> {
        // memberships cascade via fk; rule bindings have no group-side fk
        // and may be left orphaned on purpose
        entity::group::Entity::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn add_group_member(&self, group_id: &GroupId, user_id: &UserId) -> Result<()> {
        let model = entity::group_member::ActiveModel {
            group_id: Set(group_id.0.clone()),
            user_id: Set(user_id.0.clone()),
        };
        model.insert(&self.conn).await?;
        Ok(())
    }

    async fn remove_group_member(&self, group_id: &GroupId, user_id: &UserId) -> Result<()> {
        entity::group_member::Entity::delete_many()
            .filter(entity::group_member::Column::GroupId.eq(group_id.as_str()))
            .filter(entity::group_member::Column::UserId.eq(user_id.as_str()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_group_members(&self, group_id: &GroupId) -> Result<Vec<User>> {
        let results = entity::user::Entity::find()
            .inner_join(entity::group_member::Entity)
            .filter(entity::group_member::Column::GroupId.eq(group_id.as_str()))
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // remote network operations

    async fn create_remote_network(&self, network: &RemoteNetwork) -> Result<RemoteNetwork> {
        let model: entity::remote_network::ActiveModel = network.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_remote_network(&self, id: &RemoteNetworkId) -> Result<Option<RemoteNetwork>> {
        let result = entity::remote_network::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn delete_remote_network(&self, id: &RemoteNetworkId) -> Result<()> {
        entity::remote_network::Entity::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // connector operations

    async fn create_connector(&self, connector: &Connector) -> Result<Connector> {
        let model: entity::connector::ActiveModel = connector.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_connector(&self, id: &ConnectorId) -> Result<Option<Connector>> {
        let result = entity::connector::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn touch_connector(&self, id: &ConnectorId, seen_at: DateTime<Utc>) -> Result<()> {
        entity::connector::Entity::update_many()
            .col_expr(
                entity::connector::Column::LastSeenAt,
                sea_orm::sea_query::Expr::value(seen_at),
            )
            .filter(entity::connector::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn set_connector_reported_version(
        &self,
        id: &ConnectorId,
        version: i64,
        seen_at: DateTime<Utc>,
    ) -> Result<()> {
        entity::connector::Entity::update_many()
            .col_expr(
                entity::connector::Column::LastPolicyVersion,
                sea_orm::sea_query::Expr::value(version),
            )
            .col_expr(
                entity::connector::Column::LastSeenAt,
                sea_orm::sea_query::Expr::value(seen_at),
            )
            .filter(entity::connector::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // resource operations

    async fn create_resource(&self, resource: &Resource) -> Result<Resource> {
        let model: entity::resource::ActiveModel = resource.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_resource(&self, id: &ResourceId) -> Result<Option<Resource>> {
        let result = entity::resource::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_resources_for_network(
        &self,
        network_id: &RemoteNetworkId,
    ) -> Result<Vec<Resource>> {
        let results = entity::resource::Entity::find()
            .filter(entity::resource::Column::RemoteNetworkId.eq(network_id.as_str()))
            .order_by_asc(entity::resource::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // access rule operations

    async fn create_access_rule(&self, rule: &AccessRule) -> Result<AccessRule> {
        let model: entity::access_rule::ActiveModel = rule.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn set_access_rule_enabled(&self, id: &AccessRuleId, enabled: bool) -> Result<()> {
        entity::access_rule::Entity::update_many()
            .col_expr(
                entity::access_rule::Column::Enabled,
                sea_orm::sea_query::Expr::value(enabled),
            )
            .col_expr(
                entity::access_rule::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::access_rule::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_enabled_access_rules(&self, resource_id: &ResourceId) -> Result<Vec<AccessRule>> {
        let results = entity::access_rule::Entity::find()
            .filter(entity::access_rule::Column::ResourceId.eq(resource_id.as_str()))
            .filter(entity::access_rule::Column::Enabled.eq(true))
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn bind_rule_group(&self, rule_id: &AccessRuleId, group_id: &GroupId) -> Result<()> {
        let model = entity::access_rule_group::ActiveModel {
            rule_id: Set(rule_id.0.clone()),
            group_id: Set(group_id.0.clone()),
        };
        model.insert(&self.conn).await?;
        Ok(())
    }

    async fn list_rule_group_ids(&self, rule_id: &AccessRuleId) -> Result<Vec<GroupId>> {
        let results = entity::access_rule_group::Entity::find()
            .filter(entity::access_rule_group::Column::RuleId.eq(rule_id.as_str()))
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(|m| GroupId(m.group_id)).collect())
    }

    // policy version ledger

    async fn get_policy_version(
        &self,
        connector_id: &ConnectorId,
    ) -> Result<Option<PolicyVersionRecord>> {
        let result = entity::policy_version::Entity::find_by_id(connector_id.as_str())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn upsert_policy_version(&self, record: &PolicyVersionRecord) -> Result<()> {
        // insert-or-update in one transaction so a failed write leaves
        // the prior entry intact
        let txn = self.conn.begin().await?;

        let existing = entity::policy_version::Entity::find_by_id(record.connector_id.as_str())
            .one(&txn)
            .await?;

        let model: entity::policy_version::ActiveModel = record.into();
        if existing.is_some() {
            model.update(&txn).await?;
        } else {
            model.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardgate_types::Resource;

    async fn test_db() -> WardgateDb {
        WardgateDb::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_user_crud() {
        let db = test_db().await;

        let user = User::new(UserId::from("usr_1"), "Alice", "alice@example.com")
            .with_certificate_identity("cert-usr_1");
        db.create_user(&user).await.unwrap();

        let fetched = db.get_user(&UserId::from("usr_1")).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Alice");
        assert_eq!(
            fetched.certificate_identity.unwrap().as_str(),
            "cert-usr_1"
        );

        assert!(db.get_user(&UserId::from("usr_404")).await.unwrap().is_none());
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_group_membership() {
        let db = test_db().await;

        let alice = User::new(UserId::from("usr_1"), "Alice", "alice@example.com");
        let bob = User::new(UserId::from("usr_2"), "Bob", "bob@example.com");
        db.create_user(&alice).await.unwrap();
        db.create_user(&bob).await.unwrap();

        let group = Group::new(GroupId::from("grp_1"), "Engineering", "eng team");
        db.create_group(&group).await.unwrap();
        db.add_group_member(&group.id, &alice.id).await.unwrap();
        db.add_group_member(&group.id, &bob.id).await.unwrap();

        let members = db.list_group_members(&group.id).await.unwrap();
        assert_eq!(members.len(), 2);

        db.remove_group_member(&group.id, &bob.id).await.unwrap();
        let members = db.list_group_members(&group.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, alice.id);

        // missing group yields an empty list, not an error
        let members = db.list_group_members(&GroupId::from("grp_404")).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_network_detaches_resources() {
        let db = test_db().await;

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();

        let resource = Resource::new(
            ResourceId::from("res_1"),
            "db",
            "db.internal:5432",
            network.id.clone(),
        );
        db.create_resource(&resource).await.unwrap();

        db.delete_remote_network(&network.id).await.unwrap();

        let detached = db.get_resource(&resource.id).await.unwrap().unwrap();
        assert!(detached.remote_network_id.is_none());
    }

    #[tokio::test]
    async fn test_resources_listed_in_ascending_id_order() {
        let db = test_db().await;

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();

        // insert out of order
        for id in ["res_3", "res_1", "res_2"] {
            let resource = Resource::new(
                ResourceId::from(id),
                id,
                "addr.internal",
                network.id.clone(),
            );
            db.create_resource(&resource).await.unwrap();
        }

        let resources = db.list_resources_for_network(&network.id).await.unwrap();
        let ids: Vec<&str> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["res_1", "res_2", "res_3"]);
    }

    #[tokio::test]
    async fn test_enabled_rule_filter() {
        let db = test_db().await;

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();
        let resource = Resource::new(
            ResourceId::from("res_1"),
            "db",
            "db.internal:5432",
            network.id.clone(),
        );
        db.create_resource(&resource).await.unwrap();

        let rule = AccessRule::new(AccessRuleId::from("rule_1"), "db access", resource.id.clone());
        db.create_access_rule(&rule).await.unwrap();

        assert_eq!(db.list_enabled_access_rules(&resource.id).await.unwrap().len(), 1);

        db.set_access_rule_enabled(&rule.id, false).await.unwrap();
        assert!(db.list_enabled_access_rules(&resource.id).await.unwrap().is_empty());

        // the rule record itself survives being disabled
        db.set_access_rule_enabled(&rule.id, true).await.unwrap();
        assert_eq!(db.list_enabled_access_rules(&resource.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_policy_version_upsert() {
        let db = test_db().await;

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();
        let connector = Connector::new(
            ConnectorId::from("con_1"),
            "conn",
            "host-1",
            network.id.clone(),
        );
        db.create_connector(&connector).await.unwrap();

        assert!(db.get_policy_version(&connector.id).await.unwrap().is_none());

        let record = PolicyVersionRecord {
            connector_id: connector.id.clone(),
            version: 1,
            policy_hash: "aa".repeat(32),
            compiled_at: Utc::now(),
        };
        db.upsert_policy_version(&record).await.unwrap();

        let stored = db.get_policy_version(&connector.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);

        // update in place, still one row
        let record = PolicyVersionRecord {
            version: 2,
            policy_hash: "bb".repeat(32),
            ..record
        };
        db.upsert_policy_version(&record).await.unwrap();
        let stored = db.get_policy_version(&connector.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.policy_hash, "bb".repeat(32));
    }

    #[tokio::test]
    async fn test_rule_group_bindings_survive_group_deletion() {
        let db = test_db().await;

        let network = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Prod", "AWS");
        db.create_remote_network(&network).await.unwrap();
        let resource = Resource::new(
            ResourceId::from("res_1"),
            "db",
            "db.internal:5432",
            network.id.clone(),
        );
        db.create_resource(&resource).await.unwrap();
        let rule = AccessRule::new(AccessRuleId::from("rule_1"), "db access", resource.id.clone());
        db.create_access_rule(&rule).await.unwrap();

        let group = Group::new(GroupId::from("grp_1"), "Engineering", "eng team");
        db.create_group(&group).await.unwrap();
        db.bind_rule_group(&rule.id, &group.id).await.unwrap();

        db.delete_group(&group.id).await.unwrap();

        // the binding is orphaned, not removed; the resolver treats the
        // missing group as contributing zero identities
        let bound = db.list_rule_group_ids(&rule.id).await.unwrap();
        assert_eq!(bound, vec![GroupId::from("grp_1")]);
        assert!(db.get_group(&group.id).await.unwrap().is_none());
    }
}
