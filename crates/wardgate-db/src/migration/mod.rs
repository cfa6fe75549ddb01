//! database migrations for wardgate.

pub use sea_orm_migration::prelude::*;

mod m20260829_000001_create_users;
mod m20260829_000002_create_groups;
mod m20260829_000003_create_group_members;
mod m20260829_000004_create_remote_networks;
mod m20260829_000005_create_connectors;
mod m20260829_000006_create_resources;
mod m20260829_000007_create_access_rules;
mod m20260829_000008_create_access_rule_groups;
mod m20260829_000009_create_policy_versions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_create_users::Migration),
            Box::new(m20260829_000002_create_groups::Migration),
            Box::new(m20260829_000003_create_group_members::Migration),
            Box::new(m20260829_000004_create_remote_networks::Migration),
            Box::new(m20260829_000005_create_connectors::Migration),
            Box::new(m20260829_000006_create_resources::Migration),
            Box::new(m20260829_000007_create_access_rules::Migration),
            Box::new(m20260829_000008_create_access_rule_groups::Migration),
            Box::new(m20260829_000009_create_policy_versions::Migration),
        ]
    }
}
