//! demo data seeding for local development.

use tracing::info;

use wardgate_types::{
    AccessRule, AccessRuleId, Connector, ConnectorId, Group, GroupId, RemoteNetwork,
    RemoteNetworkId, Resource, ResourceId, ResourceType, User, UserId,
};

use crate::{Database, Result};

/// populate an empty database with a small demo tenant: two networks with
/// connectors, a handful of users and groups, and a couple of access
/// rules. no-op if the demo network already exists.
pub async fn seed_demo_data<D: Database>(db: &D) -> Result<()> {
    if db
        .get_remote_network(&RemoteNetworkId::from("net_1"))
        .await?
        .is_some()
    {
        return Ok(());
    }

    info!("seeding demo data");

    let prod = RemoteNetwork::new(RemoteNetworkId::from("net_1"), "Production AWS", "AWS");
    let office = RemoteNetwork::new(RemoteNetworkId::from("net_2"), "Office LAN", "ON_PREM");
    db.create_remote_network(&prod).await?;
    db.create_remote_network(&office).await?;

    db.create_connector(&Connector::new(
        ConnectorId::from("con_1"),
        "AWS-Prod-Connector-1",
        "ip-172-31-0-1.ec2.internal",
        prod.id.clone(),
    ))
    .await?;
    db.create_connector(&Connector::new(
        ConnectorId::from("con_2"),
        "Office-Connector-1",
        "office-server.local",
        office.id.clone(),
    ))
    .await?;

    let alice = User::new(UserId::from("usr_1"), "Alice Johnson", "alice@company.com")
        .with_certificate_identity("identity-usr_1");
    let bob = User::new(UserId::from("usr_2"), "Bob Smith", "bob@company.com")
        .with_certificate_identity("identity-usr_2");
    // charlie has not enrolled yet: no certificate identity, so he never
    // appears in compiled policy
    let charlie = User::new(UserId::from("usr_3"), "Charlie Davis", "charlie@company.com");
    db.create_user(&alice).await?;
    db.create_user(&bob).await?;
    db.create_user(&charlie).await?;

    let engineering = Group::new(
        GroupId::from("grp_1"),
        "Engineering",
        "Engineering team with database and API access",
    );
    let marketing = Group::new(GroupId::from("grp_2"), "Marketing", "Marketing department");
    db.create_group(&engineering).await?;
    db.create_group(&marketing).await?;
    db.add_group_member(&engineering.id, &alice.id).await?;
    db.add_group_member(&engineering.id, &charlie.id).await?;
    db.add_group_member(&marketing.id, &bob.id).await?;

    let database = Resource::new(
        ResourceId::from("res_1"),
        "Database Server",
        "db.internal.company.com",
        prod.id.clone(),
    )
    .with_port(5432);
    let mut api = Resource::new(
        ResourceId::from("res_2"),
        "API Gateway",
        "api.company.com",
        prod.id.clone(),
    )
    .with_port(443);
    api.resource_type = ResourceType::Browser;
    let wiki = Resource::new(
        ResourceId::from("res_3"),
        "Internal Wiki",
        "wiki.internal.company.com",
        office.id.clone(),
    );
    db.create_resource(&database).await?;
    db.create_resource(&api).await?;
    db.create_resource(&wiki).await?;

    let db_rule = AccessRule::new(
        AccessRuleId::from("rule_1"),
        "Engineering DB Access",
        database.id.clone(),
    );
    let api_rule = AccessRule::new(
        AccessRuleId::from("rule_2"),
        "Engineering API Access",
        api.id.clone(),
    );
    db.create_access_rule(&db_rule).await?;
    db.create_access_rule(&api_rule).await?;
    db.bind_rule_group(&db_rule.id, &engineering.id).await?;
    db.bind_rule_group(&api_rule.id, &engineering.id).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WardgateDb;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = WardgateDb::new_in_memory().await.unwrap();
        seed_demo_data(&db).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        assert_eq!(db.list_users().await.unwrap().len(), 3);
        let resources = db
            .list_resources_for_network(&RemoteNetworkId::from("net_1"))
            .await
            .unwrap();
        assert_eq!(resources.len(), 2);
    }
}
