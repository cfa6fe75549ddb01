//! user entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use tracing::warn;

use wardgate_types::{CertificateIdentity, User, UserId, UserStatus};

/// user database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    /// globally unique when present; absent until enrollment issues one.
    #[sea_orm(unique)]
    pub certificate_identity: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::group_member::Entity")]
    GroupMembers,
}

impl Related<super::group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        let status = match model.status.parse() {
            Ok(s) => s,
            Err(e) => {
                warn!(user_id = %model.id, error = %e, "unknown user status in store, treating as inactive");
                UserStatus::Inactive
            }
        };
        Self {
            id: UserId(model.id),
            name: model.name,
            email: model.email,
            certificate_identity: model.certificate_identity.map(CertificateIdentity),
            status,
            created_at: model.created_at,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id.0.clone()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            certificate_identity: Set(user
                .certificate_identity
                .as_ref()
                .map(|i| i.0.clone())),
            status: Set(user.status.to_string()),
            created_at: Set(user.created_at),
        }
    }
}
