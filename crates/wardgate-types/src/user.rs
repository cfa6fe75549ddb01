//! user types.
//!
//! users are the leaf identities of the access model. a user only
//! participates in compiled policy once an identity provider has issued
//! them a certificate identity; until then they exist for administration
//! but resolve to nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// the cryptographic principal a connector authorizes against.
///
/// derived from the certificate issued to a user; globally unique when
/// present. Compiled policy only ever refers to these, never to user ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CertificateIdentity(pub String);

impl CertificateIdentity {
    /// the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CertificateIdentity {
    fn from(identity: &str) -> Self {
        Self(identity.to_string())
    }
}

impl std::fmt::Display for CertificateIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// user lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// the user may sign in and appear in policy.
    Active,
    /// the user is suspended.
    Inactive,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(format!("unknown user status: {}", other)),
        }
    }
}

/// a wardgate user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// unique identifier.
    pub id: UserId,

    /// display name.
    pub name: String,

    /// email address.
    pub email: String,

    /// certificate identity, once issued. None for newly created or
    /// federated users that have not enrolled yet.
    pub certificate_identity: Option<CertificateIdentity>,

    /// lifecycle status.
    pub status: UserStatus,

    /// when the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// create an active user without a certificate identity.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            certificate_identity: None,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// set the certificate identity, consuming self.
    pub fn with_certificate_identity(mut self, identity: impl Into<String>) -> Self {
        self.certificate_identity = Some(CertificateIdentity(identity.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_identity_orders_lexicographically() {
        let mut identities = vec![
            CertificateIdentity::from("cert-c"),
            CertificateIdentity::from("cert-a"),
            CertificateIdentity::from("cert-b"),
        ];
        identities.sort();
        assert_eq!(identities[0].as_str(), "cert-a");
        assert_eq!(identities[2].as_str(), "cert-c");
    }

    #[test]
    fn test_user_status_round_trip() {
        assert_eq!("active".parse::<UserStatus>().unwrap(), UserStatus::Active);
        assert_eq!(UserStatus::Inactive.to_string(), "inactive");
        assert!("deleted".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_new_user_has_no_identity() {
        let user = User::new(UserId::from("usr_1"), "Alice", "alice@example.com");
        assert!(user.certificate_identity.is_none());
        assert_eq!(user.status, UserStatus::Active);
    }
}
