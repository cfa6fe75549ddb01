//! access rule types.
//!
//! the access model is group-only and allow-list-only: a rule names the
//! resource it protects and the groups it admits (via a join relation in
//! the store). There is no DENY effect; absence from the compiled allow
//! list is the only deny.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// unique identifier for an access rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRuleId(pub String);

impl AccessRuleId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccessRuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for AccessRuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// an access rule granting groups access to one resource.
///
/// disabled rules are retained for administration but excluded from
/// policy compilation entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRule {
    /// unique identifier.
    pub id: AccessRuleId,

    /// human-readable rule name.
    pub name: String,

    /// the resource this rule protects.
    pub resource_id: ResourceId,

    /// whether the rule participates in compilation.
    pub enabled: bool,

    /// when the rule was created.
    pub created_at: DateTime<Utc>,

    /// when the rule was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AccessRule {
    /// create an enabled rule for a resource.
    pub fn new(id: AccessRuleId, name: impl Into<String>, resource_id: ResourceId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            resource_id,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}
