//! group types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// unique identifier for a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    /// the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a named collection of users.
///
/// groups do not own users or resources directly; membership and access
/// are separate join relations maintained by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// unique identifier.
    pub id: GroupId,

    /// group name.
    pub name: String,

    /// free-form description.
    pub description: String,

    /// when the group was created.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// create a new group.
    pub fn new(id: GroupId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
