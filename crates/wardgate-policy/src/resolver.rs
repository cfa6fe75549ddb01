//! identity resolution - from a group to its policy principals.

use std::collections::BTreeSet;

use wardgate_db::Database;
use wardgate_types::{CertificateIdentity, GroupId};

use crate::Result;

/// resolves a group to the certificate identities of its current members.
///
/// a user without an issued certificate cannot be a policy principal and
/// is silently skipped. A group that does not exist - including one left
/// behind by an orphaned rule binding - resolves to the empty set, never
/// an error: absence of identities is a normal, fail-closed state.
pub struct IdentityResolver<D> {
    db: D,
}

impl<D: Database> IdentityResolver<D> {
    /// create a resolver over the given store.
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// resolve a group to the set of certificate identities of its
    /// members. order-insensitive; callers sort before hashing.
    pub async fn resolve_identities(
        &self,
        group_id: &GroupId,
    ) -> Result<BTreeSet<CertificateIdentity>> {
        let members = self.db.list_group_members(group_id).await?;
        Ok(members
            .into_iter()
            .filter_map(|user| user.certificate_identity)
            .collect())
    }
}
