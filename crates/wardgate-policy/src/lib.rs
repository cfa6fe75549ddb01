//! policy compilation engine for wardgate.
//!
//! given the current state of groups, memberships, resources, and access
//! rules, this crate deterministically derives the set of network
//! resources a connector must enforce and the certificate identities
//! allowed to reach each one, versions that derivation, and answers the
//! cheap "is my policy stale?" poll without recompiling.
//!
//! components, leaf-first:
//! - [`IdentityResolver`]: group -> set of certificate identities
//! - [`RuleEvaluator`]: resource -> union of identities over enabled rules
//! - [`PolicyCompiler`]: per-connector snapshot assembly, hashing, and
//!   version ledger maintenance; also the staleness check
//!
//! compilation is fail-closed: a resource with no allowed identities is
//! retained in the snapshot with an empty list, so connectors block
//! traffic to it instead of passing it by omission.

#![warn(missing_docs)]

mod compiler;
mod error;
mod evaluator;
mod hash;
mod resolver;
mod snapshot;

pub use compiler::{PolicyCompiler, Staleness};
pub use error::{Error, Result};
pub use evaluator::RuleEvaluator;
pub use hash::{POLICY_HASH_LEN, PolicyHash};
pub use resolver::IdentityResolver;
pub use snapshot::{PolicySnapshot, ResourcePolicy, canonical_policy_bytes};
