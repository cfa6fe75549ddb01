//! database entity models for sea-orm.
//!
//! these entities map to database tables and convert to/from the
//! wardgate-types domain structs.

pub mod access_rule;
pub mod access_rule_group;
pub mod connector;
pub mod group;
pub mod group_member;
pub mod policy_version;
pub mod remote_network;
pub mod resource;
pub mod user;
