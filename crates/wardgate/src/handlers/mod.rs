//! http handlers for wardgate api endpoints.

mod error;
mod health;
mod heartbeat;
mod policy;

pub use error::{ApiError, OptionExt, ResultExt};
pub use health::health;
pub use heartbeat::{heartbeat, heartbeat_with_version};
pub use policy::compile_policy;
