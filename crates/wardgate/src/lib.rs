//! wardgate library - HTTP handlers and application setup.
//!
//! this crate provides the http server and cli for the wardgate control
//! plane:
//! - [`handlers`]: http request handlers for the policy and heartbeat
//!   endpoints
//! - [`cli`]: command-line interface implementation

#![warn(missing_docs)]

/// cli subcommands.
pub mod cli;
/// http request handlers for policy and heartbeat endpoints.
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use wardgate_db::WardgateDb;
use wardgate_policy::PolicyCompiler;
use wardgate_types::Config;

/// shared state for all http handlers.
#[derive(Clone)]
pub struct AppState {
    /// database connection for persistent storage.
    pub db: WardgateDb,
    /// policy compiler and version ledger.
    pub compiler: PolicyCompiler<WardgateDb>,
    /// server configuration.
    pub config: Config,
}

/// create the axum application with all routes.
pub fn create_app(db: WardgateDb, config: Config) -> Router {
    let compiler = PolicyCompiler::new(db.clone());

    let state = AppState {
        db,
        compiler,
        config,
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/policy/compile/{connector_id}",
            post(handlers::compile_policy),
        )
        .route(
            "/connectors/{connector_id}/heartbeat",
            post(handlers::heartbeat).patch(handlers::heartbeat_with_version),
        )
        .with_state(state)
}
