//! connector heartbeat endpoint handlers

use axum::{Json, extract::Path, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wardgate_db::Database;
use wardgate_policy::Staleness;
use wardgate_types::ConnectorId;

use super::error::{ApiError, OptionExt, ResultExt};
use crate::AppState;

/// response body for the plain heartbeat
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    ok: bool,
}

/// request body for the version-reporting heartbeat
#[derive(Debug, Deserialize)]
pub struct HeartbeatReport {
    /// policy version the connector has applied
    pub last_policy_version: i64,
}

/// POST /connectors/{connector_id}/heartbeat - mark a connector online
///
/// refreshes `last_seen_at` and nothing else. unknown connector returns
/// 404.
pub async fn heartbeat(
    State(state): State<AppState>,
    Path(connector_id): Path<String>,
) -> Result<Json<HeartbeatResponse>, ApiError> {
    let connector_id = ConnectorId(connector_id);

    state
        .db
        .get_connector(&connector_id)
        .await
        .map_internal()?
        .or_not_found("connector not found")?;

    state
        .db
        .touch_connector(&connector_id, Utc::now())
        .await
        .map_internal()?;

    debug!(connector_id = %connector_id, "heartbeat");

    Ok(Json(HeartbeatResponse { ok: true }))
}

/// PATCH /connectors/{connector_id}/heartbeat - report applied version
///
/// records the version the connector says it has applied, refreshes
/// `last_seen_at`, and answers the read-only staleness question. this
/// path never compiles; high-frequency polling stays cheap.
pub async fn heartbeat_with_version(
    State(state): State<AppState>,
    Path(connector_id): Path<String>,
    Json(report): Json<HeartbeatReport>,
) -> Result<Json<Staleness>, ApiError> {
    let connector_id = ConnectorId(connector_id);

    state
        .db
        .get_connector(&connector_id)
        .await
        .map_internal()?
        .or_not_found("connector not found")?;

    state
        .db
        .set_connector_reported_version(&connector_id, report.last_policy_version, Utc::now())
        .await
        .map_internal()?;

    let staleness = state
        .compiler
        .check_staleness(&connector_id, report.last_policy_version)
        .await?;

    debug!(
        connector_id = %connector_id,
        reported = report.last_policy_version,
        current = staleness.current_version,
        update_available = staleness.update_available,
        "heartbeat with version report"
    );

    Ok(Json(staleness))
}
