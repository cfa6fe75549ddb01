//! policy compile endpoint handler

use axum::{Json, extract::Path, extract::State};
use tracing::info;
use wardgate_policy::PolicySnapshot;
use wardgate_types::ConnectorId;

use super::error::ApiError;
use crate::AppState;

/// POST /policy/compile/{connector_id} - compile a connector's policy
///
/// runs a full compile for the connector and returns the resulting
/// snapshot. advances the version ledger when the policy content changed.
/// unknown connector returns 404.
pub async fn compile_policy(
    State(state): State<AppState>,
    Path(connector_id): Path<String>,
) -> Result<Json<PolicySnapshot>, ApiError> {
    let connector_id = ConnectorId(connector_id);

    let snapshot = state.compiler.compile(&connector_id).await?;

    info!(
        connector_id = %snapshot.connector_id,
        version = snapshot.policy_version,
        resources = snapshot.resources.len(),
        "compiled policy snapshot"
    );

    Ok(Json(snapshot))
}
