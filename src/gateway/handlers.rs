//! Workload handler

use std::sync::Arc;

use axum::{Json, extract::State};

use super::state::AppState;
use super::types::{ErrorResponse, GatewayError, HashResponse};
use crate::logging::REQUEST_TARGET;
use crate::workload;

/// Hash a fresh 10 MiB random buffer
///
/// Allocates a new buffer on every call, fills it with random bytes and
/// returns its 128-bit digest. The buffer is released once the response is
/// built. Successive calls return different hashes.
///
/// Filling and hashing 10 MiB is CPU-bound work, so it runs on the blocking
/// pool and the async workers stay free to accept connections.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Digest of the random buffer", body = HashResponse, content_type = "application/json"),
        (status = 500, description = "Buffer allocation or workload task failed", body = ErrorResponse, content_type = "application/json")
    ),
    tag = "Workload"
)]
pub async fn do_work(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HashResponse>, GatewayError> {
    let request_no = state.next_request_no();
    let seed = state.seed;

    let digest = tokio::task::spawn_blocking(move || workload::run(seed))
        .await
        .map_err(GatewayError::from)
        .and_then(|res| res.map_err(GatewayError::from))
        .inspect_err(|e| {
            tracing::error!(request_no, "workload failed: {}", e);
        })?;

    tracing::debug!(target: REQUEST_TARGET, request_no, hash = %digest, "served");

    Ok(Json(HashResponse {
        hash: digest.to_string(),
    }))
}
