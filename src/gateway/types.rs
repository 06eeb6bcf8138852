//! Response bodies and error mapping

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;
use utoipa::ToSchema;

use crate::workload::WorkloadError;

/// Successful workload response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HashResponse {
    /// XXH3-128 digest of the request's random buffer, 32 lowercase hex chars
    #[schema(example = "9f2c4e0a7b1d3c5e8f60a1b2c3d4e5f6")]
    pub hash: String,
}

/// Error body for server-side failures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 5000)]
    pub code: i32,
    #[schema(example = "failed to allocate 10485760 byte buffer")]
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

pub mod error_codes {
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Failures surfaced by the workload route
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    #[error("workload task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(error_codes::INTERNAL_ERROR, self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_response_has_single_key() {
        let body = serde_json::to_value(HashResponse {
            hash: "00".repeat(16),
        })
        .unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["hash"], "00".repeat(16));
    }

    #[test]
    fn test_allocation_error_maps_to_500() {
        // A reservation this large always fails with capacity overflow.
        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = GatewayError::from(WorkloadError::Allocation {
            size: usize::MAX,
            source,
        });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_panicked_task_maps_to_500() {
        let join_err = tokio::task::spawn_blocking(|| -> u8 { panic!("boom") })
            .await
            .unwrap_err();
        let resp = GatewayError::from(join_err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
