//! Optional in-flight request cap.
//!
//! Every request holds its own 10 MiB buffer, so memory use grows with
//! concurrency. Without `gateway.max_in_flight` nothing here is installed and
//! concurrency is unbounded. With it, each request waits for a semaphore
//! permit and holds it until its response is produced.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use super::state::AppState;
use crate::logging::REQUEST_TARGET;

pub async fn limit_in_flight(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(limit) = state.limit.as_ref() else {
        return next.run(request).await;
    };

    if limit.available() == 0 {
        tracing::debug!(
            target: REQUEST_TARGET,
            max = limit.max(),
            "in-flight limit reached, waiting for permit"
        );
    }

    // The semaphore is owned by AppState and never closed.
    let Ok(_permit) = limit.semaphore().acquire_owned().await else {
        tracing::error!("in-flight semaphore closed, serving without a permit");
        return next.run(request).await;
    };

    next.run(request).await
}
