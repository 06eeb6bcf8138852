pub mod handlers;
pub mod limit;
pub mod openapi;
pub mod state;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware::from_fn_with_state, routing::get};
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
pub use state::AppState;

/// Build the router: a single `GET /` route.
pub fn build_router(state: Arc<AppState>) -> Router {
    let app = Router::new().route("/", get(handlers::do_work));

    let app = if state.limit.is_some() {
        app.layer(from_fn_with_state(state.clone(), limit::limit_in_flight))
    } else {
        app
    };

    app.with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

/// Bind `host:port` and serve until Ctrl-C / SIGTERM.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "failed to bind to {} (port {} may already be in use)",
            addr, config.port
        )
    })?;

    match &state.limit {
        Some(limit) => tracing::info!("in-flight limit: {} requests", limit.max()),
        None => tracing::info!("in-flight limit: unbounded"),
    }
    match listener.local_addr() {
        Ok(local) => tracing::info!("listening on http://{}", local),
        Err(_) => tracing::info!("listening on http://{}", addr),
    }

    serve(listener, state, shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
