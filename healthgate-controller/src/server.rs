//! Read-only HTTP status surface
//!
//! - `GET /status`  controller status report
//! - `GET /healthz` liveness
//! - `GET /readyz`  readiness (503 while shutting down or when the cluster
//!   status cannot be read)

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use healthgate_common::{LivenessResponse, ReadinessResponse, StatusReport};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controller::StatusHandle;
use crate::health::HealthChecker;
use crate::shutdown::ShutdownSignal;

#[derive(Clone)]
struct AppState {
    status: StatusHandle,
    health: Arc<HealthChecker>,
}

pub fn router(status: StatusHandle) -> Router {
    let state = AppState {
        status,
        health: Arc::new(HealthChecker::new(env!("CARGO_PKG_VERSION"))),
    };

    Router::new()
        .route("/status", get(get_status))
        .route("/healthz", get(liveness_probe))
        .route("/readyz", get(readiness_probe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the status router on `listener` until `shutdown` fires
pub async fn serve(
    listener: TcpListener,
    status: StatusHandle,
    shutdown: ShutdownSignal,
) -> std::io::Result<()> {
    info!("Status server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(status))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Status server stopped");
    Ok(())
}

async fn get_status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.status.report().await)
}

async fn liveness_probe(State(state): State<AppState>) -> Json<LivenessResponse> {
    Json(state.health.liveness())
}

async fn readiness_probe(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let response = state.health.readiness(&state.status).await;
    let code = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(response))
}
