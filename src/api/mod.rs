//! Prediction-serving API.
//!
//! One endpoint:
//! - `POST /predict` — point-in-time appliance-category energy prediction
//!
//! The model and feature schema live in an immutable [`AppState`] built
//! once at startup and injected into handlers; there is no ambient
//! global lookup anywhere on the serving path.

mod handlers;
pub mod model;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use model::LinearModel;

/// Immutable application state shared across all request handlers.
///
/// Constructed once at process startup and wrapped in `Arc` — no locks
/// needed since all data is read-only.
pub struct AppState {
    /// The pre-trained coefficient model.
    pub model: LinearModel,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
