//! Axum server setup and router construction.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::AppState;
use crate::api;

/// Build the full axum router.
pub fn build_router(app: AppState) -> Router {
    // Permissive CORS: the page may be embedded or polled cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::get_index))
        .route("/image", get(api::get_image))
        .route("/image/status", get(api::get_image_status))
        .route("/season", get(api::get_season))
        .route("/health", get(api::get_health))
        .route("/version", get(api::get_version))
        .route("/stats", get(api::get_stats))
        .route("/connect", post(api::post_connect))
        .route("/disconnect", post(api::post_disconnect))
        .route("/viewers", get(api::get_viewers))
        .with_state(app)
        .layer(cors)
}

/// Bind and start serving on a background task; returns the bound address.
///
/// Served with connect-info so handlers can identify clients by IP when no
/// session header is present.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> Result<SocketAddr, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;

    tokio::spawn(async move {
        let service = router.into_make_service_with_connect_info::<SocketAddr>();
        if let Err(e) = axum::serve(listener, service).await {
            error!("server error: {e}");
        }
    });

    Ok(addr)
}
