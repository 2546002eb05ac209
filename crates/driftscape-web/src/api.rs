//! HTTP endpoint handlers.
//!
//! Every handler answers from in-memory state; the only side effect on a
//! request path is session registration and (on `/image`) possibly kicking
//! off a background generation. Nothing here awaits an image backend.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::cache::{maybe_spawn_generation, unix_now};
use crate::page;

/// GET / — The viewer page, with any cached scene baked in.
pub async fn get_index(State(app): State<AppState>) -> Html<String> {
    let cached = {
        let cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.last().cloned()
    };
    Html(page::render(
        app.config.poll_interval.as_secs(),
        env!("CARGO_PKG_VERSION"),
        cached.as_ref(),
    ))
}

/// GET /image — The current scene as JSON.
///
/// Registers the caller as a viewer, triggers a background generation when
/// the cache is stale, and always returns immediately — the cached scene if
/// one exists, a placeholder body otherwise.
pub async fn get_image(
    State(app): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    let session_id = session_key(&headers, &addr);
    {
        let mut sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.touch(&session_id);
    }

    maybe_spawn_generation(&app);

    let cached = {
        let cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.last().cloned()
    };
    match cached {
        Some(scene) => {
            let max_age = app.config.refresh_interval.as_secs();
            (
                [(header::CACHE_CONTROL, format!("public, max-age={max_age}"))],
                Json(serde_json::to_value(scene.snapshot()).unwrap_or_default()),
            )
                .into_response()
        }
        None => Json(json!({
            "image_data": null,
            "prompt": "Generating first image...",
            "timestamp": null,
        }))
        .into_response(),
    }
}

/// GET /image/status — Cheap change-detection poll target.
pub async fn get_image_status(State(app): State<AppState>) -> Json<serde_json::Value> {
    let cached = {
        let cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.last().map(|s| s.unix_time)
    };
    match cached {
        Some(timestamp) => Json(json!({
            "available": true,
            "timestamp": timestamp,
            "age_seconds": unix_now() - timestamp,
        })),
        None => Json(json!({
            "available": false,
            "timestamp": null,
            "age_seconds": null,
        })),
    }
}

/// GET /season — The blender's view of today.
pub async fn get_season(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "day_of_year": app.blender.day_of_year(None),
        "active_seasons": app.blender.active_seasons(driftscape::blend::DateQuery::Today),
        "available_seasons": app.blender.registry().ids(),
    }))
}

/// GET /health — Liveness probe.
pub async fn get_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// GET /version — Service version and provider details.
pub async fn get_version(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "image_provider": app.provider.kind(),
        "endpoint": app.provider.endpoint(),
        "model": app.provider.model(),
    }))
}

/// GET /stats — Usage and generation statistics.
pub async fn get_stats(State(app): State<AppState>) -> Json<serde_json::Value> {
    let (active_sessions, current, peak, idle_secs) = {
        let sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
        (
            sessions.count(),
            sessions.count(),
            sessions.peak(),
            sessions.idle_secs(),
        )
    };
    let (cached, cache_age) = {
        let cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
        (
            cache.last().is_some(),
            cache.age().map(|age| age.as_secs_f64()),
        )
    };
    let stats = app.stats.lock().unwrap_or_else(|e| e.into_inner());

    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "image_provider": app.provider.kind(),
        "active_sessions": active_sessions,
        "session_ttl_s": app.config.session_ttl.as_secs(),
        "current_connected": current,
        "peak_connected": peak,
        "images_generated": stats.generated,
        "images_failed": stats.failed,
        "generation_time_min_s": stats.time_min(),
        "generation_time_max_s": stats.time_max(),
        "generation_time_avg_s": stats.time_avg(),
        "last_activity_age_s": idle_secs,
        "last_image_cached": cached,
        "last_image_age_s": cache_age,
    }))
}

/// POST /connect — Register a viewer (sent via `navigator.sendBeacon`).
pub async fn post_connect(
    State(app): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let session_id = session_key(&headers, &addr);
    let (connected, peak) = {
        let mut sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let connected = sessions.touch(&session_id);
        (connected, sessions.peak())
    };
    info!("session connected — total={connected} (peak={peak})");
    Json(json!({"connected": connected, "session_id": session_id}))
}

/// POST /disconnect — Unregister a viewer.
pub async fn post_disconnect(
    State(app): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let session_id = session_key(&headers, &addr);
    let connected = {
        let mut sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.remove(&session_id)
    };
    info!("session disconnected — total={connected}");
    Json(json!({"connected": connected}))
}

/// GET /viewers — Current viewer count.
pub async fn get_viewers(State(app): State<AppState>) -> Json<serde_json::Value> {
    let connected = {
        let sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.count()
    };
    Json(json!({"connected": connected}))
}

/// Identify the caller: an explicit `X-Session-ID` header wins, otherwise a
/// stable hash of client IP and User-Agent.
fn session_key(headers: &HeaderMap, addr: &SocketAddr) -> String {
    if let Some(id) = headers.get("x-session-id").and_then(|v| v.to_str().ok())
        && !id.is_empty()
    {
        return id.to_string();
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let mut hasher = DefaultHasher::new();
    addr.ip().hash(&mut hasher);
    user_agent.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn explicit_session_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-session-id", "my-session".parse().unwrap());
        assert_eq!(session_key(&headers, &addr(1)), "my-session");
    }

    #[test]
    fn fallback_key_is_stable_per_client() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, "browser/1.0".parse().unwrap());

        let a = session_key(&headers, &addr(1));
        let b = session_key(&headers, &addr(2));
        assert_eq!(a, b, "port must not affect identity, only IP");

        let mut other = HeaderMap::new();
        other.insert(header::USER_AGENT, "browser/2.0".parse().unwrap());
        assert_ne!(a, session_key(&other, &addr(1)));
    }

    #[test]
    fn empty_session_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-session-id", "".parse().unwrap());
        let key = session_key(&headers, &addr(1));
        assert!(!key.is_empty());
        assert_ne!(key, "");
        assert_eq!(key.len(), 16, "fallback key is a 16-hex-digit hash");
    }
}
