//! Integration tests for the driftscape-web server.
//!
//! These tests start a real axum server on a random port and exercise the
//! JSON endpoints. The image provider points at a dead address so no test
//! ever reaches a real backend; generation paths fail fast and visibly in
//! `/stats` instead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use driftscape::api::{ImageProvider, SwarmUiClient, SwarmUiConfig};
use driftscape::blend::SeasonBlender;
use driftscape_web::{AppState, CachedScene, ServeConfig, spawn_web};

/// Spawn a test server on port 0 with a dead image backend and no startup
/// generation.
async fn spawn_test_server() -> (AppState, String) {
    let blender = Arc::new(SeasonBlender::builtin().unwrap());
    let provider = Arc::new(ImageProvider::SwarmUi(
        SwarmUiClient::new(SwarmUiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            ..SwarmUiConfig::default()
        })
        .unwrap(),
    ));

    let config = ServeConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        initial_generation: false,
        ..ServeConfig::default()
    };

    let app = AppState::new(blender, provider, config);
    let addr = spawn_web(app.clone()).await.unwrap();
    (app, format!("http://{addr}"))
}

fn test_scene() -> CachedScene {
    CachedScene {
        prompt: "snow-covered cottage at dusk".to_string(),
        season: "winter".to_string(),
        image_data: "data:image/png;base64,AAAA".to_string(),
        unix_time: 1700000000.0,
        generated_at: Instant::now(),
    }
}

// ── Health / version ─────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let (_app, base) = spawn_test_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn version_reports_provider_details() {
    let (_app, base) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/version"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["image_provider"], "swarmui");
    assert_eq!(json["model"], "Flux/flux1-schnell-fp8");
    assert!(json["version"].as_str().is_some());
}

// ── Season endpoint ──────────────────────────────────────────────────

#[tokio::test]
async fn season_reports_normalized_distribution() {
    let (_app, base) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/season"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let day = json["day_of_year"].as_u64().unwrap();
    assert!((1..=366).contains(&day));

    let weights = json["active_seasons"].as_object().unwrap();
    assert!(!weights.is_empty());
    let total: f64 = weights.values().map(|w| w.as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 0.01, "weights sum to {total}");

    let available = json["available_seasons"].as_array().unwrap();
    assert_eq!(available.len(), 11);
}

// ── Image endpoints ──────────────────────────────────────────────────

#[tokio::test]
async fn image_returns_placeholder_before_first_generation() {
    let (_app, base) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/image"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(json["image_data"].is_null());
    assert_eq!(json["prompt"], "Generating first image...");
}

#[tokio::test]
async fn image_status_tracks_cache_state() {
    let (app, base) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/image/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["available"], false);
    assert!(json["timestamp"].is_null());

    {
        let mut cache = app.cache.lock().unwrap();
        cache.store(test_scene());
    }

    let json: serde_json::Value = reqwest::get(format!("{base}/image/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["available"], true);
    assert_eq!(json["timestamp"], 1700000000.0);
}

#[tokio::test]
async fn image_serves_cached_scene() {
    let (app, base) = spawn_test_server().await;

    {
        let mut cache = app.cache.lock().unwrap();
        cache.store(test_scene());
    }

    let resp = reqwest::get(format!("{base}/image")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let cache_control = resp
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cache_control.contains("max-age=60"), "got {cache_control:?}");

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["season"], "winter");
    assert_eq!(json["prompt"], "snow-covered cottage at dusk");
    assert_eq!(json["image_data"], "data:image/png;base64,AAAA");
}

#[tokio::test]
async fn failed_generation_is_counted() {
    let (app, base) = spawn_test_server().await;

    // Empty cache + request = one background generation against the dead
    // backend.
    let _ = reqwest::get(format!("{base}/image")).await.unwrap();

    // Wait for the failure to land in stats.
    let mut failed = 0;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        failed = app.stats.lock().unwrap().failed;
        if failed > 0 {
            break;
        }
    }
    assert_eq!(failed, 1, "dead backend should record one failure");
    assert!(!app.cache.lock().unwrap().generating());
}

// ── Viewer sessions ──────────────────────────────────────────────────

#[tokio::test]
async fn connect_disconnect_updates_viewers() {
    let (_app, base) = spawn_test_server().await;

    let client = reqwest::Client::new();
    let json: serde_json::Value = client
        .post(format!("{base}/connect"))
        .header("X-Session-ID", "viewer-1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["connected"], 1);
    assert_eq!(json["session_id"], "viewer-1");

    let json: serde_json::Value = client
        .post(format!("{base}/connect"))
        .header("X-Session-ID", "viewer-2")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["connected"], 2);

    let json: serde_json::Value = reqwest::get(format!("{base}/viewers"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["connected"], 2);

    let json: serde_json::Value = client
        .post(format!("{base}/disconnect"))
        .header("X-Session-ID", "viewer-1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["connected"], 1);
}

#[tokio::test]
async fn stats_reflect_sessions_and_cache() {
    let (app, base) = spawn_test_server().await;

    let client = reqwest::Client::new();
    client
        .post(format!("{base}/connect"))
        .header("X-Session-ID", "stats-viewer")
        .send()
        .await
        .unwrap();
    {
        let mut cache = app.cache.lock().unwrap();
        cache.store(test_scene());
    }

    let json: serde_json::Value = reqwest::get(format!("{base}/stats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["image_provider"], "swarmui");
    assert_eq!(json["active_sessions"], 1);
    assert_eq!(json["peak_connected"], 1);
    assert_eq!(json["last_image_cached"], true);
    assert_eq!(json["images_generated"], 0);
    assert_eq!(json["session_ttl_s"], 300);
}

// ── Index page ───────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_viewer_page() {
    let (app, base) = spawn_test_server().await;

    let html = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<title>Driftscape"));
    assert!(html.contains("const initialImage = null;"));

    {
        let mut cache = app.cache.lock().unwrap();
        cache.store(test_scene());
    }
    let html = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("data:image/png;base64,AAAA"));
}
