//! Web serving layer for driftscape: polling viewers, cached scenes, and
//! background image generation.
//!
//! The server exposes a small JSON API plus a single-page viewer UI. Scene
//! generation is decoupled from requests: `/image` answers from the cache
//! and at most schedules one background generation when the cache has gone
//! stale — so generation is rate-limited to the refresh interval and stops
//! entirely once viewers disappear (no polls, no generations).
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use driftscape::prelude::*;
//! use driftscape_web::{AppState, ServeConfig, spawn_web};
//!
//! let blender = Arc::new(SeasonBlender::builtin()?);
//! let provider = Arc::new(ImageProvider::SwarmUi(
//!     SwarmUiClient::new(SwarmUiConfig::default())?,
//! ));
//!
//! let app = AppState::new(blender, provider, ServeConfig::default());
//! let addr = spawn_web(app).await?;
//! println!("serving on http://{addr}");
//! ```
//!
//! # Endpoints
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `/` | Viewer page (polls for new scenes) |
//! | `/image` | Current scene JSON; schedules regeneration when stale |
//! | `/image/status` | Cheap availability/timestamp poll |
//! | `/season` | Active season distribution for today |
//! | `/connect`, `/disconnect`, `/viewers` | Viewer session bookkeeping |
//! | `/stats`, `/version`, `/health` | Operational introspection |

mod api;
mod cache;
mod page;
mod server;
mod sessions;

pub use cache::{CachedScene, GenStats, ImageCache, SceneSnapshot, maybe_spawn_generation};
pub use sessions::SessionStore;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use driftscape::api::{ImageProvider, RetryConfig};
use driftscape::blend::SeasonBlender;

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Address to bind to. Default: `127.0.0.1:4002`.
    pub bind_addr: SocketAddr,
    /// Minimum interval between image generations. Default: 60 s.
    pub refresh_interval: Duration,
    /// How often clients poll `/image/status`. Default: 10 s.
    pub poll_interval: Duration,
    /// Idle time after which a viewer session expires. Default: 300 s.
    pub session_ttl: Duration,
    /// How often the sweep task runs. Default: 60 s.
    pub session_sweep_interval: Duration,
    /// LRU cap on tracked sessions. Default: 1000.
    pub max_sessions: usize,
    /// Retry policy for generation calls. Default: one retry.
    pub retry: RetryConfig,
    /// Generate an initial scene at startup so the first viewer is not met
    /// by a placeholder. Default: true.
    pub initial_generation: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4002)),
            refresh_interval: Duration::from_secs(60),
            poll_interval: Duration::from_secs(10),
            session_ttl: Duration::from_secs(300),
            session_sweep_interval: Duration::from_secs(60),
            max_sessions: 1000,
            retry: RetryConfig::with_retries(1),
            initial_generation: true,
        }
    }
}

/// Shared application state passed to all handlers via axum's `State`.
///
/// The blender and provider are immutable and lock-free; the cache,
/// session store, and stats each sit behind their own mutex so contention
/// stays local.
#[derive(Clone)]
pub struct AppState {
    pub blender: Arc<SeasonBlender>,
    pub provider: Arc<ImageProvider>,
    pub config: Arc<ServeConfig>,
    pub cache: Arc<Mutex<ImageCache>>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub stats: Arc<Mutex<GenStats>>,
}

impl AppState {
    pub fn new(
        blender: Arc<SeasonBlender>,
        provider: Arc<ImageProvider>,
        config: ServeConfig,
    ) -> Self {
        let sessions = SessionStore::new(config.max_sessions);
        Self {
            blender,
            provider,
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(ImageCache::default())),
            sessions: Arc::new(Mutex::new(sessions)),
            stats: Arc::new(Mutex::new(GenStats::default())),
        }
    }
}

/// Start the server plus its background tasks; returns the bound address.
///
/// Spawns the session sweep loop and (unless disabled) an initial scene
/// generation. The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(app: AppState) -> Result<SocketAddr, String> {
    let router = server::build_router(app.clone());
    let addr = server::start_server(router, app.config.bind_addr).await?;

    {
        let app = app.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(app.config.session_sweep_interval);
            ticker.tick().await; // the first tick completes immediately
            loop {
                ticker.tick().await;
                let mut sessions = app.sessions.lock().unwrap_or_else(|e| e.into_inner());
                sessions.sweep(app.config.session_ttl);
            }
        });
    }

    if app.config.initial_generation {
        cache::maybe_spawn_generation(&app);
    }

    Ok(addr)
}
