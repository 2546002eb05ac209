//! Last-image cache, generation rate limiting, and usage statistics.
//!
//! The server never generates on the request path. `/image` always answers
//! from the cache; when the cached scene is older than the refresh interval
//! and no generation is already in flight, exactly one background task is
//! spawned to replace it. With no viewers there are no polls, so generation
//! stops on its own.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use driftscape::blend::DateQuery;
use serde::Serialize;
use tracing::{error, info};

use crate::AppState;

/// One generated scene, as served to clients.
#[derive(Debug, Clone)]
pub struct CachedScene {
    pub prompt: String,
    pub season: String,
    /// Browser-ready image string (`data:` URI or URL).
    pub image_data: String,
    /// Unix timestamp for client-side change detection.
    pub unix_time: f64,
    /// Monotonic time for age/staleness checks.
    pub generated_at: Instant,
}

/// Wire form of a [`CachedScene`] — drops the monotonic timestamp, which
/// is meaningless off-process.
#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    pub prompt: &'a str,
    pub season: &'a str,
    pub image_data: &'a str,
    pub timestamp: f64,
}

impl CachedScene {
    pub fn snapshot(&self) -> SceneSnapshot<'_> {
        SceneSnapshot {
            prompt: &self.prompt,
            season: &self.season,
            image_data: &self.image_data,
            timestamp: self.unix_time,
        }
    }
}

/// The last generated scene plus the single-flight generation flag.
#[derive(Debug, Default)]
pub struct ImageCache {
    last: Option<CachedScene>,
    generating: bool,
}

impl ImageCache {
    pub fn last(&self) -> Option<&CachedScene> {
        self.last.as_ref()
    }

    /// Age of the cached scene, if any.
    pub fn age(&self) -> Option<Duration> {
        self.last.as_ref().map(|s| s.generated_at.elapsed())
    }

    pub fn generating(&self) -> bool {
        self.generating
    }

    /// Whether a new generation should start: cache empty or stale, and
    /// none already in flight.
    fn wants_generation(&self, refresh: Duration) -> bool {
        if self.generating {
            return false;
        }
        match self.age() {
            None => true,
            Some(age) => age >= refresh,
        }
    }

    pub fn store(&mut self, scene: CachedScene) {
        self.last = Some(scene);
    }
}

/// Generation metrics served by `/stats`.
#[derive(Debug, Default)]
pub struct GenStats {
    pub generated: u64,
    pub failed: u64,
    time_count: u64,
    time_sum: f64,
    time_min: Option<f64>,
    time_max: Option<f64>,
}

impl GenStats {
    pub fn record_success(&mut self, elapsed_secs: f64) {
        self.generated += 1;
        self.time_count += 1;
        self.time_sum += elapsed_secs;
        self.time_min = Some(self.time_min.map_or(elapsed_secs, |m| m.min(elapsed_secs)));
        self.time_max = Some(self.time_max.map_or(elapsed_secs, |m| m.max(elapsed_secs)));
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn time_min(&self) -> Option<f64> {
        self.time_min
    }

    pub fn time_max(&self) -> Option<f64> {
        self.time_max
    }

    pub fn time_avg(&self) -> Option<f64> {
        (self.time_count > 0).then(|| self.time_sum / self.time_count as f64)
    }
}

// ── Background generation ──────────────────────────────────────────

/// Spawn a background generation task if the cache is empty or stale and
/// no generation is already running. Never blocks the caller.
pub fn maybe_spawn_generation(app: &AppState) {
    {
        let mut cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
        if !cache.wants_generation(app.config.refresh_interval) {
            return;
        }
        cache.generating = true;
    }

    let app = app.clone();
    tokio::spawn(async move {
        run_generation(&app).await;
    });
}

/// Run one generation cycle: prompt, backend call, cache + stats update.
/// Always clears the in-flight flag.
async fn run_generation(app: &AppState) {
    let start = Instant::now();
    let result = generate_scene(app).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(scene) => {
            {
                let mut stats = app.stats.lock().unwrap_or_else(|e| e.into_inner());
                stats.record_success(elapsed);
            }
            info!(
                "generated {} scene in {elapsed:.1}s: {}",
                scene.season, scene.prompt
            );
            let mut cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.store(scene);
            cache.generating = false;
        }
        Err(err) => {
            {
                let mut stats = app.stats.lock().unwrap_or_else(|e| e.into_inner());
                stats.record_failure();
            }
            error!("scene generation failed: {err}");
            let mut cache = app.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.generating = false;
        }
    }
}

/// Build a seasonal prompt and ask the provider for an image.
async fn generate_scene(app: &AppState) -> Result<CachedScene, String> {
    let (prompt, season) = app.blender.prompt(DateQuery::Today)?;
    info!(
        "generating {season} scene ({}): {prompt}",
        app.provider.kind()
    );

    let image_data = app
        .provider
        .generate_with_retry(&prompt, &app.config.retry)
        .await?;

    Ok(CachedScene {
        prompt,
        season,
        image_data,
        unix_time: unix_now(),
        generated_at: Instant::now(),
    })
}

/// Current Unix time as seconds.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
