//! Viewer session bookkeeping.
//!
//! Sessions exist so the server can pause image generation when nobody is
//! watching. The store is recency-ordered: touching a session moves it to
//! the back, eviction takes from the front. A periodic sweep drops sessions
//! idle past the TTL; an LRU cap bounds memory against clients that never
//! reuse an id.

use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Recency-ordered viewer sessions with TTL expiry and an LRU cap.
#[derive(Debug)]
pub struct SessionStore {
    /// `(session_id, last_seen)`, oldest first.
    sessions: Vec<(String, Instant)>,
    max_sessions: usize,
    /// Highest simultaneous session count observed.
    peak: usize,
    last_activity: Option<Instant>,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Vec::new(),
            max_sessions,
            peak: 0,
            last_activity: None,
        }
    }

    /// Register or refresh a session, evicting the oldest past the cap.
    /// Returns the current session count.
    pub fn touch(&mut self, id: &str) -> usize {
        if let Some(pos) = self.sessions.iter().position(|(sid, _)| sid == id) {
            self.sessions.remove(pos);
        }
        self.sessions.push((id.to_string(), Instant::now()));

        while self.sessions.len() > self.max_sessions {
            let (evicted, _) = self.sessions.remove(0);
            warn!("session limit reached, evicted oldest session {}", short(&evicted));
        }

        self.peak = self.peak.max(self.sessions.len());
        self.last_activity = Some(Instant::now());
        self.sessions.len()
    }

    /// Drop a session if present. Returns the remaining count.
    pub fn remove(&mut self, id: &str) -> usize {
        if let Some(pos) = self.sessions.iter().position(|(sid, _)| sid == id) {
            self.sessions.remove(pos);
        }
        self.last_activity = Some(Instant::now());
        self.sessions.len()
    }

    /// Current session count.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Highest simultaneous count observed.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Seconds since the last connect/disconnect/poll, if any.
    pub fn idle_secs(&self) -> Option<f64> {
        self.last_activity.map(|t| t.elapsed().as_secs_f64())
    }

    /// Drop sessions idle longer than `ttl`. Returns how many were removed.
    pub fn sweep(&mut self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|(_, last_seen)| last_seen.elapsed() <= ttl);
        let removed = before - self.sessions.len();
        if removed > 0 {
            info!("cleaned up {removed} stale sessions (ttl {}s)", ttl.as_secs());
        }
        removed
    }
}

/// First eight characters of a session id, for logs.
fn short(id: &str) -> String {
    id.chars().take(8).collect()
}
