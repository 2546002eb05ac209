//! Season content: the [`Season`] trait, the registry of available seasons,
//! and the built-in catalog of eleven seasons and holidays.
//!
//! A season is the unit of themed content — it owns its scene, extra, and
//! object tables as `&'static` data and can produce a randomized on-theme
//! image prompt on demand. The blender never inspects season content; it
//! only selects a season by weight and delegates.

mod catalog;
mod prompt;

pub use catalog::builtin_seasons;
pub use prompt::SeasonContent;

use std::collections::BTreeMap;

use rand::RngCore;

// ── Season trait ───────────────────────────────────────────────────

/// A themed prompt generator.
///
/// Implementations are immutable and share-safe; randomness comes in
/// through the caller-supplied `rng`, never from hidden state.
pub trait Season: Send + Sync {
    /// Display name, e.g. `"Christmas"`.
    fn name(&self) -> &str;

    /// Produce one randomized, on-theme image-generation prompt.
    fn prompt(&self, rng: &mut dyn RngCore) -> String;
}

// ── Registry ───────────────────────────────────────────────────────

/// Mapping from season id (`"christmas"`, `"fall"`, ...) to its [`Season`].
///
/// Populated once at startup; the blender requires every id referenced by
/// the weight table to be present here.
#[derive(Default)]
pub struct SeasonRegistry {
    seasons: BTreeMap<String, Box<dyn Season>>,
}

impl SeasonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All eleven built-in seasons.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (id, content) in builtin_seasons() {
            registry.insert(id, Box::new(content));
        }
        registry
    }

    /// Register a season under an id, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, season: Box<dyn Season>) {
        self.seasons.insert(id.into(), season);
    }

    /// Look up a season by id.
    pub fn get(&self, id: &str) -> Option<&dyn Season> {
        self.seasons.get(id).map(|season| &**season)
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.seasons.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        self.seasons.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

impl std::fmt::Debug for SeasonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeasonRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_all_seasons() {
        let registry = SeasonRegistry::builtin();
        assert_eq!(registry.len(), 11);
        for id in [
            "christmas",
            "winter",
            "new_years",
            "fall",
            "summer",
            "spring",
            "thanksgiving",
            "fourth_july",
            "easter",
            "halloween",
            "valentines",
        ] {
            assert!(registry.contains(id), "missing {id}");
        }
    }

    #[test]
    fn every_builtin_season_produces_prompts() {
        let registry = SeasonRegistry::builtin();
        let mut rng = rand::thread_rng();
        for id in registry.ids() {
            let season = registry.get(id).unwrap();
            assert!(!season.name().is_empty());
            for _ in 0..10 {
                let prompt = season.prompt(&mut rng);
                assert!(prompt.len() > 20, "{id} produced a trivial prompt: {prompt}");
            }
        }
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut registry = SeasonRegistry::builtin();
        let before = registry.len();
        for (id, content) in builtin_seasons() {
            if id == "winter" {
                registry.insert(id, Box::new(content));
            }
        }
        assert_eq!(registry.len(), before);
    }
}
