//! The season blender: interpolates the weight table for a calendar day,
//! draws one season by weight, and produces its prompt.
//!
//! Exact key dates are returned verbatim — a holiday pinned at 100% in the
//! table is always exactly that, immune to floating-point drift. Between
//! key dates the blender lerps over the union of both anchors' seasons,
//! prunes near-zero noise, and renormalizes. The table is treated as a
//! cycle: days before the first anchor and after the last interpolate
//! across the year boundary.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rand::RngCore;
use tracing::debug;

use super::calendar::CalendarConfig;
use super::table::WeightTable;
use crate::seasons::{Season, SeasonRegistry};

/// Interpolated weights at or below this value are dropped as noise.
const WEIGHT_EPSILON: f64 = 0.001;

/// Day offset applied when interpolation crosses the year boundary.
const YEAR_WRAP: f64 = 365.0;

// ── Query input ────────────────────────────────────────────────────

/// What day to query: today (per the calendar config), an explicit date,
/// or a raw day-of-year.
#[derive(Debug, Clone, Copy, Default)]
pub enum DateQuery {
    #[default]
    Today,
    Date(NaiveDate),
    DayOfYear(u32),
}

impl From<NaiveDate> for DateQuery {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<u32> for DateQuery {
    fn from(day: u32) -> Self {
        Self::DayOfYear(day)
    }
}

// ── Blender ────────────────────────────────────────────────────────

/// Date-aware seasonal selection over an immutable weight table and season
/// registry.
///
/// Built once at startup and shared by reference; every query allocates its
/// own result, so concurrent use needs no locking.
#[derive(Debug)]
pub struct SeasonBlender {
    table: WeightTable,
    registry: SeasonRegistry,
    calendar: CalendarConfig,
}

impl SeasonBlender {
    /// Bundle a table, registry, and calendar config into a blender.
    ///
    /// Runs the table's sum-validation pass (warnings only) and verifies
    /// that every season id the table references exists in the registry —
    /// a missing season is a configuration bug and fails construction.
    pub fn new(
        table: WeightTable,
        registry: SeasonRegistry,
        calendar: CalendarConfig,
    ) -> Result<Self, String> {
        table.validate();
        for id in table.season_ids() {
            if !registry.contains(id) {
                return Err(format!(
                    "weight table references season {id:?} which is not in the registry \
                     (registered: {:?})",
                    registry.ids()
                ));
            }
        }
        Ok(Self {
            table,
            registry,
            calendar,
        })
    }

    /// The built-in table and season catalog, with calendar configuration
    /// read from the environment (`TIMEZONE`, `DATE`).
    pub fn builtin() -> Result<Self, String> {
        Self::new(
            WeightTable::builtin(),
            SeasonRegistry::builtin(),
            CalendarConfig::from_env(),
        )
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn registry(&self) -> &SeasonRegistry {
        &self.registry
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Day of year in `[1, 366]` for a date, the override, or today.
    pub fn day_of_year(&self, date: Option<NaiveDate>) -> u32 {
        self.calendar.resolve_day_of_year(date)
    }

    fn query_day(&self, query: DateQuery) -> u32 {
        match query {
            DateQuery::Today => self.calendar.resolve_day_of_year(None),
            DateQuery::Date(date) => self.calendar.resolve_day_of_year(Some(date)),
            DateQuery::DayOfYear(day) => day,
        }
    }

    /// Active seasons and their normalized weights for the queried day.
    ///
    /// The result sums to 1.0 with all values non-negative. An empty map is
    /// the degenerate "no season available" case, which a fully covering
    /// table never produces.
    pub fn active_seasons(&self, query: impl Into<DateQuery>) -> BTreeMap<String, f64> {
        let day = self.query_day(query.into());
        let weights = self.interpolate(day);
        debug!("day {day}: active seasons {weights:?}");
        weights
    }

    /// Interpolate the weight table at a specific day of year.
    fn interpolate(&self, day_of_year: u32) -> BTreeMap<String, f64> {
        let anchors = self.table.anchors();
        if anchors.is_empty() {
            return BTreeMap::new();
        }

        // Exact key dates short-circuit: pinned holidays stay pinned.
        let mut before = None;
        let mut after = None;
        for anchor in anchors {
            if anchor.day == day_of_year {
                return anchor.weights.clone();
            } else if anchor.day < day_of_year {
                before = Some(anchor);
            } else {
                after = Some(anchor);
                break;
            }
        }

        let mut query = day_of_year as f64;
        let first = &anchors[0];
        let (before, after_day, after_weights) = match (before, after) {
            // Before every anchor: wrap the previous year's last anchor in.
            (None, _) => {
                let last = &anchors[anchors.len() - 1];
                query += YEAR_WRAP;
                (last, first.day as f64 + YEAR_WRAP, &first.weights)
            }
            // After every anchor: wrap forward into next year's first.
            (Some(before), None) => (before, first.day as f64 + YEAR_WRAP, &first.weights),
            (Some(before), Some(after)) => (before, after.day as f64, &after.weights),
        };

        let span = after_day - before.day as f64;
        let ratio = if span > 0.0 {
            (query - before.day as f64) / span
        } else {
            0.0
        };

        // Lerp over the union of both anchors' seasons; absent = 0.0.
        let ids: BTreeSet<&String> = before.weights.keys().chain(after_weights.keys()).collect();
        let mut result = BTreeMap::new();
        for id in ids {
            let start = before.weights.get(id).copied().unwrap_or(0.0);
            let end = after_weights.get(id).copied().unwrap_or(0.0);
            let weight = start + (end - start) * ratio;
            if weight > WEIGHT_EPSILON {
                result.insert(id.clone(), weight);
            }
        }

        let total: f64 = result.values().sum();
        if total > 0.0 {
            for weight in result.values_mut() {
                *weight /= total;
            }
        }
        result
    }

    /// Draw one season at random, each with probability equal to its
    /// normalized weight for the queried day.
    pub fn random_season(&self, query: impl Into<DateQuery>) -> Result<(String, &dyn Season), String> {
        let day = self.query_day(query.into());
        let weights = self.interpolate(day);
        let id = pick_weighted(&weights, &mut rand::thread_rng())
            .ok_or_else(|| format!("no active season for day {day}"))?;
        let season = self
            .registry
            .get(id)
            .ok_or_else(|| format!("season {id:?} missing from registry"))?;
        Ok((id.to_string(), season))
    }

    /// Generate a prompt from a randomly selected active season.
    ///
    /// Returns `(prompt_text, season_id)` — the sole interface the serving
    /// layer consumes per generation cycle.
    pub fn prompt(&self, query: impl Into<DateQuery>) -> Result<(String, String), String> {
        let (id, season) = self.random_season(query)?;
        let mut rng = rand::thread_rng();
        let text = season.prompt(&mut rng);
        debug!("generated {id} prompt: {text}");
        Ok((text, id))
    }
}

// ── Weighted draw ──────────────────────────────────────────────────

/// Select one key from a weight map with probability proportional to its
/// weight: a cumulative scan against a single uniform draw.
///
/// Returns `None` only for an empty or all-zero map. A lone positive entry
/// is selected deterministically. Float slop past the final boundary falls
/// back to the last positive entry.
pub fn pick_weighted<'a>(
    weights: &'a BTreeMap<String, f64>,
    rng: &mut dyn RngCore,
) -> Option<&'a str> {
    use rand::Rng;

    let total: f64 = weights.values().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let roll = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for (id, weight) in weights {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last = Some(id.as_str());
        if roll < cumulative {
            return last;
        }
    }
    last
}
