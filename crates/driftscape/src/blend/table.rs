//! The seasonal weight table: sorted day-of-year anchors with per-season
//! weights, built once from the hand-curated `(month, day)` configuration.
//!
//! Each anchor's weights are curated to sum to 1.0. The table gives precise
//! control over holiday ramp-ups and terminal dates; the blender interpolates
//! between anchors for every day the table doesn't pin explicitly.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

/// Tolerance for per-anchor weight sums (curated by hand, so allow float slop).
const SUM_TOLERANCE: f64 = 0.01;

/// Reference year for converting `(month, day)` anchors to day-of-year.
/// Non-leap, so anchors land on the same ordinals the curation assumed.
const ANCHOR_YEAR: i32 = 2025;

// ── Anchor configuration ───────────────────────────────────────────

/// The curated key dates. Weights at each date sum to 1.0; the blender
/// interpolates linearly between consecutive entries.
const SEASONAL_WEIGHTS: &[((u32, u32), &[(&str, f64)])] = &[
    // Thanksgiving transition — start ramping up Christmas.
    ((11, 23), &[("fall", 0.85), ("thanksgiving", 0.15)]),
    ((11, 24), &[("fall", 0.60), ("thanksgiving", 0.40)]),
    ((11, 25), &[("thanksgiving", 1.0)]), // Thanksgiving Day
    ((11, 26), &[("thanksgiving", 0.80), ("christmas", 0.20)]),
    ((11, 28), &[("thanksgiving", 0.65), ("christmas", 0.35)]),
    ((11, 30), &[("thanksgiving", 0.50), ("christmas", 0.50)]),
    // December — Christmas ramps up.
    ((12, 2), &[("thanksgiving", 0.35), ("christmas", 0.65)]),
    ((12, 5), &[("thanksgiving", 0.20), ("christmas", 0.80)]),
    ((12, 8), &[("thanksgiving", 0.10), ("christmas", 0.90)]),
    ((12, 11), &[("christmas", 1.0)]),
    ((12, 14), &[("christmas", 1.0)]),
    ((12, 17), &[("christmas", 1.0)]),
    // Christmas peak.
    ((12, 20), &[("christmas", 1.0)]),
    ((12, 23), &[("christmas", 1.0)]),
    ((12, 24), &[("christmas", 1.0)]), // Christmas Eve
    ((12, 25), &[("christmas", 1.0)]), // Christmas Day
    // New Year's transition.
    ((12, 26), &[("christmas", 0.70), ("new_years", 0.30)]),
    ((12, 27), &[("christmas", 0.50), ("new_years", 0.50)]),
    ((12, 28), &[("christmas", 0.30), ("new_years", 0.70)]),
    ((12, 29), &[("christmas", 0.15), ("new_years", 0.85)]),
    ((12, 30), &[("new_years", 0.25), ("winter", 0.75)]),
    ((12, 31), &[("new_years", 0.90), ("winter", 0.10)]), // New Year's Eve
    ((1, 1), &[("new_years", 0.5), ("winter", 0.5)]),     // New Year's Day
    ((1, 2), &[("winter", 0.8), ("new_years", 0.2)]),
    // Winter season.
    ((1, 5), &[("winter", 1.0)]),
    ((1, 15), &[("winter", 1.0)]),
    ((2, 1), &[("winter", 1.0)]),
    ((2, 10), &[("winter", 0.90), ("valentines", 0.10)]),
    ((2, 12), &[("winter", 0.60), ("valentines", 0.40)]),
    ((2, 13), &[("winter", 0.30), ("valentines", 0.70)]),
    ((2, 14), &[("valentines", 1.0)]), // Valentine's Day
    ((2, 15), &[("winter", 1.0)]),
    ((2, 20), &[("winter", 1.0)]),
    ((2, 28), &[("winter", 1.0)]),
    // Spring transition.
    ((3, 1), &[("winter", 0.90), ("spring", 0.10)]),
    ((3, 5), &[("winter", 0.70), ("spring", 0.30)]),
    ((3, 10), &[("winter", 0.50), ("spring", 0.50)]),
    ((3, 15), &[("winter", 0.30), ("spring", 0.70)]),
    ((3, 20), &[("winter", 0.10), ("spring", 0.90)]), // Spring Equinox
    ((3, 25), &[("spring", 1.0)]),
    // Spring season.
    ((4, 1), &[("spring", 1.0)]),
    ((4, 10), &[("spring", 0.90), ("easter", 0.10)]),
    ((4, 13), &[("spring", 0.70), ("easter", 0.30)]),
    ((4, 17), &[("spring", 0.50), ("easter", 0.50)]),
    ((4, 20), &[("easter", 1.0)]), // Easter Sunday (approximate)
    ((4, 21), &[("spring", 1.0)]),
    ((5, 1), &[("spring", 1.0)]),
    ((5, 15), &[("spring", 1.0)]),
    // Summer transition.
    ((5, 20), &[("spring", 0.80), ("summer", 0.20)]),
    ((5, 25), &[("spring", 0.50), ("summer", 0.50)]),
    ((5, 31), &[("spring", 0.20), ("summer", 0.80)]),
    ((6, 3), &[("summer", 1.0)]),
    // Summer season.
    ((6, 15), &[("summer", 1.0)]),
    ((6, 28), &[("summer", 0.90), ("fourth_july", 0.10)]),
    ((7, 1), &[("summer", 0.70), ("fourth_july", 0.30)]),
    ((7, 3), &[("summer", 0.50), ("fourth_july", 0.50)]),
    ((7, 4), &[("fourth_july", 1.0)]), // Independence Day
    ((7, 5), &[("summer", 1.0)]),
    ((7, 15), &[("summer", 1.0)]),
    ((8, 1), &[("summer", 1.0)]),
    ((8, 20), &[("summer", 1.0)]),
    // Fall transition.
    ((8, 25), &[("summer", 0.85), ("fall", 0.15)]),
    ((8, 30), &[("summer", 0.60), ("fall", 0.40)]),
    ((9, 3), &[("summer", 0.40), ("fall", 0.60)]),
    ((9, 7), &[("summer", 0.20), ("fall", 0.80)]),
    ((9, 10), &[("fall", 1.0)]),
    // Fall season.
    ((9, 22), &[("fall", 1.0)]), // Fall Equinox
    ((10, 1), &[("fall", 1.0)]),
    ((10, 15), &[("fall", 1.0)]),
    ((10, 25), &[("fall", 0.85), ("halloween", 0.15)]),
    ((10, 28), &[("fall", 0.60), ("halloween", 0.40)]),
    ((10, 30), &[("fall", 0.30), ("halloween", 0.70)]),
    ((10, 31), &[("halloween", 1.0)]), // Halloween
    ((11, 1), &[("fall", 1.0)]),
    ((11, 10), &[("fall", 1.0)]),
    ((11, 20), &[("fall", 1.0)]),
];

// ── Table types ────────────────────────────────────────────────────

/// One key date: a day of year and the season weights pinned to it.
#[derive(Debug, Clone)]
pub struct Anchor {
    /// Day of year in `[1, 366]`.
    pub day: u32,
    /// Season weights at this day. Curated to sum to 1.0.
    pub weights: BTreeMap<String, f64>,
}

/// Sorted sequence of [`Anchor`]s covering the calendar year.
///
/// Built once at startup and never mutated; strictly ascending by day with
/// no duplicates.
#[derive(Debug, Clone)]
pub struct WeightTable {
    anchors: Vec<Anchor>,
}

impl WeightTable {
    /// Build the table from the built-in curated configuration.
    pub fn builtin() -> Self {
        Self::from_entries(SEASONAL_WEIGHTS)
    }

    /// Build a table from `(month, day)` keyed entries.
    ///
    /// Entries are converted to day-of-year and sorted; later duplicates of
    /// the same calendar day replace earlier ones.
    pub fn from_entries(entries: &[((u32, u32), &[(&str, f64)])]) -> Self {
        let mut by_day: BTreeMap<u32, BTreeMap<String, f64>> = BTreeMap::new();
        for ((month, day), weights) in entries {
            let Some(ordinal) = day_of_year(*month, *day) else {
                warn!("skipping weight-table entry with invalid date {month}/{day}");
                continue;
            };
            let weights = weights
                .iter()
                .map(|(id, w)| (id.to_string(), *w))
                .collect::<BTreeMap<_, _>>();
            by_day.insert(ordinal, weights);
        }

        let anchors = by_day
            .into_iter()
            .map(|(day, weights)| Anchor { day, weights })
            .collect::<Vec<_>>();
        debug!("built weight table with {} key dates", anchors.len());
        Self { anchors }
    }

    /// The sorted anchors.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Number of key dates in the table.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the table has no anchors.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Every season id referenced by any anchor, deduplicated.
    pub fn season_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .anchors
            .iter()
            .flat_map(|a| a.weights.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Validation pass: logs a warning for every anchor whose weights do not
    /// sum to 1.0 within tolerance, and returns the offending days.
    ///
    /// Mis-summed anchors degrade output quality but never block operation —
    /// the blender renormalizes interpolated results anyway.
    pub fn validate(&self) -> Vec<u32> {
        let mut bad = Vec::new();
        for anchor in &self.anchors {
            let total: f64 = anchor.weights.values().sum();
            if (total - 1.0).abs() > SUM_TOLERANCE {
                warn!(
                    "weight-table anchor at day {} sums to {total:.3}, not 1.0: {:?}",
                    anchor.day, anchor.weights
                );
                bad.push(anchor.day);
            }
        }
        bad
    }
}

/// Convert a `(month, day)` pair to a day of year using the table's fixed
/// non-leap reference year. Returns `None` for impossible dates.
pub(crate) fn day_of_year(month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(ANCHOR_YEAR, month, day).map(|d| d.ordinal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_sorted_and_deduplicated() {
        let table = WeightTable::builtin();
        assert!(!table.is_empty());

        let days: Vec<u32> = table.anchors().iter().map(|a| a.day).collect();
        let mut sorted = days.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(days, sorted, "anchors must be strictly ascending");
    }

    #[test]
    fn builtin_table_days_in_range() {
        for anchor in WeightTable::builtin().anchors() {
            assert!((1..=366).contains(&anchor.day), "day {} out of range", anchor.day);
        }
    }

    #[test]
    fn builtin_table_sums_validate() {
        let bad = WeightTable::builtin().validate();
        assert!(bad.is_empty(), "anchors with bad sums: {bad:?}");
    }

    #[test]
    fn christmas_anchor_is_pinned() {
        let table = WeightTable::builtin();
        let christmas = day_of_year(12, 25).unwrap();
        let anchor = table
            .anchors()
            .iter()
            .find(|a| a.day == christmas)
            .expect("Dec 25 must be a key date");
        assert_eq!(anchor.weights.len(), 1);
        assert_eq!(anchor.weights.get("christmas"), Some(&1.0));
    }

    #[test]
    fn season_ids_cover_all_eleven() {
        let table = WeightTable::builtin();
        let ids = table.season_ids();
        for expected in [
            "christmas",
            "easter",
            "fall",
            "fourth_july",
            "halloween",
            "new_years",
            "spring",
            "summer",
            "thanksgiving",
            "valentines",
            "winter",
        ] {
            assert!(ids.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn invalid_entry_is_skipped() {
        let table = WeightTable::from_entries(&[
            ((2, 30), &[("nowhere", 1.0)]),
            ((6, 1), &[("summer", 1.0)]),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.anchors()[0].weights.get("summer"), Some(&1.0));
    }

    #[test]
    fn validate_flags_bad_sum() {
        let table = WeightTable::from_entries(&[((6, 1), &[("summer", 0.5)])]);
        let bad = table.validate();
        assert_eq!(bad.len(), 1);
    }
}
