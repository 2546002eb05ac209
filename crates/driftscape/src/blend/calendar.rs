//! Day-of-year resolution: explicit date, environment override, or "today"
//! in a configured timezone.
//!
//! The seasonal "today" must be consistent across deployment environments,
//! so the clock is read in a fixed configured timezone (default US Pacific)
//! rather than the host's local zone. A `DATE` override (for testing and
//! previews) accepts `YYYY-MM-DD` or `MM-DD`; malformed values log a warning
//! and fall back to the real current date.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

/// Default timezone for "today" calculations.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Explicit configuration for date resolution.
///
/// Carries the timezone and the optional override string as plain fields so
/// resolution stays a pure function of `(input, config)` — the environment
/// is only consulted by [`CalendarConfig::from_env`].
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Timezone used for "today" and for the year of `MM-DD` overrides.
    pub timezone: Tz,
    /// Optional date override, `YYYY-MM-DD` or `MM-DD`.
    pub date_override: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            date_override: None,
        }
    }
}

impl CalendarConfig {
    /// Build from the `TIMEZONE` and `DATE` environment variables.
    ///
    /// An unrecognized `TIMEZONE` value logs a warning and keeps the
    /// default; `DATE` is stored as-is and validated at resolution time.
    pub fn from_env() -> Self {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                warn!("unrecognized TIMEZONE {name:?}, using {DEFAULT_TIMEZONE}");
                DEFAULT_TIMEZONE
            }),
            Err(_) => DEFAULT_TIMEZONE,
        };
        let date_override = std::env::var("DATE").ok().filter(|s| !s.is_empty());
        Self {
            timezone,
            date_override,
        }
    }

    /// The current date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Resolve a possibly-absent date to a day of year in `[1, 366]`.
    ///
    /// Precedence: explicit `date` argument, then the configured override,
    /// then today. Never fails for valid calendar dates — a malformed
    /// override warns and falls back to today.
    pub fn resolve_day_of_year(&self, date: Option<NaiveDate>) -> u32 {
        if let Some(date) = date {
            return date.ordinal();
        }

        if let Some(ref raw) = self.date_override {
            match self.parse_override(raw) {
                Some(date) => {
                    info!("using DATE override {date} (day {})", date.ordinal());
                    return date.ordinal();
                }
                None => {
                    warn!("invalid DATE override {raw:?}, using current date");
                }
            }
        }

        self.today().ordinal()
    }

    /// Parse an override string. `MM-DD` is interpreted against the current
    /// year in the configured timezone.
    fn parse_override(&self, raw: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = raw.split('-').collect();
        match parts.as_slice() {
            [month, day] => {
                let month = month.parse::<u32>().ok()?;
                let day = day.parse::<u32>().ok()?;
                NaiveDate::from_ymd_opt(self.today().year(), month, day)
            }
            _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(date_override: Option<&str>) -> CalendarConfig {
        CalendarConfig {
            timezone: DEFAULT_TIMEZONE,
            date_override: date_override.map(str::to_string),
        }
    }

    #[test]
    fn explicit_date_wins() {
        let cfg = config(Some("2025-01-01"));
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(cfg.resolve_day_of_year(Some(date)), 185);
    }

    #[test]
    fn january_first_is_day_one() {
        let cfg = config(None);
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(cfg.resolve_day_of_year(Some(date)), 1);
    }

    #[test]
    fn leap_year_reaches_366() {
        let cfg = config(None);
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(cfg.resolve_day_of_year(Some(date)), 366);
    }

    #[test]
    fn full_override_resolves() {
        let cfg = config(Some("2025-12-25"));
        assert_eq!(cfg.resolve_day_of_year(None), 359);
    }

    #[test]
    fn short_override_uses_current_year() {
        let cfg = config(Some("12-25"));
        let day = cfg.resolve_day_of_year(None);
        // Day 359 in common years, 360 in leap years.
        assert!(day == 359 || day == 360, "got {day}");
    }

    #[test]
    fn malformed_override_falls_back_to_today() {
        for raw in ["invalid-date", "13-45", "2025-2-30", "garbage"] {
            let cfg = config(Some(raw));
            let day = cfg.resolve_day_of_year(None);
            assert!((1..=366).contains(&day), "override {raw:?} gave {day}");
        }
    }

    #[test]
    fn today_is_in_range() {
        let day = config(None).resolve_day_of_year(None);
        assert!((1..=366).contains(&day));
    }
}
