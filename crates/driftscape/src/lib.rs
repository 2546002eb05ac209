//! Date-driven seasonal scene blending and AI image prompt generation.
//!
//! `driftscape` turns a calendar date into a themed image-generation prompt.
//! The core abstraction is the [`SeasonBlender`](blend::SeasonBlender) — an
//! immutable value built once at startup that interpolates a sparse table of
//! calendar key-dates into a normalized season-weight distribution, draws one
//! season at random according to those weights, and delegates to that
//! season's prompt generator.
//!
//! # Getting started
//!
//! ```ignore
//! use driftscape::prelude::*;
//!
//! let blender = SeasonBlender::builtin()?;
//!
//! // What is active today?
//! let weights = blender.active_seasons(DateQuery::Today);
//!
//! // One themed prompt, ready for an image backend.
//! let (prompt, season_id) = blender.prompt(DateQuery::Today)?;
//! println!("[{season_id}] {prompt}");
//! ```
//!
//! # Where to find things
//!
//! - **The blending algorithm:** [`blend::SeasonBlender`] — exact-match
//!   short-circuit, linear interpolation between key dates, year wraparound,
//!   epsilon pruning, renormalization.
//! - **The weight table:** [`blend::WeightTable`] — the hand-curated
//!   `(month, day) -> {season: weight}` anchors and their validation pass.
//! - **Date resolution:** [`blend::CalendarConfig`] — "today" in a configured
//!   timezone, plus the `DATE` override escape hatch for testing.
//! - **Season content:** the [`Season`](seasons::Season) trait,
//!   [`SeasonRegistry`](seasons::SeasonRegistry), and the built-in catalog of
//!   eleven seasons/holidays.
//! - **Image backends:** [`api::ImageProvider`] — SwarmUI and
//!   OpenAI-compatible clients with transient-failure retry.
//!
//! # Design principles
//!
//! 1. **Build once, share freely.** The weight table and season registry are
//!    constructed at startup and never mutated; a [`SeasonBlender`](blend::SeasonBlender)
//!    is safe to share across tasks behind an `Arc` with no locking.
//! 2. **Exact dates win.** A key date pinned in the table (Christmas at
//!    100%) is returned verbatim — interpolation never drifts the headline
//!    days.
//! 3. **Degrade, don't crash.** Malformed overrides, mis-summed table
//!    entries, and failed generations are logged and recovered; only a
//!    season id referenced by the table but missing from the registry is a
//!    fatal configuration error.

pub mod api;
pub mod blend;
pub mod prelude;
pub mod seasons;
