//! Core engine for a personal focus-session tracker.
//!
//! Three pillars:
//!
//! - [`calendar`]: date-range classification and bucket generation. A pair
//!   of instants either matches a canonical day/week/month/year shape or is
//!   custom; canonical ranges expand into the fixed pages the UI scrolls
//!   through (7 days, the weeks of a month, 5 months, 2 years).
//! - [`analytics`]: folds persisted sessions into per-bucket statistics and
//!   activity distributions, with human-readable labels.
//! - [`timer`]: the single-session countdown state machine, its async
//!   controller, and the durable record that survives a crash.
//!
//! Sessions live in SQLite behind the [`db::Database`] facade; all
//! persisted instants are UTC and only converted to local time at the
//! bucketing boundary.

pub mod analytics;
pub mod calendar;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod timer;

pub use error::{Error, Result};
