//! Projection of persisted sessions onto a page of buckets.
//!
//! This is the read side the UI charts consume: each bucket becomes a
//! `TimeBar` with its counters and per-activity breakdown. Bucketing is by
//! the session's local start time, matching the local-time semantics of the
//! calendar layer.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::calendar::Range;
use crate::models::FocusSession;

use super::labels::range_labels;
use super::merge::round_to_hundredths;
use super::types::{ActivityDistributionItem, SessionStatistics, TimeBar};

/// Bucket label used for sessions without an activity tag.
pub const UNTAGGED_ACTIVITY: &str = "Untagged";

fn local_start(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}

/// Fold `sessions` into one `TimeBar` per bucket. Sessions outside every
/// bucket are ignored; a session belongs to the bucket containing its local
/// start instant.
pub fn build_time_bars(sessions: &[FocusSession], buckets: &[Range]) -> Vec<TimeBar> {
    buckets
        .iter()
        .map(|bucket| build_bar(sessions, *bucket))
        .collect()
}

fn build_bar(sessions: &[FocusSession], range: Range) -> TimeBar {
    let mut statistics = SessionStatistics::default();
    let mut distribution: Vec<ActivityDistributionItem> = Vec::new();

    for session in sessions {
        if !range.contains(local_start(session.created_at)) {
            continue;
        }

        let contribution = SessionStatistics {
            sessions_amount: 1,
            spent_time_seconds: session.spent_seconds as f64,
            paused_amount: session.paused_amount,
        };
        statistics.add(&contribution);

        let name = session
            .activity_name
            .clone()
            .unwrap_or_else(|| UNTAGGED_ACTIVITY.to_string());
        match distribution.iter_mut().find(|item| item.activity_name == name) {
            Some(item) => item.statistics.add(&contribution),
            None => distribution.push(ActivityDistributionItem {
                activity_name: name,
                statistics: contribution,
                spent_time_percentage: 0.0,
                color_tag: session.color_tag.clone(),
            }),
        }
    }

    let total = statistics.spent_time_seconds;
    for item in &mut distribution {
        item.spent_time_percentage = if total > 0.0 {
            round_to_hundredths(item.statistics.spent_time_seconds / total)
        } else {
            0.0
        };
    }

    let labels = range_labels(&range);
    TimeBar {
        range,
        display_name: labels.display_name,
        detailed_display_name: labels.detailed_display_name,
        statistics,
        activity_distribution: distribution,
    }
}
