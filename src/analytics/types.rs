use serde::{Deserialize, Serialize};

use crate::calendar::Range;

/// Additive per-bucket session counters. Merging two instances is a
/// component-wise sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub sessions_amount: u32,
    pub spent_time_seconds: f64,
    pub paused_amount: u32,
}

impl SessionStatistics {
    pub fn add(&mut self, other: &SessionStatistics) {
        self.sessions_amount += other.sessions_amount;
        self.spent_time_seconds += other.spent_time_seconds;
        self.paused_amount += other.paused_amount;
    }
}

/// One activity's share of a bucket. The percentage is a projection of the
/// containing bucket's grand total and is recomputed after every merge;
/// only the underlying statistics are additive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDistributionItem {
    pub activity_name: String,
    pub statistics: SessionStatistics,
    pub spent_time_percentage: f64,
    pub color_tag: Option<String>,
}

/// One bucket's full analytics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBar {
    pub range: Range,
    pub display_name: String,
    pub detailed_display_name: String,
    pub statistics: SessionStatistics,
    pub activity_distribution: Vec<ActivityDistributionItem>,
}
