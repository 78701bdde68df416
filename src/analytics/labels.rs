//! Display names for buckets, recomputed from the range itself.
//!
//! Split bars must never concatenate the labels of their inputs; a wider
//! range gets a fresh label derived from its new boundaries.

use crate::calendar::{Range, RangeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeLabels {
    pub display_name: String,
    pub detailed_display_name: String,
}

pub fn range_labels(range: &Range) -> RangeLabels {
    let start = range.start_date();
    let last = range.last_date();

    match range.kind() {
        RangeKind::Days => RangeLabels {
            display_name: start.format("%b %-d").to_string(),
            detailed_display_name: start.format("%A, %B %-d, %Y").to_string(),
        },
        RangeKind::Weeks => RangeLabels {
            display_name: format!("{} - {}", start.format("%b %-d"), last.format("%b %-d")),
            detailed_display_name: format!(
                "{} - {}",
                start.format("%B %-d, %Y"),
                last.format("%B %-d, %Y")
            ),
        },
        RangeKind::Months => RangeLabels {
            display_name: start.format("%b %Y").to_string(),
            detailed_display_name: start.format("%B %Y").to_string(),
        },
        RangeKind::Years => RangeLabels {
            display_name: start.format("%Y").to_string(),
            detailed_display_name: start.format("%Y").to_string(),
        },
        RangeKind::Custom => RangeLabels {
            display_name: format!("{} - {}", start.format("%b %-d"), last.format("%b %-d")),
            detailed_display_name: format!(
                "{} - {}",
                start.format("%B %-d, %Y"),
                last.format("%B %-d, %Y")
            ),
        },
    }
}
