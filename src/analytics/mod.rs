pub mod labels;
pub mod merge;
pub mod project;
pub mod types;

pub use labels::{range_labels, RangeLabels};
pub use merge::{merge_activity_distributions, merge_statistics, split_time_bars};
pub use project::build_time_bars;
pub use types::{ActivityDistributionItem, SessionStatistics, TimeBar};
