//! Merging and re-splitting of per-bucket statistics.

use std::collections::HashMap;

use crate::calendar::Range;
use crate::error::{Error, Result};

use super::labels::{range_labels, RangeLabels};
use super::types::{ActivityDistributionItem, SessionStatistics, TimeBar};

/// Component-wise sum; an empty input folds to all-zero.
pub fn merge_statistics<I>(items: I) -> SessionStatistics
where
    I: IntoIterator<Item = SessionStatistics>,
{
    let mut merged = SessionStatistics::default();
    for item in items {
        merged.add(&item);
    }
    merged
}

/// Round half-up at the third decimal, matching how the percentages are
/// rendered. Percentages from different denominators are never summed; the
/// statistics are combined first and every share is recomputed here.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combine activity breakdowns from several buckets into one.
///
/// Activities are matched by name (the natural key of this projection);
/// statistics of matching names are summed, non-matching ones are carried
/// through, and every share is recomputed against the merged grand total.
pub fn merge_activity_distributions(
    lists: &[Vec<ActivityDistributionItem>],
) -> Vec<ActivityDistributionItem> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, ActivityDistributionItem> = HashMap::new();

    for list in lists {
        for item in list {
            match by_name.get_mut(&item.activity_name) {
                Some(merged) => merged.statistics.add(&item.statistics),
                None => {
                    order.push(item.activity_name.clone());
                    by_name.insert(item.activity_name.clone(), item.clone());
                }
            }
        }
    }

    let grand_total: f64 = by_name
        .values()
        .map(|item| item.statistics.spent_time_seconds)
        .sum();

    order
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .map(|mut item| {
            item.spent_time_percentage = if grand_total > 0.0 {
                round_to_hundredths(item.statistics.spent_time_seconds / grand_total)
            } else {
                0.0
            };
            item
        })
        .collect()
}

/// Re-partition `bars` into `parts` aggregated bars.
///
/// Consumes the input in order in chunks of `ceil(len / parts)` (the last
/// chunk may be shorter). Each output bar spans from its first input's start
/// to its last input's end, sums the statistics, merges the distributions
/// and gets labels recomputed from the widened range. Totals are conserved:
/// nothing is created or lost by aggregation.
pub fn split_time_bars(bars: Vec<TimeBar>, parts: usize) -> Result<Vec<TimeBar>> {
    split_time_bars_with(bars, parts, range_labels)
}

pub fn split_time_bars_with<F>(bars: Vec<TimeBar>, parts: usize, labeler: F) -> Result<Vec<TimeBar>>
where
    F: Fn(&Range) -> RangeLabels,
{
    // Empty input is empty output no matter what `parts` says: zero bars
    // split into zero parts is still zero bars.
    if bars.is_empty() {
        return Ok(Vec::new());
    }
    if parts == 0 {
        return Err(Error::Validation("parts must be a positive integer".into()));
    }
    if parts > bars.len() {
        return Err(Error::Validation(
            "parts must be less or equal to time bars length".into(),
        ));
    }

    let part_size = bars.len().div_ceil(parts);
    let mut merged = Vec::with_capacity(parts);

    for chunk in bars.chunks(part_size) {
        let first = &chunk[0];
        let last = &chunk[chunk.len() - 1];
        let range = Range::span(first.range.from, last.range.to);
        let labels = labeler(&range);
        let distributions: Vec<Vec<ActivityDistributionItem>> = chunk
            .iter()
            .map(|bar| bar.activity_distribution.clone())
            .collect();

        merged.push(TimeBar {
            range,
            display_name: labels.display_name,
            detailed_display_name: labels.detailed_display_name,
            statistics: merge_statistics(chunk.iter().map(|bar| bar.statistics)),
            activity_distribution: merge_activity_distributions(&distributions),
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(sessions: u32, spent: f64, paused: u32) -> SessionStatistics {
        SessionStatistics {
            sessions_amount: sessions,
            spent_time_seconds: spent,
            paused_amount: paused,
        }
    }

    fn item(name: &str, spent: f64) -> ActivityDistributionItem {
        ActivityDistributionItem {
            activity_name: name.into(),
            statistics: stats(1, spent, 0),
            spent_time_percentage: 1.0,
            color_tag: None,
        }
    }

    #[test]
    fn merge_of_nothing_is_zero() {
        assert_eq!(merge_statistics([]), SessionStatistics::default());
    }

    #[test]
    fn merge_is_identity_on_singletons() {
        let single = stats(3, 120.0, 2);
        assert_eq!(merge_statistics([single]), single);
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let a = stats(1, 10.0, 0);
        let b = stats(2, 20.5, 1);
        let c = stats(4, 0.5, 3);
        assert_eq!(merge_statistics([a, b]), merge_statistics([b, a]));
        assert_eq!(
            merge_statistics([merge_statistics([a, b]), c]),
            merge_statistics([a, merge_statistics([b, c])])
        );
        assert_eq!(merge_statistics([a, b, c]), stats(7, 31.0, 4));
    }

    #[test]
    fn distributions_match_by_name_and_recompute_shares() {
        let merged = merge_activity_distributions(&[
            vec![item("reading", 30.0), item("writing", 10.0)],
            vec![item("reading", 30.0), item("chess", 30.0)],
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].activity_name, "reading");
        assert_eq!(merged[0].statistics.spent_time_seconds, 60.0);
        assert_eq!(merged[0].spent_time_percentage, 0.6);
        assert_eq!(merged[1].spent_time_percentage, 0.1);
        assert_eq!(merged[2].spent_time_percentage, 0.3);
    }

    #[test]
    fn share_rounding_is_half_up_at_the_third_decimal() {
        // 1/3 and 2/3 of the total
        let merged = merge_activity_distributions(&[vec![item("a", 1.0), item("b", 2.0)]]);
        assert_eq!(merged[0].spent_time_percentage, 0.33);
        assert_eq!(merged[1].spent_time_percentage, 0.67);
        // 0.125 rounds up to 0.13
        let merged = merge_activity_distributions(&[vec![item("a", 1.0), item("b", 7.0)]]);
        assert_eq!(merged[0].spent_time_percentage, 0.13);
        assert_eq!(merged[1].spent_time_percentage, 0.88);
    }

    #[test]
    fn zero_grand_total_yields_zero_shares() {
        let merged = merge_activity_distributions(&[vec![item("idle", 0.0)]]);
        assert_eq!(merged[0].spent_time_percentage, 0.0);
    }

    #[test]
    fn empty_distribution_input_is_empty() {
        assert!(merge_activity_distributions(&[]).is_empty());
        assert!(merge_activity_distributions(&[Vec::new()]).is_empty());
    }
}
