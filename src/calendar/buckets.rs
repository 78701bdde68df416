//! Calendar-aligned bucket sequences and whole-page shifting.
//!
//! Each unit has a fixed page shape: a week of days, the 4-5 weeks of a
//! month, five months around a pivot, two years. Shifting a page always
//! re-runs the generator for the neighbouring pivot instead of adding an
//! offset to stale boundaries, so the 4/5-week rule and month rollover stay
//! correct.

use chrono::{Datelike, NaiveDate};

use super::math;
use super::range::{Range, RangeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Forward,
    Back,
}

impl ShiftDirection {
    fn step(self) -> i64 {
        match self {
            ShiftDirection::Forward => 1,
            ShiftDirection::Back => -1,
        }
    }
}

/// The seven dates of the Monday-aligned week containing `pivot`.
pub fn week_days(pivot: NaiveDate) -> [NaiveDate; 7] {
    let monday = math::monday_of_week(pivot);
    std::array::from_fn(|offset| math::shift_days(monday, offset as i64))
}

/// The Monday-aligned weeks of `pivot`'s month: always 4 or 5 full weeks.
///
/// The first week is the one containing the 4th of the month, which is the
/// earliest week holding the majority of its days in the month. A 5th week
/// is appended only when it holds strictly more days of `pivot`'s month
/// than of the next; the comparison is strict, so a week split 3-to-4
/// toward the next month belongs to the next month's page.
pub fn month_weeks(pivot: NaiveDate) -> Vec<Range> {
    let first_monday = math::monday_of_week(math::ymd(pivot.year(), pivot.month(), 4));

    let mut weeks: Vec<Range> = (0..4)
        .map(|index| Range::week(math::shift_days(first_monday, index * 7)))
        .collect();

    let fifth_monday = math::shift_days(first_monday, 28);
    let days_in_pivot_month = (0..7)
        .filter(|offset| {
            math::is_same_month(math::shift_days(fifth_monday, *offset), pivot)
        })
        .count();
    // The fifth week only ever straddles the pivot month and the next one.
    if days_in_pivot_month > 7 - days_in_pivot_month {
        weeks.push(Range::week(fifth_monday));
    }

    weeks
}

/// Five month ranges centered on `pivot`: two before, the pivot month, two
/// after, with year rollover.
pub fn five_months(pivot: NaiveDate) -> Vec<Range> {
    let first = math::first_of_month(pivot);
    (-2..=2)
        .map(|delta| Range::month(math::shift_months(first, delta)))
        .collect()
}

/// The year before `pivot`'s and `pivot`'s own.
pub fn two_years(pivot: NaiveDate) -> Vec<Range> {
    vec![Range::year(pivot.year() - 1), Range::year(pivot.year())]
}

/// One page of buckets for the requested unit around `pivot`.
///
/// `Custom` has no canonical page and yields no buckets; the caller renders
/// a custom range as a single bar instead.
pub fn generate_buckets(kind: RangeKind, pivot: NaiveDate) -> Vec<Range> {
    match kind {
        RangeKind::Days => week_days(pivot).iter().map(|day| Range::day(*day)).collect(),
        RangeKind::Weeks => month_weeks(pivot),
        RangeKind::Months => five_months(pivot),
        RangeKind::Years => two_years(pivot),
        RangeKind::Custom => Vec::new(),
    }
}

/// Move a page of buckets one whole page forward or back.
///
/// The next pivot is derived from the current page and fed back through
/// [`generate_buckets`], never computed by offsetting the existing
/// boundaries.
pub fn shift_buckets(buckets: &[Range], kind: RangeKind, direction: ShiftDirection) -> Vec<Range> {
    let Some(first) = buckets.first() else {
        return Vec::new();
    };
    let step = direction.step();

    let pivot = match kind {
        RangeKind::Days => math::shift_days(first.start_date(), step * 7),
        RangeKind::Weeks => {
            // The first week holds at least four days of the page's month,
            // contiguous through Sunday, so Thursday always lies inside it.
            let owning_month = math::shift_days(first.start_date(), 3);
            math::shift_months(owning_month, step as i32)
        }
        RangeKind::Months => {
            let center = math::shift_months(first.start_date(), 2);
            math::shift_months(center, step as i32 * 5)
        }
        RangeKind::Years => {
            let pivot_year = first.start_date().year() + 1;
            math::first_of_year(pivot_year + step as i32 * 2)
        }
        RangeKind::Custom => return buckets.to_vec(),
    };

    generate_buckets(kind, pivot)
}
