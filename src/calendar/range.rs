//! The `Range` value type and the canonical-unit classifier.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::math;

/// What calendar unit a `[from, to)` pair represents. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeKind {
    Days,
    Weeks,
    Months,
    Years,
    Custom,
}

/// A half-open `[from, to)` pair of local instants with `from < to`.
///
/// Ranges are immutable values; shifting or widening always produces a new
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Range {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Result<Self> {
        if from >= to {
            return Err(Error::Validation(format!(
                "range start {from} must precede range end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Internal constructor for boundaries the generators already ordered.
    pub(crate) fn span(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        debug_assert!(from < to);
        Self { from, to }
    }

    /// The full local day containing `date`.
    pub fn day(date: NaiveDate) -> Self {
        Self::span(
            math::start_of_day(date),
            math::start_of_day(math::shift_days(date, 1)),
        )
    }

    /// The Monday-aligned week starting at `monday`.
    pub fn week(monday: NaiveDate) -> Self {
        Self::span(
            math::start_of_day(monday),
            math::start_of_day(math::shift_days(monday, 7)),
        )
    }

    /// The calendar month containing `date`.
    pub fn month(date: NaiveDate) -> Self {
        Self::span(
            math::start_of_day(math::first_of_month(date)),
            math::start_of_day(math::start_of_next_month(date)),
        )
    }

    /// The calendar year `year`.
    pub fn year(year: i32) -> Self {
        Self::span(
            math::start_of_day(math::first_of_year(year)),
            math::start_of_day(math::first_of_year(year + 1)),
        )
    }

    pub fn kind(&self) -> RangeKind {
        classify(self.from, self.to)
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.from <= at && at < self.to
    }

    pub fn start_date(&self) -> NaiveDate {
        self.from.date()
    }

    /// Last calendar day the range touches, for display purposes.
    pub fn last_date(&self) -> NaiveDate {
        let end = self.to - chrono::Duration::milliseconds(1);
        end.date()
    }
}

/// Decide whether `[from, to)` is a canonical day/week/month/year or a
/// custom range. A boundary off by a single millisecond is `Custom`; nothing
/// is ever rounded into place, since UI mode switching keys off an exact
/// match.
pub fn classify(from: NaiveDateTime, to: NaiveDateTime) -> RangeKind {
    if is_day_pair(from, to) {
        RangeKind::Days
    } else if is_week_pair(from, to) {
        RangeKind::Weeks
    } else if is_month_pair(from, to) {
        RangeKind::Months
    } else if is_year_pair(from, to) {
        RangeKind::Years
    } else {
        RangeKind::Custom
    }
}

fn is_midnight(at: NaiveDateTime) -> bool {
    at.time() == NaiveTime::MIN
}

fn is_last_millisecond(at: NaiveDateTime) -> bool {
    at.time() == math::last_millisecond()
}

/// Producers use either the half-open `[00:00, next 00:00)` convention or
/// the inclusive `[00:00, 23:59:59.999]` one; both must classify the same.
fn is_day_pair(from: NaiveDateTime, to: NaiveDateTime) -> bool {
    if !is_midnight(from) {
        return false;
    }
    let exclusive = is_midnight(to) && to.date() == math::shift_days(from.date(), 1);
    let inclusive = is_last_millisecond(to) && to.date() == from.date();
    exclusive || inclusive
}

fn is_week_pair(from: NaiveDateTime, to: NaiveDateTime) -> bool {
    if !is_midnight(from) || from.date().weekday() != Weekday::Mon {
        return false;
    }
    let exclusive = is_midnight(to) && to.date() == math::shift_days(from.date(), 7);
    let inclusive = is_last_millisecond(to) && to.date() == math::shift_days(from.date(), 6);
    exclusive || inclusive
}

fn is_month_pair(from: NaiveDateTime, to: NaiveDateTime) -> bool {
    is_midnight(from)
        && is_midnight(to)
        && from.date().day() == 1
        && to.date() == math::start_of_next_month(from.date())
}

fn is_year_pair(from: NaiveDateTime, to: NaiveDateTime) -> bool {
    is_midnight(from)
        && is_midnight(to)
        && from.date() == math::first_of_year(from.date().year())
        && to.date() == math::first_of_year(from.date().year() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::math::ymd;
    use chrono::Duration;

    fn at(date: NaiveDate) -> NaiveDateTime {
        math::start_of_day(date)
    }

    #[test]
    fn classifies_both_day_representations() {
        let day = ymd(2025, 3, 5);
        assert_eq!(classify(at(day), at(ymd(2025, 3, 6))), RangeKind::Days);
        assert_eq!(classify(at(day), math::end_of_day(day)), RangeKind::Days);
    }

    #[test]
    fn classifies_both_week_representations() {
        let monday = ymd(2025, 3, 3);
        assert_eq!(classify(at(monday), at(ymd(2025, 3, 10))), RangeKind::Weeks);
        assert_eq!(
            classify(at(monday), math::end_of_day(ymd(2025, 3, 9))),
            RangeKind::Weeks
        );
        // Not Monday-aligned
        assert_eq!(
            classify(at(ymd(2025, 3, 4)), at(ymd(2025, 3, 11))),
            RangeKind::Custom
        );
    }

    #[test]
    fn classifies_months_including_december_rollover() {
        assert_eq!(
            classify(at(ymd(2025, 2, 1)), at(ymd(2025, 3, 1))),
            RangeKind::Months
        );
        assert_eq!(
            classify(at(ymd(2024, 12, 1)), at(ymd(2025, 1, 1))),
            RangeKind::Months
        );
        // Two months is not a canonical month
        assert_eq!(
            classify(at(ymd(2025, 1, 1)), at(ymd(2025, 3, 1))),
            RangeKind::Custom
        );
    }

    #[test]
    fn classifies_years() {
        assert_eq!(
            classify(at(ymd(2024, 1, 1)), at(ymd(2025, 1, 1))),
            RangeKind::Years
        );
        assert_eq!(
            classify(at(ymd(2024, 1, 1)), at(ymd(2026, 1, 1))),
            RangeKind::Custom
        );
    }

    #[test]
    fn one_millisecond_perturbation_turns_custom() {
        let cases = [
            (at(ymd(2025, 3, 5)), at(ymd(2025, 3, 6))),
            (at(ymd(2025, 3, 3)), at(ymd(2025, 3, 10))),
            (at(ymd(2025, 2, 1)), at(ymd(2025, 3, 1))),
            (at(ymd(2024, 1, 1)), at(ymd(2025, 1, 1))),
        ];
        let ms = Duration::milliseconds(1);
        for (from, to) in cases {
            assert_ne!(classify(from, to), RangeKind::Custom);
            assert_eq!(classify(from + ms, to), RangeKind::Custom);
            assert_eq!(classify(from, to + ms), RangeKind::Custom);
            assert_eq!(classify(from, to - ms - ms), RangeKind::Custom);
        }
    }

    #[test]
    fn range_new_rejects_inverted_bounds() {
        let from = at(ymd(2025, 3, 5));
        assert!(Range::new(from, from).is_err());
        assert!(Range::new(from, from - Duration::days(1)).is_err());
        assert!(Range::new(from, from + Duration::hours(1)).is_ok());
    }

    #[test]
    fn last_date_is_inclusive_end() {
        assert_eq!(Range::day(ymd(2025, 3, 5)).last_date(), ymd(2025, 3, 5));
        assert_eq!(Range::week(ymd(2025, 3, 3)).last_date(), ymd(2025, 3, 9));
        assert_eq!(Range::month(ymd(2025, 2, 14)).last_date(), ymd(2025, 2, 28));
    }
}
