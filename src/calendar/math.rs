//! Pure calendar arithmetic over `chrono` naive dates.
//!
//! Every helper returns a fresh value; nothing here mutates in place, so
//! bucket sequences can share dates freely across shift operations.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Construct a date from components that are known to be valid.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Inclusive end-of-day representation (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(last_millisecond())
}

pub(crate) fn last_millisecond() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid literal time")
}

pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    date + Duration::days(delta)
}

/// Monday of the week containing `date`. Sunday counts as the seventh day of
/// the week, so it lands in the week that started six days earlier.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    shift_days(date, -(date.weekday().num_days_from_monday() as i64))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    ymd(date.year(), date.month(), 1)
}

pub fn start_of_next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(shift_months(first_of_month(date), 1))
}

pub fn first_of_year(year: i32) -> NaiveDate {
    ymd(year, 1, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = ymd(year, month, 1);
    let next = if month == 12 {
        ymd(year + 1, 1, 1)
    } else {
        ymd(year, month + 1, 1)
    };
    (next - first).num_days() as u32
}

/// Step `delta` whole months with year rollover, clamping the day-of-month
/// so Jan 31 + 1 month lands on the last day of February.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month0() as i32 + delta;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    ymd(year, month, day)
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

pub fn is_same_week(a: NaiveDate, b: NaiveDate) -> bool {
    monday_of_week(a) == monday_of_week(b)
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn is_same_year(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year()
}
