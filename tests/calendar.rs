//! End-to-end checks of bucket generation and page shifting across real
//! calendar years, including every 4/5-week month page of 2024 and 2025.

use chrono::{Datelike, NaiveDate, Weekday};
use tempo::calendar::{classify, generate_buckets, shift_buckets, Range, RangeKind, ShiftDirection};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// (year, month, first Monday of the page, week count), hand-checked
/// against a printed calendar.
const MONTH_PAGES: &[(i32, u32, (i32, u32, u32), usize)] = &[
    (2024, 1, (2024, 1, 1), 4),
    (2024, 2, (2024, 1, 29), 5),
    (2024, 3, (2024, 3, 4), 4),
    (2024, 4, (2024, 4, 1), 4),
    (2024, 5, (2024, 4, 29), 5),
    (2024, 6, (2024, 6, 3), 4),
    (2024, 7, (2024, 7, 1), 4),
    (2024, 8, (2024, 7, 29), 5),
    (2024, 9, (2024, 9, 2), 4),
    (2024, 10, (2024, 9, 30), 5),
    (2024, 11, (2024, 11, 4), 4),
    (2024, 12, (2024, 12, 2), 4),
    (2025, 1, (2024, 12, 30), 5),
    (2025, 2, (2025, 2, 3), 4),
    (2025, 3, (2025, 3, 3), 4),
    (2025, 4, (2025, 3, 31), 4),
    (2025, 5, (2025, 4, 28), 5),
    (2025, 6, (2025, 6, 2), 4),
    (2025, 7, (2025, 6, 30), 5),
    (2025, 8, (2025, 8, 4), 4),
    (2025, 9, (2025, 9, 1), 4),
    (2025, 10, (2025, 9, 29), 5),
    (2025, 11, (2025, 11, 3), 4),
    (2025, 12, (2025, 12, 1), 4),
];

#[test]
fn month_pages_match_two_full_years_of_fixtures() {
    for &(year, month, (fy, fm, fd), weeks) in MONTH_PAGES {
        let page = generate_buckets(RangeKind::Weeks, ymd(year, month, 15));
        assert_eq!(
            page[0].start_date(),
            ymd(fy, fm, fd),
            "first Monday of {year}-{month:02}"
        );
        assert_eq!(page.len(), weeks, "week count of {year}-{month:02}");
        for week in &page {
            assert_eq!(week.start_date().weekday(), Weekday::Mon);
            assert_eq!(week.kind(), RangeKind::Weeks);
        }
    }
}

#[test]
fn consecutive_month_pages_tile_without_gap_or_overlap() {
    for window in MONTH_PAGES.windows(2) {
        let (year, month, ..) = window[0];
        let (next_year, next_month, ..) = window[1];
        let page = generate_buckets(RangeKind::Weeks, ymd(year, month, 15));
        let next = generate_buckets(RangeKind::Weeks, ymd(next_year, next_month, 15));
        assert_eq!(
            page.last().unwrap().to,
            next[0].from,
            "{year}-{month:02} must hand off exactly to {next_year}-{next_month:02}"
        );
    }
}

#[test]
fn shifting_weeks_forward_walks_the_fixture_pages() {
    let mut page = generate_buckets(RangeKind::Weeks, ymd(2024, 1, 15));
    for &(year, month, (fy, fm, fd), weeks) in MONTH_PAGES {
        assert_eq!(
            page[0].start_date(),
            ymd(fy, fm, fd),
            "walking into {year}-{month:02}"
        );
        assert_eq!(page.len(), weeks);
        page = shift_buckets(&page, RangeKind::Weeks, ShiftDirection::Forward);
    }
    // January 2026 follows December 2025
    assert_eq!(page[0].start_date(), ymd(2025, 12, 29));
}

#[test]
fn shifting_back_inverts_shifting_forward_for_every_kind() {
    let pivot = ymd(2025, 7, 10);
    for kind in [
        RangeKind::Days,
        RangeKind::Weeks,
        RangeKind::Months,
        RangeKind::Years,
    ] {
        let page = generate_buckets(kind, pivot);
        let forward = shift_buckets(&page, kind, ShiftDirection::Forward);
        assert_ne!(forward, page);
        assert_eq!(shift_buckets(&forward, kind, ShiftDirection::Back), page);
    }
}

#[test]
fn generated_buckets_classify_as_their_own_kind() {
    let pivot = ymd(2024, 2, 29);
    for kind in [
        RangeKind::Days,
        RangeKind::Weeks,
        RangeKind::Months,
        RangeKind::Years,
    ] {
        for bucket in generate_buckets(kind, pivot) {
            assert_eq!(classify(bucket.from, bucket.to), kind);
        }
    }
}

#[test]
fn days_page_always_contains_its_pivot() {
    for day in 1..=31 {
        let pivot = ymd(2025, 1, day);
        let page = generate_buckets(RangeKind::Days, pivot);
        assert_eq!(page.len(), 7);
        assert!(page
            .iter()
            .any(|bucket| bucket.start_date() == pivot));
    }
}

#[test]
fn range_constructor_feeds_the_classifier() {
    let range = Range::new(
        ymd(2025, 3, 3).and_hms_opt(0, 0, 0).unwrap(),
        ymd(2025, 3, 10).and_hms_opt(0, 0, 0).unwrap(),
    )
    .unwrap();
    assert_eq!(range.kind(), RangeKind::Weeks);

    let skewed = Range::new(
        ymd(2025, 3, 3).and_hms_opt(9, 30, 0).unwrap(),
        ymd(2025, 3, 10).and_hms_opt(0, 0, 0).unwrap(),
    )
    .unwrap();
    assert_eq!(skewed.kind(), RangeKind::Custom);
}
