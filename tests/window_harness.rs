#![allow(unused)]
//! Window resolution harness.
//!
//! # What this covers
//!
//! - **Symmetry**: for any valid target `T` and radius `R`, the window is
//!   exactly `[T - R, T + R]` and `start <= end`. Verified with proptest.
//! - **Year overlay**: a log fragment normalised against year `Y` keeps its
//!   month, day and time and takes `Y` as its year, whatever `Y` is.
//! - **Boundaries**: lines stamped exactly at `start` or `end` are kept; one
//!   second outside either end is dropped.
//!
//! # What this does NOT cover
//!
//! - Inferring the right year across New Year. Log lines always inherit the
//!   target's year.
//!
//! # Running
//!
//! ```sh
//! cargo test --test window_harness
//! ```

mod common;
use common::*;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use plog_core::window::{normalize_log_timestamp, parse_target, TARGET_FORMAT};
use plog_core::{resolve_window, Aggregator, MemorySource, TimeWindow};
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[rstest]
#[case::one_before_start("Apr 23 19:25:09", false)]
#[case::at_start("Apr 23 19:25:10", true)]
#[case::at_target("Apr 23 19:25:25", true)]
#[case::at_end("Apr 23 19:25:40", true)]
#[case::one_after_end("Apr 23 19:25:41", false)]
fn window_is_inclusive_on_both_ends(#[case] stamp: &str, #[case] included: bool) {
    let src = MemorySource::from_lines("beacon.log", &[signed_block(stamp)]);
    let window = resolve_window(TARGET, RADIUS).unwrap();
    let mut agg = Aggregator::without_relay(SLOT);
    let record = plog_core::scan(&[src], &window, 2025, &mut agg);

    let expected = if included { "included" } else { "not_included" };
    assert_eq!(record.final_status, expected, "line stamped {stamp}");
}

#[test]
fn sub_second_precision_is_truncated_by_the_fragment() {
    // `19:25:40.999` is one millisecond short of 19:25:41, and the fragment
    // only carries whole seconds, so it counts as 19:25:40.
    let src = MemorySource::from_lines(
        "beacon.log",
        &["Apr 23 19:25:40.999 INFO Signed block received in HTTP API"],
    );
    let window = resolve_window(TARGET, RADIUS).unwrap();
    let mut agg = Aggregator::without_relay(SLOT);
    let record = plog_core::scan(&[src], &window, 2025, &mut agg);
    assert_eq!(record.final_status, "included");
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

fn any_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1971i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap()
        },
    )
}

proptest! {
    /// `resolve_window(T, R)` is `[T - R, T + R]` for any rendered target.
    #[test]
    fn prop_window_is_symmetric(target in any_datetime(), radius in 0u32..86_400) {
        let rendered = target.format(TARGET_FORMAT).to_string();
        let window = resolve_window(&rendered, radius).unwrap();
        let r = TimeDelta::seconds(i64::from(radius));
        prop_assert_eq!(window.start, target - r);
        prop_assert_eq!(window.end, target + r);
        prop_assert!(window.start <= window.end);
        prop_assert!(window.contains(target));
    }

    /// The fragment's month/day/time survive; the year is always the hint.
    #[test]
    fn prop_year_is_overlaid(stamp in any_datetime(), hint in 1971i32..2100) {
        let fragment = stamp.format("%b %d %H:%M:%S").to_string();
        let ts = normalize_log_timestamp(&fragment, hint).unwrap();
        prop_assert_eq!(ts.year(), hint);
        prop_assert_eq!(ts.month(), stamp.month());
        prop_assert_eq!(ts.day(), stamp.day());
        prop_assert_eq!(ts.num_seconds_from_midnight(), stamp.num_seconds_from_midnight());
    }

    /// A target rendered in the operator format parses back to itself.
    #[test]
    fn prop_target_format_round_trips(target in any_datetime()) {
        let rendered = target.format(TARGET_FORMAT).to_string();
        prop_assert_eq!(parse_target(&rendered).unwrap(), target);
    }
}
