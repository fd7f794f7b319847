//! Timestamp normalizer — target parsing and window resolution.
//!
//! Beacon node logs stamp each line with `Apr 23 19:25:10`: month, day and
//! a 24-hour time, but no year. Operators quote the proposal time as
//! `Apr-23-2025 07:25:25 PM`. Log timestamps borrow their year from the
//! target, so a window straddling New Year attributes the far side to the
//! wrong year. That behaviour is kept as-is.

use chrono::{Datelike, NaiveDateTime, TimeDelta};

use crate::error::{Error, Result};

/// Format of the operator-supplied target timestamp.
pub const TARGET_FORMAT: &str = "%b-%d-%Y %I:%M:%S %p";

/// Format of the year-less fragment at the start of each log line.
pub const LOG_FORMAT: &str = "%b %d %H:%M:%S";

const LOG_FORMAT_WITH_YEAR: &str = "%Y %b %d %H:%M:%S";

/// Inclusive `[start, end]` range of log timestamps to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// `[target - radius, target + radius]`.
    pub fn around(target: NaiveDateTime, radius_secs: u32) -> Self {
        let radius = TimeDelta::seconds(i64::from(radius_secs));
        Self {
            start: target - radius,
            end: target + radius,
        }
    }

    /// `[target, target + secs]`, the forward-only window used when dumping
    /// raw lines.
    pub fn forward(target: NaiveDateTime, secs: u32) -> Self {
        Self {
            start: target,
            end: target + TimeDelta::seconds(i64::from(secs)),
        }
    }

    /// Membership test, inclusive on both ends.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Parse a target timestamp such as `Apr-23-2025 07:25:25 PM`.
pub fn parse_target(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TARGET_FORMAT).map_err(|source| {
        Error::MalformedTimestamp {
            input: input.to_string(),
            source,
        }
    })
}

/// Parse `target` and return the symmetric window of `radius_secs` around it.
pub fn resolve_window(target: &str, radius_secs: u32) -> Result<TimeWindow> {
    parse_target(target).map(|t| TimeWindow::around(t, radius_secs))
}

/// The year every log timestamp inherits when scanning around `target`.
pub fn year_hint(target: NaiveDateTime) -> i32 {
    target.year()
}

/// Turn a year-less log fragment (`Apr 23 19:25:10`) into an absolute
/// timestamp by overlaying `year_hint`.
pub fn normalize_log_timestamp(raw: &str, year_hint: i32) -> Result<NaiveDateTime> {
    let with_year = format!("{year_hint} {raw}");
    NaiveDateTime::parse_from_str(&with_year, LOG_FORMAT_WITH_YEAR).map_err(|source| {
        Error::UnparseableLogTimestamp {
            raw: raw.to_string(),
            source,
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
