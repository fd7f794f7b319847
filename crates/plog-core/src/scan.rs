//! Scan driver — feeds every source through classify → extract → aggregate.
//!
//! Sources are read one at a time, in order, lines in file order. A source
//! that cannot be opened is skipped; one that fails part-way keeps whatever
//! it contributed before the failure. Lines whose timestamp cannot be parsed
//! are skipped. None of these abort the scan.

use tracing::{debug, info, trace, warn};

use crate::aggregate::Aggregator;
use crate::classify::{classify, find_timestamp_fragment, match_event_kinds, LogLine};
use crate::error::Error;
use crate::extract::extract;
use crate::record::Record;
use crate::relay::RelayCheck;
use crate::source::{LineSource, Lines};
use crate::window::{normalize_log_timestamp, TimeWindow};

/// Counters describing what a scan saw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Sources that opened successfully.
    pub sources_read: usize,
    /// Sources that could not be opened.
    pub sources_skipped: usize,
    /// Sources that failed part-way through.
    pub read_errors: usize,
    pub lines_read: usize,
    pub lines_in_window: usize,
    pub unparseable_timestamps: usize,
    pub events_observed: usize,
}

/// Scan `sources` and return the finalized record.
pub fn scan<S, R>(
    sources: &[S],
    window: &TimeWindow,
    year_hint: i32,
    aggregator: &mut Aggregator<R>,
) -> Record
where
    S: LineSource,
    R: RelayCheck,
{
    scan_with_stats(sources, window, year_hint, aggregator).0
}

/// [`scan`], also returning the [`ScanStats`].
pub fn scan_with_stats<S, R>(
    sources: &[S],
    window: &TimeWindow,
    year_hint: i32,
    aggregator: &mut Aggregator<R>,
) -> (Record, ScanStats)
where
    S: LineSource,
    R: RelayCheck,
{
    let mut stats = ScanStats::default();

    for_each_line(sources, &mut stats, |line, stats| {
        scan_line(line, window, year_hint, aggregator, stats);
    });

    info!(
        slot = aggregator.slot(),
        sources_read = stats.sources_read,
        sources_skipped = stats.sources_skipped,
        lines_in_window = stats.lines_in_window,
        events = stats.events_observed,
        "scan complete"
    );

    (aggregator.finalize(), stats)
}

/// Raw text of every line whose timestamp lies in `window`, in scan order.
///
/// Unlike the aggregator, the timestamp may sit anywhere in the line.
pub fn collect_window_lines<S: LineSource>(
    sources: &[S],
    window: &TimeWindow,
    year_hint: i32,
) -> Vec<String> {
    let mut stats = ScanStats::default();
    let mut matched = Vec::new();

    for_each_line(sources, &mut stats, |line, stats| {
        let Some(fragment) = find_timestamp_fragment(line) else {
            return;
        };
        match normalize_log_timestamp(fragment, year_hint) {
            Ok(ts) if window.contains(ts) => {
                stats.lines_in_window += 1;
                matched.push(line.to_string());
            }
            Ok(_) => {}
            Err(err) => {
                stats.unparseable_timestamps += 1;
                warn!(error = %err, "skipping line");
            }
        }
    });

    info!(lines_in_window = stats.lines_in_window, "line collection complete");
    matched
}

fn for_each_line<S, F>(sources: &[S], stats: &mut ScanStats, mut on_line: F)
where
    S: LineSource,
    F: FnMut(&str, &mut ScanStats),
{
    for source in sources {
        let reader = match source.open() {
            Ok(reader) => reader,
            Err(source_err) => {
                let err = Error::SourceUnavailable {
                    name: source.name(),
                    source: source_err,
                };
                warn!(error = %err, "skipping source");
                stats.sources_skipped += 1;
                continue;
            }
        };
        stats.sources_read += 1;
        debug!(source = %source.name(), "reading source");

        for line in Lines::new(reader) {
            match line {
                Ok(line) => {
                    stats.lines_read += 1;
                    on_line(&line, stats);
                }
                Err(io_err) => {
                    let err = Error::SourceUnavailable {
                        name: source.name(),
                        source: io_err,
                    };
                    warn!(error = %err, "stopped reading source");
                    stats.read_errors += 1;
                    break;
                }
            }
        }
    }
}

fn scan_line<R: RelayCheck>(
    text: &str,
    window: &TimeWindow,
    year_hint: i32,
    aggregator: &mut Aggregator<R>,
    stats: &mut ScanStats,
) {
    let Some(fragment) = classify(text) else {
        return;
    };
    let timestamp = match normalize_log_timestamp(fragment, year_hint) {
        Ok(ts) => ts,
        Err(err) => {
            stats.unparseable_timestamps += 1;
            warn!(error = %err, "skipping line");
            return;
        }
    };
    if !window.contains(timestamp) {
        return;
    }
    stats.lines_in_window += 1;

    let line = LogLine {
        text,
        fragment,
        timestamp,
    };
    for kind in match_event_kinds(text) {
        trace!(%kind, line = text, "event matched");
        aggregator.observe(&extract(kind, &line));
        stats.events_observed += 1;
    }
}
