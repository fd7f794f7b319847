//! plog-core — log-window aggregation engine.
//!
//! Scans rotated beacon node logs for the lines around a block proposal and
//! folds the scattered per-event fields (latencies, hashes, success flags)
//! into one [`Record`] describing the proposer duty attempt.
//!
//! # Architecture
//!
//! ```text
//! sources ──► classify ──► extract ──► aggregate ──► Record
//!               ▲
//!             window
//! ```
//!
//! Data only flows left to right. The single [`Aggregator`] is owned by the
//! caller and threaded through the scan by `&mut`.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod record;
pub mod relay;
pub mod scan;
pub mod source;
pub mod window;

pub use aggregate::{Aggregator, FieldPolicy};
pub use classify::EventKind;
pub use error::{Error, Result};
pub use record::{Field, Record};
pub use relay::{NoRelayCheck, RelayCheck};
pub use scan::{collect_window_lines, scan, scan_with_stats, ScanStats};
pub use source::{FileSource, LineSource, MemorySource};
pub use window::{resolve_window, TimeWindow};

/// Aggregate every proposer event within `radius_secs` of `target`.
///
/// `target` looks like `Apr-23-2025 07:25:25 PM`; log lines inherit its
/// year. Only a malformed `target` is an error: unreadable sources and bad
/// lines are skipped, and a scan that finds nothing returns the default
/// record.
pub fn aggregate_window<S, R>(
    target: &str,
    radius_secs: u32,
    slot: u64,
    sources: &[S],
    relay: R,
) -> Result<Record>
where
    S: LineSource,
    R: RelayCheck,
{
    let target = window::parse_target(target)?;
    let window = TimeWindow::around(target, radius_secs);
    let mut aggregator = Aggregator::new(slot, relay);
    Ok(scan(sources, &window, window::year_hint(target), &mut aggregator))
}
