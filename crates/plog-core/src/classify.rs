//! Line classifier — timestamp prefix detection and event-kind dispatch.
//!
//! Event detection is a plain substring test per kind, walked in the fixed
//! order of [`DISPATCH`]. `BroadcastDelay` is tested on its own; the other
//! four kinds form an exclusive chain where the first hit wins. A single line
//! can therefore yield a broadcast delay *and* one chained kind, never two
//! chained kinds.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// `Apr 23 19:25:10` at the very start of the line.
static TIMESTAMP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w{3} \d{2} \d{2}:\d{2}:\d{2})").expect("invalid timestamp prefix pattern")
});

/// Same shape, anywhere in the line.
static TIMESTAMP_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w{3} \d{2} \d{2}:\d{2}:\d{2})").expect("invalid timestamp pattern")
});

/// Proposer-duty events recognised in beacon node logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    BroadcastDelay,
    BlindedPayloadRequest,
    DualPayloadReceived,
    RevealSuccess,
    SignedBlockReceived,
}

impl EventKind {
    /// The phrase whose presence marks a line as this event.
    pub fn trigger(self) -> &'static str {
        match self {
            EventKind::BroadcastDelay => "Block broadcast was delayed",
            EventKind::BlindedPayloadRequest => "Requested blinded execution payload",
            EventKind::DualPayloadReceived => "Received local and builder payloads",
            EventKind::RevealSuccess => "Builder successfully revealed payload",
            EventKind::SignedBlockReceived => "Signed block received in HTTP API",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::BroadcastDelay => write!(f, "broadcast_delay"),
            EventKind::BlindedPayloadRequest => write!(f, "blinded_payload_request"),
            EventKind::DualPayloadReceived => write!(f, "dual_payload_received"),
            EventKind::RevealSuccess => write!(f, "reveal_success"),
            EventKind::SignedBlockReceived => write!(f, "signed_block_received"),
        }
    }
}

/// How a dispatch entry interacts with the entries around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    /// Tested regardless of any other match.
    Independent,
    /// Skipped once an earlier `Exclusive` entry matched.
    Exclusive,
}

/// Ordered dispatch table from trigger phrase to event kind.
pub const DISPATCH: [(EventKind, Matching); 5] = [
    (EventKind::BroadcastDelay, Matching::Independent),
    (EventKind::BlindedPayloadRequest, Matching::Exclusive),
    (EventKind::DualPayloadReceived, Matching::Exclusive),
    (EventKind::RevealSuccess, Matching::Exclusive),
    (EventKind::SignedBlockReceived, Matching::Exclusive),
];

/// A line that carried a parseable timestamp, as handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    /// The full line, trailing newline stripped.
    pub text: &'a str,
    /// The `Apr 23 19:25:10` fragment exactly as it appeared.
    pub fragment: &'a str,
    /// `fragment` with the scan's year hint applied.
    pub timestamp: NaiveDateTime,
}

/// Return the leading timestamp fragment, or `None` when the line does not
/// start with one. Such lines are ignored by the aggregator whatever they say.
pub fn classify(line: &str) -> Option<&str> {
    TIMESTAMP_PREFIX
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Like [`classify`], but the fragment may appear anywhere in the line.
pub fn find_timestamp_fragment(line: &str) -> Option<&str> {
    TIMESTAMP_ANYWHERE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Every event kind the line triggers, in dispatch order.
pub fn match_event_kinds(line: &str) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    let mut chain_matched = false;

    for (kind, matching) in DISPATCH {
        if matching == Matching::Exclusive && chain_matched {
            continue;
        }
        if line.contains(kind.trigger()) {
            kinds.push(kind);
            if matching == Matching::Exclusive {
                chain_matched = true;
            }
        }
    }

    kinds
}
