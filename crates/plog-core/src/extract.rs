//! Field extractor — per-event `label: value` capture rules.
//!
//! Each event kind owns a fixed list of labels. A label is looked up
//! anywhere in the line as `label: <digits>` for millisecond counters or
//! `label: 0x<hex>` for hashes. A missing label is not an error; the rule
//! simply produces no capture for that line.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{EventKind, LogLine};
use crate::record::Field;

/// What a label's value looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Decimal integer, e.g. `relay_response_ms: 120`.
    Integer,
    /// `0x`-prefixed hex string, e.g. `parent_hash: 0xabc`.
    Hex,
}

impl ValueShape {
    fn pattern(self, label: &str) -> String {
        let label = regex::escape(label);
        match self {
            ValueShape::Integer => format!(r"{label}: (\d+)"),
            ValueShape::Hex => format!(r"{label}: (0x[0-9a-fA-F]+)"),
        }
    }
}

/// `(event, label, shape, destination)`. Note that `relay_response_ms` lands
/// in a different record column depending on which event carried it.
const RULE_TABLE: &[(EventKind, &str, ValueShape, Field)] = &[
    (EventKind::BroadcastDelay, "delay_ms", ValueShape::Integer, Field::BroadcastDelayMs),
    (EventKind::BlindedPayloadRequest, "parent_hash", ValueShape::Hex, Field::ParentHash),
    (EventKind::BlindedPayloadRequest, "local_response_ms", ValueShape::Integer, Field::LocalResponseMs),
    (EventKind::BlindedPayloadRequest, "relay_response_ms", ValueShape::Integer, Field::RelayResponseMs),
    (EventKind::DualPayloadReceived, "local_block_hash", ValueShape::Hex, Field::LocalBlockHash),
    (EventKind::DualPayloadReceived, "relay_block_hash", ValueShape::Hex, Field::RelayBlockHash),
    (EventKind::RevealSuccess, "block_root", ValueShape::Hex, Field::BlockRoot),
    (EventKind::RevealSuccess, "relay_response_ms", ValueShape::Integer, Field::RelayRevealMs),
];

struct FieldRule {
    kind: EventKind,
    target: Field,
    regex: Regex,
}

static RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(kind, label, shape, target)| FieldRule {
            kind,
            target,
            regex: Regex::new(&shape.pattern(label)).expect("invalid field extraction pattern"),
        })
        .collect()
});

/// One captured value, still in its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub field: Field,
    pub raw: String,
}

/// The result of running one event kind's rules over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatch {
    pub kind: EventKind,
    pub captures: Vec<Capture>,
}

impl EventMatch {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.raw.as_str())
    }
}

/// Pull every value `kind` knows about out of `line`.
///
/// A blinded payload request additionally records the line's own timestamp
/// fragment as `request_ts`.
pub fn extract(kind: EventKind, line: &LogLine<'_>) -> EventMatch {
    let mut captures = Vec::new();

    if kind == EventKind::BlindedPayloadRequest {
        captures.push(Capture {
            field: Field::RequestTs,
            raw: line.fragment.to_string(),
        });
    }

    for rule in RULES.iter().filter(|r| r.kind == kind) {
        if let Some(m) = rule.regex.captures(line.text).and_then(|c| c.get(1)) {
            captures.push(Capture {
                field: rule.target,
                raw: m.as_str().to_string(),
            });
        }
    }

    EventMatch { kind, captures }
}
