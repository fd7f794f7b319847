//! The finalized proposer-duty record and its field vocabulary.

use serde::Serialize;

/// One column of the output record. Variant order is record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Slot,
    RequestTs,
    ParentHash,
    BlockRoot,
    LocalBlockHash,
    RelayBlockHash,
    FinalStatus,
    LocalResponseMs,
    RelayResponseMs,
    RelayRevealMs,
    BroadcastDelayMs,
    RelaySuccess,
    Relay,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Slot,
        Field::RequestTs,
        Field::ParentHash,
        Field::BlockRoot,
        Field::LocalBlockHash,
        Field::RelayBlockHash,
        Field::FinalStatus,
        Field::LocalResponseMs,
        Field::RelayResponseMs,
        Field::RelayRevealMs,
        Field::BroadcastDelayMs,
        Field::RelaySuccess,
        Field::Relay,
    ];

    /// Column name as written in the record.
    pub fn name(self) -> &'static str {
        match self {
            Field::Slot => "slot",
            Field::RequestTs => "request_ts",
            Field::ParentHash => "parent_hash",
            Field::BlockRoot => "block_root",
            Field::LocalBlockHash => "local_block_hash",
            Field::RelayBlockHash => "relay_block_hash",
            Field::FinalStatus => "final_status",
            Field::LocalResponseMs => "local_response_ms",
            Field::RelayResponseMs => "relay_response_ms",
            Field::RelayRevealMs => "relay_reveal_ms",
            Field::BroadcastDelayMs => "broadcast_delay_ms",
            Field::RelaySuccess => "relay_success",
            Field::Relay => "relay",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Consolidated view of one proposer duty attempt.
///
/// Every column is a string. Columns that were never observed are empty,
/// except `local_response_ms` (`"0"`), `final_status` (`"not_included"`) and
/// `relay_success` (`"F"`), which always carry a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub slot: String,
    pub request_ts: String,
    pub parent_hash: String,
    pub block_root: String,
    pub local_block_hash: String,
    pub relay_block_hash: String,
    pub final_status: String,
    pub local_response_ms: String,
    pub relay_response_ms: String,
    pub relay_reveal_ms: String,
    pub broadcast_delay_ms: String,
    pub relay_success: String,
    pub relay: String,
}

impl Record {
    /// Build a record from values laid out in [`Field::ALL`] order.
    pub(crate) fn from_values(values: [String; 13]) -> Self {
        let [
            slot,
            request_ts,
            parent_hash,
            block_root,
            local_block_hash,
            relay_block_hash,
            final_status,
            local_response_ms,
            relay_response_ms,
            relay_reveal_ms,
            broadcast_delay_ms,
            relay_success,
            relay,
        ] = values;
        Self {
            slot,
            request_ts,
            parent_hash,
            block_root,
            local_block_hash,
            relay_block_hash,
            final_status,
            local_response_ms,
            relay_response_ms,
            relay_reveal_ms,
            broadcast_delay_ms,
            relay_success,
            relay,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.fields()[field.index()].1
    }

    /// `(name, value)` pairs in record order.
    pub fn fields(&self) -> [(&'static str, &str); 13] {
        [
            (Field::Slot.name(), self.slot.as_str()),
            (Field::RequestTs.name(), self.request_ts.as_str()),
            (Field::ParentHash.name(), self.parent_hash.as_str()),
            (Field::BlockRoot.name(), self.block_root.as_str()),
            (Field::LocalBlockHash.name(), self.local_block_hash.as_str()),
            (Field::RelayBlockHash.name(), self.relay_block_hash.as_str()),
            (Field::FinalStatus.name(), self.final_status.as_str()),
            (Field::LocalResponseMs.name(), self.local_response_ms.as_str()),
            (Field::RelayResponseMs.name(), self.relay_response_ms.as_str()),
            (Field::RelayRevealMs.name(), self.relay_reveal_ms.as_str()),
            (Field::BroadcastDelayMs.name(), self.broadcast_delay_ms.as_str()),
            (Field::RelaySuccess.name(), self.relay_success.as_str()),
            (Field::Relay.name(), self.relay.as_str()),
        ]
    }

    /// True when no event contributed anything. `slot` is ignored since the
    /// caller supplies it up front.
    pub fn is_default(&self) -> bool {
        Field::ALL
            .iter()
            .filter(|f| **f != Field::Slot)
            .all(|f| self.get(*f) == f.policy().unobserved())
    }
}

/// Render a mean with at most two decimals. Integral values keep a single
/// trailing `.0`, so `150` renders as `150.0` and `133.333…` as `133.33`.
///
/// Rounding is done on the exact binary value with ties going to the even
/// digit, so `100.125` renders as `100.12`.
pub fn render_average(mean: f64) -> String {
    let mut rendered = format!("{mean:.2}");
    while rendered.ends_with('0') && !rendered.ends_with(".0") {
        rendered.pop();
    }
    rendered
}
