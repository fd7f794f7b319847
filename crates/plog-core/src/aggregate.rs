//! Aggregator — folds event observations into one record.
//!
//! Every column has a reduction policy, declared once in [`Field::policy`].
//! The aggregator holds one cell per column, created from that policy,
//! and routes every captured value through it. There are no per-field
//! special cases beyond the two event-driven latches in
//! [`Aggregator::observe`].

use tracing::debug;

use crate::classify::EventKind;
use crate::extract::EventMatch;
use crate::record::{render_average, Field, Record};
use crate::relay::{NoRelayCheck, RelayCheck};

/// How repeated observations of a column are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// First observation wins; later ones are ignored.
    FillOnce,
    /// Last observation wins.
    Overwrite,
    /// Integer observations averaged at finalize time, 2 decimals.
    RunningAverage,
    /// Largest integer observation, `0` when there were none.
    RunningMax,
    /// One-way switch from `initial` to `latched`.
    Latch {
        initial: &'static str,
        latched: &'static str,
    },
}

impl FieldPolicy {
    /// Finalized value of a column that never saw an observation.
    pub fn unobserved(self) -> &'static str {
        match self {
            FieldPolicy::FillOnce | FieldPolicy::Overwrite | FieldPolicy::RunningAverage => "",
            FieldPolicy::RunningMax => "0",
            FieldPolicy::Latch { initial, .. } => initial,
        }
    }
}

impl Field {
    /// The per-column reduction policy table.
    pub fn policy(self) -> FieldPolicy {
        match self {
            Field::Slot
            | Field::RequestTs
            | Field::ParentHash
            | Field::BlockRoot
            | Field::LocalBlockHash
            | Field::RelayBlockHash => FieldPolicy::FillOnce,
            Field::Relay => FieldPolicy::Overwrite,
            Field::RelayResponseMs | Field::RelayRevealMs | Field::BroadcastDelayMs => {
                FieldPolicy::RunningAverage
            }
            Field::LocalResponseMs => FieldPolicy::RunningMax,
            Field::FinalStatus => FieldPolicy::Latch {
                initial: "not_included",
                latched: "included",
            },
            Field::RelaySuccess => FieldPolicy::Latch {
                initial: "F",
                latched: "T",
            },
        }
    }
}

/// Running state of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Text(Option<String>),
    Latest(String),
    Average { sum: u128, count: u64 },
    Max(u64),
    Latch(bool),
}

impl Cell {
    fn for_policy(policy: FieldPolicy) -> Self {
        match policy {
            FieldPolicy::FillOnce => Cell::Text(None),
            FieldPolicy::Overwrite => Cell::Latest(String::new()),
            FieldPolicy::RunningAverage => Cell::Average { sum: 0, count: 0 },
            FieldPolicy::RunningMax => Cell::Max(0),
            FieldPolicy::Latch { .. } => Cell::Latch(false),
        }
    }

    /// Fold one raw observation in. Returns whether the cell changed.
    fn apply(&mut self, raw: &str) -> bool {
        match self {
            Cell::Text(value) => {
                if value.is_some() {
                    return false;
                }
                *value = Some(raw.to_string());
                true
            }
            Cell::Latest(value) => {
                if value.as_str() == raw {
                    return false;
                }
                *value = raw.to_string();
                true
            }
            Cell::Average { sum, count } => match raw.parse::<u64>() {
                Ok(v) => {
                    *sum += u128::from(v);
                    *count += 1;
                    true
                }
                Err(_) => false,
            },
            Cell::Max(max) => match raw.parse::<u64>() {
                Ok(v) if v > *max => {
                    *max = v;
                    true
                }
                _ => false,
            },
            Cell::Latch(set) => {
                let changed = !*set;
                *set = true;
                changed
            }
        }
    }

    fn render(&self, policy: FieldPolicy) -> String {
        match (self, policy) {
            (Cell::Text(value), _) => value.clone().unwrap_or_default(),
            (Cell::Latest(value), _) => value.clone(),
            (Cell::Average { count: 0, .. }, _) => String::new(),
            (Cell::Average { sum, count }, _) => render_average(*sum as f64 / *count as f64),
            (Cell::Max(max), _) => max.to_string(),
            (Cell::Latch(true), FieldPolicy::Latch { latched, .. }) => latched.to_string(),
            (Cell::Latch(_), policy) => policy.unobserved().to_string(),
        }
    }
}

/// The per-scan accumulator.
///
/// Created empty (apart from the caller's slot), mutated only through
/// [`observe`](Self::observe) and [`apply`](Self::apply), and read through
/// [`finalize`](Self::finalize), which never mutates.
#[derive(Debug)]
pub struct Aggregator<R = NoRelayCheck> {
    slot: u64,
    cells: [Cell; 13],
    relay: R,
}

impl Aggregator<NoRelayCheck> {
    /// An aggregator whose relay lookups always come back empty.
    pub fn without_relay(slot: u64) -> Self {
        Self::new(slot, NoRelayCheck)
    }
}

impl<R: RelayCheck> Aggregator<R> {
    pub fn new(slot: u64, relay: R) -> Self {
        let mut aggregator = Self {
            slot,
            cells: Field::ALL.map(|f| Cell::for_policy(f.policy())),
            relay,
        };
        aggregator.apply(Field::Slot, &slot.to_string());
        aggregator
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Fold one value into `field` according to its policy. Returns whether
    /// the column changed. Integer columns ignore values that do not parse.
    pub fn apply(&mut self, field: Field, raw: &str) -> bool {
        self.cells[field as usize].apply(raw)
    }

    /// Fold every capture of `event` in, then fire the event's latches.
    ///
    /// A signed block latches `final_status`. A reveal latches `relay_success`
    /// only if it carried a `relay_response_ms`, and every such reveal asks
    /// the relay hook again. The latest answer replaces `relay`, since relay
    /// data for a slot can show up after the first reveal.
    pub fn observe(&mut self, event: &EventMatch) {
        for capture in &event.captures {
            if self.apply(capture.field, &capture.raw) {
                debug!(kind = %event.kind, field = %capture.field, value = %capture.raw, "observed");
            }
        }

        match event.kind {
            EventKind::SignedBlockReceived => {
                if self.apply(Field::FinalStatus, "") {
                    debug!(slot = self.slot, "final_status latched to included");
                }
            }
            EventKind::RevealSuccess if event.get(Field::RelayRevealMs).is_some() => {
                if self.apply(Field::RelaySuccess, "") {
                    debug!(slot = self.slot, "relay_success latched");
                }
                let relay = self.relay.check_relay(self.slot);
                if self.apply(Field::Relay, &relay) {
                    debug!(slot = self.slot, relay = %relay, "relay updated");
                }
            }
            _ => {}
        }
    }

    /// Snapshot the current state as a [`Record`].
    pub fn finalize(&self) -> Record {
        let values = Field::ALL.map(|f| self.cells[f as usize].render(f.policy()));
        Record::from_values(values)
    }
}
