//! Relay-status hook.
//!
//! When a builder reveal succeeds, the aggregator asks a [`RelayCheck`] which
//! relay delivered the payload for the slot and stores the answer verbatim.
//! Implementations own their failure handling: they return a string (empty
//! when unknown) and never fail into the scan.

/// Looks up which relay delivered the payload for a slot.
pub trait RelayCheck {
    fn check_relay(&mut self, slot: u64) -> String;
}

impl<F> RelayCheck for F
where
    F: FnMut(u64) -> String,
{
    fn check_relay(&mut self, slot: u64) -> String {
        self(slot)
    }
}

/// A hook that never knows the relay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoRelayCheck;

impl RelayCheck for NoRelayCheck {
    fn check_relay(&mut self, _slot: u64) -> String {
        String::new()
    }
}
