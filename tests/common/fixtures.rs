//! Static beacon log corpora used across harnesses.
//!
//! Lines follow the Lighthouse text format: `Mon DD HH:MM:SS.mmm LEVEL msg
//! key: value, ...`. Every `PROPOSAL_*` line sits inside the 15 second
//! window around [`TARGET`].

/// Target used by most harnesses.
pub const TARGET: &str = "Apr-23-2025 07:25:25 PM";

/// Window radius used with [`TARGET`].
pub const RADIUS: u32 = 15;

/// Slot used with [`TARGET`].
pub const SLOT: u64 = 1_234_567;

/// A complete builder-path proposal, in log order.
pub const PROPOSAL_BUILDER: &[&str] = &[
    "Apr 23 19:25:12.004 INFO Synced                                  slot: 1234566, peers: 84, service: slot_notifier",
    "Apr 23 19:25:20.118 INFO Requested blinded execution payload     parent_hash: 0x5e1f00d4, local_response_ms: 50, relay_response_ms: 120, service: exec",
    "Apr 23 19:25:20.240 INFO Received local and builder payloads     local_block_hash: 0x10ca1, relay_block_hash: 0x4e1a7, parent_hash: 0x5e1f00d4, service: exec",
    "Apr 23 19:25:21.007 INFO Builder successfully revealed payload   block_root: 0xb10cb007, relay_response_ms: 300, service: exec",
    "Apr 23 19:25:21.310 WARN Block broadcast was delayed             delay_ms: 100, slot: 1234567, service: beacon",
    "Apr 23 19:25:21.402 INFO Signed block received in HTTP API       slot: 1234567, service: http_api",
];

/// A local-path proposal that never reached the HTTP API.
pub const PROPOSAL_LOCAL_ONLY: &[&str] = &[
    "Apr 23 19:25:20.118 INFO Requested blinded execution payload     parent_hash: 0xfeed, local_response_ms: 80, service: exec",
    "Apr 23 19:25:20.900 WARN Block broadcast was delayed             delay_ms: 250, service: beacon",
];

/// Proposer events just outside the window on either side.
pub const OUTSIDE_WINDOW: &[&str] = &[
    "Apr 23 19:25:09.999 WARN Block broadcast was delayed             delay_ms: 9000, service: beacon",
    "Apr 23 19:25:41.000 INFO Signed block received in HTTP API       slot: 1234568, service: http_api",
    "Apr 24 19:25:20.118 INFO Requested blinded execution payload     parent_hash: 0xdead, local_response_ms: 999, service: exec",
];

/// Noise: continuation lines, other messages, malformed stamps.
pub const NOISE: &[&str] = &[
    "",
    "    at beacon_node::http_api::publish_block (src/publish.rs:412)",
    "Apr 23 19:25:22.000 INFO New block received                      root: 0x1111, slot: 1234567",
    "Xyz 23 19:25:22 INFO Signed block received in HTTP API",
    "Feb 30 19:25:22 INFO Signed block received in HTTP API",
];
