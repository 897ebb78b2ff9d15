// src/model/bid.rs

use serde::{Deserialize, Serialize};

/// One bid returned to the caller. Every `OutputBid` corresponds to exactly
/// one slot that was actually sent to the exchange; slots the exchange
/// passed back on produce no entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputBid {
    /// Slot code copied from the originating `SlotRequest`.
    pub ad_unit_code: String,
    /// The caller's opaque bid token, round-tripped unchanged.
    pub bid_id: String,
    /// Constant adapter family name, used by the orchestrator for routing.
    pub bidder_code: String,
    /// Ad markup (HTML or URL).
    pub adm: String,
    pub creative_id: String,
    pub width: u64,
    pub height: u64,
    /// CPM as quoted by the exchange, copied verbatim.
    pub price: f64,
}
