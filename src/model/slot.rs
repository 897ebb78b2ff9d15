// src/model/slot.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sellable ad placement within a publisher request, as handed over by
/// the request-intake layer. The adapter treats it as read-only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SlotRequest {
    /// Caller-visible slot identifier, unique within the request.
    pub code: String,
    /// Opaque token supplied by the caller, round-tripped unchanged onto the
    /// matching output bid.
    pub bid_id: String,
    /// Raw adapter-specific parameters, untyped until validated.
    #[serde(default)]
    pub params: Value,
}

/// Shared request context: site/app origin, device, user sync state and the
/// caller's deadline. Everything here is optional; an empty context produces
/// a plain site-originated request.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RequestContext {
    /// Transaction id from the intake layer. When absent the adapter
    /// generates one, at the cost of byte-identical replays.
    pub tid: Option<String>,
    /// Present when the request originates from a mobile app. Mutually
    /// exclusive with the site block on the wire.
    pub app: Option<AppInfo>,
    pub device: Option<DeviceInfo>,
    /// Exchange-side user id from the cookie collaborator, if synced.
    pub user_id: Option<String>,
    /// Caller-imposed deadline for the outbound call, in milliseconds.
    pub tmax_ms: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppInfo {
    pub id: String,
    pub name: Option<String>,
    pub bundle: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeviceInfo {
    pub ua: Option<String>,
    pub ip: Option<String>,
}

/// The intake-side request shape consumed by the demo binary: shared context
/// plus the ordered slots destined for this adapter.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublisherRequest {
    #[serde(default)]
    pub context: RequestContext,
    pub slots: Vec<SlotRequest>,
}
