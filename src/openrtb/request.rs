// src/openrtb/request.rs

use serde::{Deserialize, Serialize};

/// OpenRTB BidRequest, restricted to the fields the Platformio exchange
/// consumes. `site` and `app` are mutually exclusive: exactly one of them is
/// set depending on where the publisher request originated.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BidRequest {
    pub id: String,
    /// One impression per validated slot, caller order preserved. The
    /// exchange echoes `Imp.id` back as `Bid.impid`, which is what makes
    /// later correlation well-defined.
    pub imp: Vec<Imp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmax: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Imp {
    /// Slot code of the originating `SlotRequest`.
    pub id: String,
    /// The exchange's inventory unit id, rendered as a string.
    pub tagid: String,
    pub banner: Banner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Banner {
    pub w: u64,
    pub h: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Site {
    pub id: String,
    pub publisher: Publisher,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct App {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    pub publisher: Publisher,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Publisher {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyeruid: Option<String>,
}
