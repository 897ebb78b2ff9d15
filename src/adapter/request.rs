// src/adapter/request.rs

use uuid::Uuid;

use crate::adapter::params::PlatformioParams;
use crate::model::slot::{RequestContext, SlotRequest};
use crate::openrtb::request::{App, Banner, BidRequest, Device, Imp, Publisher, Site, User};

/// Assembles the outbound bid request from the validated slots.
///
/// One impression per slot, in the order the slots were supplied. All slots
/// in one call are assumed to share the same publisher and site, so the
/// request-level block is taken from the first slot's params; this is not
/// cross-validated. Callers guarantee `slots` is non-empty.
pub fn build_bid_request(
    context: &RequestContext,
    slots: &[(&SlotRequest, PlatformioParams)],
) -> BidRequest {
    let imp = slots
        .iter()
        .map(|(slot, params)| Imp {
            id: slot.code.clone(),
            tagid: params.placement_id.to_string(),
            banner: Banner {
                w: params.width,
                h: params.height,
            },
            bidfloor: params.bid_floor,
        })
        .collect();

    let first = &slots[0].1;
    let publisher = Publisher {
        id: first.pub_id.to_string(),
    };

    // App origin wins over site; the two are mutually exclusive on the wire.
    let (site, app) = match &context.app {
        Some(app_info) => (
            None,
            Some(App {
                id: app_info.id.clone(),
                name: app_info.name.clone(),
                bundle: app_info.bundle.clone(),
                publisher,
            }),
        ),
        None => (
            Some(Site {
                id: first.site_id.to_string(),
                publisher,
            }),
            None,
        ),
    };

    BidRequest {
        id: context
            .tid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        imp,
        site,
        app,
        device: context.device.as_ref().map(|d| Device {
            ua: d.ua.clone(),
            ip: d.ip.clone(),
        }),
        user: context.user_id.as_ref().map(|uid| User {
            buyeruid: Some(uid.clone()),
        }),
        tmax: context.tmax_ms,
    }
}
