// src/adapter/response.rs

use reqwest::StatusCode;
use tracing::debug;

use crate::error::AdapterError;
use crate::model::bid::OutputBid;
use crate::model::slot::SlotRequest;
use crate::openrtb::response::BidResponse;

/// Turns the exchange's raw reply into the caller's bid list.
///
/// 204 is the exchange's deliberate no-bid signal and yields an empty list;
/// every other non-200 status and any unparseable 200 body is fatal to the
/// whole call.
pub fn decode_bids(
    sent: &[&SlotRequest],
    status: StatusCode,
    body: &[u8],
    family: &str,
) -> Result<Vec<OutputBid>, AdapterError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }
    if status != StatusCode::OK {
        return Err(AdapterError::BadStatus(status));
    }
    let response: BidResponse = serde_json::from_slice(body)?;
    Ok(map_bids(sent, &response, family))
}

/// Correlates each response bid back to a sent slot via the echoed `impid`,
/// preserving the response's own ordering across seat-bids. Slots the
/// exchange skipped produce nothing (passback); a bid whose impid matches no
/// sent slot is dropped.
fn map_bids(sent: &[&SlotRequest], response: &BidResponse, family: &str) -> Vec<OutputBid> {
    let mut out = Vec::new();
    for seatbid in &response.seatbid {
        for bid in &seatbid.bid {
            let Some(slot) = sent.iter().find(|slot| slot.code == bid.impid) else {
                debug!(impid = %bid.impid, "bid for unknown impression, dropping");
                continue;
            };
            out.push(OutputBid {
                ad_unit_code: slot.code.clone(),
                bid_id: slot.bid_id.clone(),
                bidder_code: family.to_string(),
                adm: bid.adm.clone().unwrap_or_default(),
                creative_id: bid.crid.clone().unwrap_or_default(),
                width: bid.w.unwrap_or(0),
                height: bid.h.unwrap_or(0),
                price: bid.price,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openrtb::response::{Bid, SeatBid};
    use serde_json::json;

    fn slot(code: &str, bid_id: &str) -> SlotRequest {
        SlotRequest {
            code: code.to_string(),
            bid_id: bid_id.to_string(),
            params: json!({}),
        }
    }

    fn bid(impid: &str, price: f64) -> Bid {
        Bid {
            id: Some("Bid-123".to_string()),
            impid: impid.to_string(),
            price,
            adm: Some("<div>This is an Ad</div>".to_string()),
            crid: Some("Cr-123".to_string()),
            w: Some(728),
            h: Some(90),
        }
    }

    #[test]
    fn no_content_is_an_empty_list_not_an_error() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let bids = decode_bids(&[&s1], StatusCode::NO_CONTENT, b"", "platformio").unwrap();
        assert!(bids.is_empty());
    }

    #[test]
    fn unexpected_status_is_fatal() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let err =
            decode_bids(&[&s1], StatusCode::INTERNAL_SERVER_ERROR, b"", "platformio").unwrap_err();
        assert!(matches!(err, AdapterError::BadStatus(_)));
    }

    #[test]
    fn garbage_body_is_fatal() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let err = decode_bids(&[&s1], StatusCode::OK, b"not json", "platformio").unwrap_err();
        assert!(matches!(err, AdapterError::Decode(_)));
    }

    #[test]
    fn matched_bids_round_trip_slot_identity() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let s2 = slot("div-adunit-2", "Bid-2");
        let response = BidResponse {
            seatbid: vec![SeatBid {
                bid: vec![bid("div-adunit-2", 2.1)],
                seat: None,
            }],
            ..Default::default()
        };
        let body = serde_json::to_vec(&response).unwrap();
        let bids = decode_bids(&[&s1, &s2], StatusCode::OK, &body, "platformio").unwrap();

        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].ad_unit_code, "div-adunit-2");
        assert_eq!(bids[0].bid_id, "Bid-2");
        assert_eq!(bids[0].bidder_code, "platformio");
        assert_eq!((bids[0].price * 100.0) as i64, 210);
    }

    #[test]
    fn unknown_impid_is_dropped_silently() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let response = BidResponse {
            seatbid: vec![SeatBid {
                bid: vec![bid("div-other", 2.1), bid("div-adunit-1", 1.5)],
                seat: None,
            }],
            ..Default::default()
        };
        let body = serde_json::to_vec(&response).unwrap();
        let bids = decode_bids(&[&s1], StatusCode::OK, &body, "platformio").unwrap();

        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].ad_unit_code, "div-adunit-1");
    }

    #[test]
    fn response_order_wins_over_slot_order() {
        let s1 = slot("div-adunit-1", "Bid-1");
        let s2 = slot("div-adunit-2", "Bid-2");
        let response = BidResponse {
            seatbid: vec![
                SeatBid {
                    bid: vec![bid("div-adunit-2", 1.0)],
                    seat: Some("a".to_string()),
                },
                SeatBid {
                    bid: vec![bid("div-adunit-1", 2.0)],
                    seat: Some("b".to_string()),
                },
            ],
            ..Default::default()
        };
        let body = serde_json::to_vec(&response).unwrap();
        let bids = decode_bids(&[&s1, &s2], StatusCode::OK, &body, "platformio").unwrap();

        assert_eq!(bids[0].ad_unit_code, "div-adunit-2");
        assert_eq!(bids[1].ad_unit_code, "div-adunit-1");
    }
}
