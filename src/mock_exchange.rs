// src/mock_exchange.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{serve, Json, Router};
use rand::Rng;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::openrtb::request::{BidRequest, Imp};
use crate::openrtb::response::{Bid, BidResponse, SeatBid};

/// In-process stand-in for the Platformio OpenRTB endpoint, used by the
/// integration tests and the demo binary. Bids a fixed sample creative on
/// the configured tag ids and answers 204 when no impression matches,
/// mirroring the real exchange's no-bid signal. Records the last decoded
/// request so callers can assert on what went over the wire.
#[derive(Clone)]
pub struct MockExchange {
    bid_on_tags: Arc<HashSet<String>>,
    last_request: Arc<Mutex<Option<BidRequest>>>,
    latency_ms: Option<(u64, u64)>,
}

impl MockExchange {
    pub fn bidding_on<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bid_on_tags: Arc::new(tags.into_iter().map(Into::into).collect()),
            last_request: Arc::new(Mutex::new(None)),
            latency_ms: None,
        }
    }

    /// An exchange that passes back on everything.
    pub fn passback() -> Self {
        Self::bidding_on(Vec::<String>::new())
    }

    /// Adds a random per-request delay, for exercising caller deadlines.
    pub fn with_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency_ms = Some((min_ms, max_ms));
        self
    }

    /// The request most recently received, if any.
    pub fn last_request(&self) -> Option<BidRequest> {
        self.last_request.lock().unwrap().clone()
    }

    /// Binds an ephemeral port, serves in the background and returns the
    /// bid endpoint URL.
    pub async fn spawn(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock exchange failed to bind");
        let addr = listener.local_addr().expect("mock exchange local_addr");
        let app = Router::new()
            .route("/bid", post(handle_bid))
            .with_state(self.clone());
        tokio::spawn(async move {
            serve(listener, app).await.expect("mock exchange server");
        });
        info!("mock exchange running at http://{}", addr);
        format!("http://{}/bid", addr)
    }
}

async fn handle_bid(
    State(exchange): State<MockExchange>,
    Json(request): Json<BidRequest>,
) -> Response {
    if let Some((min_ms, max_ms)) = exchange.latency_ms {
        let delay = rand::thread_rng().gen_range(min_ms..=max_ms);
        sleep(Duration::from_millis(delay)).await;
    }

    let bids: Vec<Bid> = request
        .imp
        .iter()
        .filter(|imp| exchange.bid_on_tags.contains(&imp.tagid))
        .map(sample_bid)
        .collect();
    *exchange.last_request.lock().unwrap() = Some(request);

    if bids.is_empty() {
        // No bids produced, the real exchange returns 204.
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(BidResponse {
        id: Some("mock-response".to_string()),
        seatbid: vec![SeatBid {
            bid: bids,
            seat: None,
        }],
        cur: Some("USD".to_string()),
        nbr: None,
    })
    .into_response()
}

fn sample_bid(imp: &Imp) -> Bid {
    Bid {
        id: Some("Bid-123".to_string()),
        impid: imp.id.clone(),
        price: 2.1,
        adm: Some("<div>This is an Ad</div>".to_string()),
        crid: Some("Cr-123".to_string()),
        w: Some(728),
        h: Some(90),
    }
}
