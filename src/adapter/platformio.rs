// src/adapter/platformio.rs

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use crate::adapter::params::PlatformioParams;
use crate::adapter::request::build_bid_request;
use crate::adapter::response::decode_bids;
use crate::adapter::usersync::build_sync_url;
use crate::error::AdapterError;
use crate::model::bid::OutputBid;
use crate::model::slot::{RequestContext, SlotRequest};

const FAMILY: &str = "platformio";

// One connection pool shared by all adapter instances that don't inject
// their own client.
static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Usersync registration info handed to the orchestrator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UsersyncInfo {
    #[serde(rename = "type")]
    pub sync_type: String,
    pub url: String,
}

/// The Platformio adapter: stateless translator between the publisher-side
/// request and the exchange's OpenRTB endpoint. Safe to share across tasks;
/// every call is self-contained.
#[derive(Debug, Clone)]
pub struct PlatformioAdapter {
    client: Client,
    endpoint: String,
    usersync_url: String,
}

impl PlatformioAdapter {
    pub fn new(endpoint: &str, usersync_template: &str, external_url: &str) -> Self {
        Self::with_client(DEFAULT_CLIENT.clone(), endpoint, usersync_template, external_url)
    }

    pub fn with_client(
        client: Client,
        endpoint: &str,
        usersync_template: &str,
        external_url: &str,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            usersync_url: build_sync_url(usersync_template, external_url, FAMILY),
        }
    }

    pub fn name(&self) -> &'static str {
        FAMILY
    }

    pub fn family_name(&self) -> &'static str {
        FAMILY
    }

    pub fn usersync_info(&self) -> UsersyncInfo {
        UsersyncInfo {
            sync_type: "redirect".to_string(),
            url: self.usersync_url.clone(),
        }
    }

    /// Runs one full bid round: validate slots, build the OpenRTB request,
    /// POST it to the exchange and map the reply.
    ///
    /// A slot failing validation is dropped from the outbound request rather
    /// than failing the call, with one order-dependent exception kept for
    /// compatibility with the exchange's integration: while no slot has
    /// validated yet, a validation error aborts the whole call. Errors from
    /// later slots are swallowed.
    pub async fn call(
        &self,
        context: &RequestContext,
        slots: &[SlotRequest],
    ) -> Result<Vec<OutputBid>, AdapterError> {
        let mut valid: Vec<(&SlotRequest, PlatformioParams)> = Vec::with_capacity(slots.len());
        for slot in slots {
            match PlatformioParams::validate(&slot.params) {
                Ok(params) => valid.push((slot, params)),
                Err(err) if valid.is_empty() => return Err(err),
                Err(err) => {
                    debug!(slot = %slot.code, %err, "dropping invalid slot");
                }
            }
        }
        if valid.is_empty() {
            return Err(AdapterError::NoValidImpressions);
        }

        let request = build_bid_request(context, &valid);
        debug!(
            request_id = %request.id,
            imp_count = request.imp.len(),
            endpoint = %self.endpoint,
            "sending bid request"
        );

        let send = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send();
        let response = match context.tmax_ms {
            Some(ms) => timeout(Duration::from_millis(ms), send)
                .await
                .map_err(|_| AdapterError::Timeout)??,
            None => send.await?,
        };

        let status = response.status();
        let body = response.bytes().await?;
        let sent: Vec<&SlotRequest> = valid.iter().map(|(slot, _)| *slot).collect();
        let bids = decode_bids(&sent, status, &body, FAMILY)?;
        info!(
            request_id = %request.id,
            %status,
            bid_count = bids.len(),
            "platformio call complete"
        );
        Ok(bids)
    }
}
