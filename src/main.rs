// src/main.rs

use clap::Parser;
use serde_json::json;
use std::fs;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use platformio_adapter::mock_exchange::MockExchange;
use platformio_adapter::model::slot::{PublisherRequest, SlotRequest};
use platformio_adapter::PlatformioAdapter;

/// Demo harness: runs one bid round against the Platformio exchange, or
/// against the in-process stub when no endpoint is given.
#[derive(Parser, Debug)]
#[command(version = "1.0", about = "Platformio bid adapter demo")]
struct CliArgs {
    /// Exchange bid endpoint. Defaults to an in-process mock exchange.
    #[arg(long)]
    endpoint: Option<String>,
    /// Publisher request JSON file; a built-in sample is used when omitted.
    #[arg(long)]
    request_file: Option<String>,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    #[arg(long, default_value = "usersync?rurl=")]
    usersync_template: String,
    #[arg(long, default_value = "http://localhost")]
    external_url: String,
    /// Tag ids the mock exchange should bid on, comma separated.
    #[arg(long, default_value = "1001")]
    bid_tags: String,
    /// Simulated exchange latency range, e.g. `100-300` (mock only).
    #[arg(long)]
    latency_ms: Option<String>,
}

fn sample_request() -> PublisherRequest {
    let slots = (1..=2)
        .map(|i| SlotRequest {
            code: format!("div-adunit-{}", i),
            bid_id: format!("Bid-{}", i),
            params: json!({
                "placementId": 1000 + i,
                "pubId": 29521,
                "siteId": 11111,
                "size": "300X250"
            }),
        })
        .collect();
    PublisherRequest {
        context: Default::default(),
        slots,
    }
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let log_file = rolling::hourly(&args.log_dir, "platformio_adapter.json");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking))
        .with(fmt::layer().with_writer(std::io::stdout));
    tracing::subscriber::set_global_default(subscriber)
        .expect("Unable to set global tracing subscriber");

    let endpoint = match &args.endpoint {
        Some(url) => url.clone(),
        None => {
            let mut exchange =
                MockExchange::bidding_on(args.bid_tags.split(',').map(str::trim));
            if let Some(range) = &args.latency_ms {
                let (min_ms, max_ms) = range
                    .split_once('-')
                    .and_then(|(lo, hi)| Some((lo.parse().ok()?, hi.parse().ok()?)))
                    .expect("latency range must look like 100-300");
                exchange = exchange.with_latency(min_ms, max_ms);
            }
            exchange.spawn().await
        }
    };

    let request: PublisherRequest = match &args.request_file {
        Some(path) => {
            let mut raw = fs::read(path).expect("Unable to read request file");
            simd_json::from_slice(&mut raw).expect("Unable to parse request file")
        }
        None => sample_request(),
    };

    let adapter =
        PlatformioAdapter::new(&endpoint, &args.usersync_template, &args.external_url);
    info!(
        adapter = adapter.name(),
        usersync = %adapter.usersync_info().url,
        %endpoint,
        "adapter ready"
    );

    match adapter.call(&request.context, &request.slots).await {
        Ok(bids) => {
            info!(bid_count = bids.len(), "bid round complete");
            for bid in &bids {
                println!(
                    "{}: {} {}x{} @ {} (creative {})",
                    bid.ad_unit_code, bid.bidder_code, bid.width, bid.height, bid.price,
                    bid.creative_id
                );
            }
        }
        Err(err) => {
            eprintln!("bid round failed: {}", err);
            std::process::exit(1);
        }
    }
}
