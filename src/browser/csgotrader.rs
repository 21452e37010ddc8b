use std::{collections::HashMap, io::Read};

use chrono::Utc;
use flate2::read::GzDecoder;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{InventoryError, Result},
    models::price::Market,
    pricing::cache::PriceCache,
};

const PRICES_BASE: &str = "https://prices.csgotrader.app/latest";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:137.0) Gecko/20100101 Firefox/137.0";

/// USD is 1.0, every other currency is "how many of X per USD".
//https://github.com/gergelyszabo94/csgo-trader-extension/blob/master/extension/src/utils/pricing.js#L393
pub async fn get_exchange_rates(client: &Client) -> Result<HashMap<String, f64>> {
    fetch_gzip_json(client, &format!("{}/exchange_rates.json", PRICES_BASE)).await
}

/// The whole price feed of one market, keyed by market hash name.
pub async fn get_market_data(client: &Client, market: Market) -> Result<Value> {
    info!(%market, "fetching price feed");
    fetch_gzip_json(client, &format!("{}/{}.json", PRICES_BASE, market.as_str())).await
}

/// Serves the feed from `cache` while it is fresh, refetches and stores it otherwise.
pub async fn get_market_data_cached(client: &Client, market: Market, cache: &mut PriceCache<Value>) -> Result<Value> {
    let now = Utc::now();
    if let Some(feed) = cache.get(market.as_str(), now) {
        debug!(%market, "price feed served from cache");
        return Ok(feed.clone());
    }

    let feed = get_market_data(client, market).await?;
    cache.insert(market.as_str(), feed.clone(), now);
    Ok(feed)
}

async fn fetch_gzip_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = client.get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::ACCEPT_ENCODING, "gzip")
        .send()
        .await?;

    if !response.status().is_success() { return Err(InventoryError::Status(response.status())) }

    let bytes = response.bytes().await?;
    decode_body(&bytes)
}

/// The feed is served gzipped, but fall back to plain JSON when it isn't.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        let mut raw_data = String::new();
        GzDecoder::new(bytes).read_to_string(&mut raw_data)?;
        Ok(serde_json::from_str(&raw_data)?)
    } else {
        Ok(serde_json::from_slice(bytes)?)
    }
}
