use std::time::Duration;

use reqwest::{header::COOKIE, Client, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{InventoryError, Result},
    models::steam::RawChunk,
};

/// Whose inventory and which part of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryTarget {
    pub steamid: u64,
    pub appid: u32,
    pub contextid: u32,
}

pub fn inventory_url(target: &InventoryTarget, count: u32, language: &str, start_assetid: Option<&str>) -> String {
    //  https://steamcommunity.com/inventory/76561198389123475/730/2?l=english&count=2000
    let mut url = format!(
        "https://steamcommunity.com/inventory/{}/{}/{}?l={}&count={}",
        target.steamid, target.appid, target.contextid, language, count
    );
    if let Some(start) = start_assetid {
        url.push_str(&format!("&start_assetid={}", start));
    }
    url
}

/// Fetches every configured context of `steamid`'s inventory, page by page.
///
/// The first context must succeed, the others are optional (trade protected
/// items need a cookie and may simply not exist) and are skipped on error.
pub async fn fetch_inventory(client: &Client, config: &Config, steamid: u64) -> Result<Vec<RawChunk>> {
    let mut chunks = Vec::new();

    for (i, &contextid) in config.contexts.iter().enumerate() {
        let target = InventoryTarget { steamid, appid: config.appid, contextid };

        match fetch_context(client, config, &target).await {
            Ok(mut pages) => chunks.append(&mut pages),
            Err(e) if i == 0 => return Err(e),
            Err(e) => warn!(contextid, error = %e, "skipping optional inventory context"),
        }
    }

    Ok(chunks)
}

/// Pages through one context, one request at a time, sleeping `page_delay_ms` in between.
pub async fn fetch_context(client: &Client, config: &Config, target: &InventoryTarget) -> Result<Vec<RawChunk>> {
    let mut chunks: Vec<RawChunk> = Vec::new();
    let mut start: Option<String> = None;

    for page in 0..config.max_pages {
        if page > 0 {
            tokio::time::sleep(Duration::from_millis(config.page_delay_ms)).await;
        }

        let url = inventory_url(target, config.page_size, &config.language, start.as_deref());
        let chunk = fetch_page(client, &url, config.steamloginsecure.as_deref(), target.steamid).await?;

        info!(
            contextid = target.contextid,
            page,
            assets = chunk.assets.len(),
            total = ?chunk.total_inventory_count,
            "fetched inventory page"
        );

        start = next_cursor(&chunk);
        chunks.push(chunk);

        if start.is_none() {
            return Ok(chunks);
        }
    }

    warn!(max_pages = config.max_pages, contextid = target.contextid, "stopped paging, inventory may be truncated");
    Ok(chunks)
}

/// `start_assetid` for the next page, if steam says there is one.
pub fn next_cursor(chunk: &RawChunk) -> Option<String> {
    if chunk.has_more() { chunk.last_assetid.clone() } else { None }
}

async fn fetch_page(client: &Client, url: &str, cookie: Option<&str>, steamid: u64) -> Result<RawChunk> {
    let mut request = client.get(url);
    if let Some(secure) = cookie {
        request = request.header(COOKIE, format!("steamLoginSecure={}", secure));
    }

    let response = request.send().await?;
    let status = response.status();
    if status == StatusCode::FORBIDDEN {
        return Err(InventoryError::PrivateInventory { steamid });
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(InventoryError::RateLimited);
    }
    if !status.is_success() {
        return Err(InventoryError::Status(status));
    }

    let body: Value = response.json().await?;
    parse_page(body)
}

/// Steam answers `null` for unknown inventories and `success: 0` for some errors.
pub fn parse_page(body: Value) -> Result<RawChunk> {
    if body.is_null() {
        return Err(InventoryError::EmptyResponse);
    }
    let chunk: RawChunk = serde_json::from_value(body)?;
    if chunk.success == Some(false) {
        return Err(InventoryError::EmptyResponse);
    }
    Ok(chunk)
}
