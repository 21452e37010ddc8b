use rand::seq::IndexedRandom;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    item::AggregatedRow,
    price::{Market, PriceType, PricingMode},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedRow {
    #[serde(flatten)]
    pub row: AggregatedRow,
    pub price: Option<f64>,
    pub market: Option<Market>,
    pub total: Option<f64>,
}

/// Looks `item_name` up in one market's feed. The feeds differ per market:
/// youpin is a plain number, buff163 nests by `want`, skinport has `starting_at`
/// and steam only has rolling averages.
pub fn get_price(item_name: &str, prices: &Value, want: PriceType) -> Option<f64> {
    let p_one = prices.get(item_name)?;

    if p_one.is_number() { return p_one.as_f64() }
    if !p_one.is_object() { return None }

    if let Some(p_two) = p_one.get("price").and_then(Value::as_f64) { return Some(p_two) }

    if let Some(p_two) = p_one.get(want.as_str()) {
        if p_two.is_number() { return p_two.as_f64() }
        if let Some(p_three) = p_two.get("price").and_then(Value::as_f64) { return Some(p_three) }
    }

    if let Some(p_two) = p_one.get("starting_at").and_then(Value::as_f64) { return Some(p_two) }

    // For steam, always default to most recent price available
    ["last_24h", "last_7d", "last_30d", "last_90d"]
        .iter()
        .find_map(|k| p_one.get(*k).and_then(Value::as_f64))
}

/// Picks one price out of the candidates, which are in market preference order.
pub fn choose_price(candidates: &[(Market, f64)], mode: PricingMode) -> Option<(Market, f64)> {
    match mode {
        PricingMode::Hierarchical => candidates.first().copied(),
        PricingMode::Cheapest => candidates.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1)),
        PricingMode::MostExpensive => candidates.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)),
        PricingMode::Random => candidates.choose(&mut rand::rng()).copied(),
    }
}

/// Markets in preference order with repeats dropped, so each feed is fetched once.
pub fn unique_markets(preferred: &[Market]) -> Vec<Market> {
    let mut markets: Vec<Market> = Vec::with_capacity(preferred.len());
    for &market in preferred {
        if !markets.contains(&market) {
            markets.push(market);
        }
    }
    markets
}

/// Prices every row against the feeds (in preference order) and converts with `rate`.
pub fn price_rows(rows: Vec<AggregatedRow>, feeds: &[(Market, Value)], want: PriceType, mode: PricingMode, rate: f64) -> Vec<PricedRow> {
    rows.into_iter()
        .map(|row| {
            let candidates: Vec<(Market, f64)> = feeds.iter()
                .filter_map(|(market, feed)| {
                    get_price(&row.market_hash_name, feed, want).map(|p| (*market, p))
                })
                .collect();

            let chosen = choose_price(&candidates, mode);
            let price = chosen.map(|(_, p)| p * rate);
            let total = price.map(|p| p * row.quantity as f64);

            PricedRow { market: chosen.map(|(m, _)| m), price, total, row }
        })
        .collect()
}
