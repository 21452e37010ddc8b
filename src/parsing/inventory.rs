use ahash::{HashMap, HashMapExt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::Result,
    models::{
        item::AggregatedRow,
        item_metadata::ECONOMY_IMAGE_BASE,
        steam::{RawChunk, RawDescription},
    },
};

use super::market_name_parse::{
    display_name, image_url, inspect_link, market_identifier, name_without_wear, pattern_label, wear_of,
};

/// Which derived fields decide that two assets are "the same item".
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityKey {
    /// (market name, image, inspect link). Inspect links embed the asset id,
    /// so in practice only assets without an inspect action ever stack.
    #[default]
    Triple,
    /// (market name, image). Stacks identical skins regardless of asset id.
    NameImage,
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub image_base: String,
    pub owner_steamid: Option<u64>,
    pub identity: IdentityKey,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            image_base: ECONOMY_IMAGE_BASE.to_string(),
            owner_steamid: None,
            identity: IdentityKey::default(),
        }
    }
}

/// Reads a chunk list: either a JSON array of inventory pages or one bare page.
pub fn parse_chunks(json: &str) -> Result<Vec<RawChunk>> {
    let value: Value = serde_json::from_str(json)?;
    let chunks = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(chunks)
}

/// Every description across all chunks keyed by `{classid}_{instanceid}`. Later chunks win.
pub fn description_index(chunks: &[RawChunk]) -> HashMap<String, &RawDescription> {
    let mut desc_map: HashMap<String, &RawDescription> = HashMap::new();

    for desc in chunks.iter().flat_map(|c| &c.descriptions) {
        desc_map.insert(desc.key(), desc);
    }
    desc_map
}

pub fn normalize(chunks: &[RawChunk]) -> Vec<AggregatedRow> {
    normalize_with(chunks, &NormalizeOptions::default())
}

/// Joins every asset to its description, derives the display fields and folds
/// assets with the same identity into one row. Rows come out in first-seen order.
pub fn normalize_with(chunks: &[RawChunk], options: &NormalizeOptions) -> Vec<AggregatedRow> {
    let desc_map = description_index(chunks);

    let mut grouped: IndexMap<(String, String, String), AggregatedRow> = IndexMap::new();
    let mut dropped = 0usize;

    for asset in chunks.iter().flat_map(|c| &c.assets) {
        let Some(description) = desc_map.get(&asset.key()) else {
            dropped += 1;
            continue;
        };

        let market_hash_name = market_identifier(description);
        let image = image_url(description, &options.image_base);
        let inspect = inspect_link(description.actions.as_deref(), &asset.assetid, options.owner_steamid);

        let key = match options.identity {
            IdentityKey::Triple => (market_hash_name.to_string(), image.clone(), inspect.clone()),
            IdentityKey::NameImage => (market_hash_name.to_string(), image.clone(), String::new()),
        };

        let entry = grouped.entry(key).or_insert_with(|| {
            let name = display_name(description);
            AggregatedRow {
                market_hash_name: market_hash_name.to_string(),
                name: name.to_string(),
                name_no_wear: name_without_wear(name),
                wear: wear_of(description),
                pattern: pattern_label(market_hash_name),
                image,
                inspect_link: inspect,
                quantity: 0,
            }
        });
        entry.quantity += 1;
    }

    if dropped > 0 {
        debug!(dropped, "assets without a matching description were skipped");
    }

    grouped.into_values().collect()
}
