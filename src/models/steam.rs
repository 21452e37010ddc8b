use serde::{Deserialize, Deserializer, Serialize};

/// One inventory slot as returned in the `assets` array of a steam inventory page.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawAsset {
    #[serde(default)]
    pub classid: String,
    #[serde(default)]
    pub instanceid: String,
    #[serde(default)]
    pub assetid: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawAction {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub name: String,
}

/// Metadata shared by every asset with the same (classid, instanceid).
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawDescription {
    #[serde(default)]
    pub classid: String,
    #[serde(default)]
    pub instanceid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market_name: String,
    #[serde(default)]
    pub market_hash_name: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub icon_url_large: String,
    #[serde(default)]
    pub actions: Option<Vec<RawAction>>,
}

/// A single page from `steamcommunity.com/inventory`.
///
/// `more_items`, `last_assetid` and `total_inventory_count` only matter to the pagination loop.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawChunk {
    #[serde(default)]
    pub assets: Vec<RawAsset>,
    #[serde(default)]
    pub descriptions: Vec<RawDescription>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub more_items: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_assetid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_inventory_count: Option<u64>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl RawChunk {
    pub fn has_more(&self) -> bool {
        self.more_items.unwrap_or(false) && self.last_assetid.is_some()
    }
}

impl RawDescription {
    pub fn key(&self) -> String {
        composite_key(&self.classid, &self.instanceid)
    }
}

impl RawAsset {
    pub fn key(&self) -> String {
        composite_key(&self.classid, &self.instanceid)
    }
}

pub fn composite_key(classid: &str, instanceid: &str) -> String {
    format!("{}_{}", classid, instanceid)
}

// Steam sends these as either `true` or `1` depending on the endpoint
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|f| match f {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    }))
}
