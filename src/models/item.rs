use serde::{Deserialize, Serialize};

use super::item_metadata::{wear_code, Wear};

/// One display row of the normalized inventory: every asset sharing the same
/// identity folded into a single entry with a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub market_hash_name: String,
    pub name: String,
    #[serde(rename = "nameNoWear")]
    pub name_no_wear: String,
    #[serde(with = "wear_code")]
    pub wear: Option<Wear>,
    pub pattern: String,
    pub image: String,
    #[serde(rename = "inspectLink")]
    pub inspect_link: String,
    pub quantity: u32,
}
