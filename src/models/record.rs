//! Records persisted per user: a tagged schema checked before anything is stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InventoryError, Result};

use super::item::AggregatedRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Holding {
    pub market_hash_name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Watch {
    pub market_hash_name: String,
    pub target_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredRecord {
    Holding(Holding),
    Watch(Watch),
}

impl StoredRecord {
    /// Deserializes and validates an untrusted payload.
    pub fn from_value(value: Value) -> Result<Self> {
        let record: StoredRecord = serde_json::from_value(value)
            .map_err(|e| InventoryError::InvalidRecord(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    pub fn from_row(row: &AggregatedRow) -> Self {
        StoredRecord::Holding(Holding {
            market_hash_name: row.market_hash_name.clone(),
            quantity: row.quantity,
            buy_price: None,
            note: None,
        })
    }

    pub fn market_hash_name(&self) -> &str {
        match self {
            StoredRecord::Holding(h) => &h.market_hash_name,
            StoredRecord::Watch(w) => &w.market_hash_name,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.market_hash_name().trim().is_empty() {
            return Err(InventoryError::InvalidRecord("market_hash_name is empty".into()));
        }

        match self {
            StoredRecord::Holding(h) => {
                if h.quantity == 0 {
                    return Err(InventoryError::InvalidRecord("quantity must be at least 1".into()));
                }
                if let Some(p) = h.buy_price {
                    check_price("buy_price", p)?;
                }
            }
            StoredRecord::Watch(w) => check_price("target_price", w.target_price)?,
        }
        Ok(())
    }
}

fn check_price(field: &str, price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::InvalidRecord(format!("{} must be a non-negative number, got {}", field, price)));
    }
    Ok(())
}
