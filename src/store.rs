use std::{fs, path::PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::Result,
    models::{item::AggregatedRow, record::StoredRecord},
};

/// Key-value storage for validated records.
pub trait RecordStore {
    fn get(&self, key: &str) -> Option<&StoredRecord>;
    fn set(&mut self, key: &str, record: StoredRecord) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<Option<StoredRecord>>;
    fn keys(&self) -> Vec<String>;
}

/// Validates an untrusted payload and stores it under `key`. Nothing is written on rejection.
pub fn save_payload<S: RecordStore + ?Sized>(store: &mut S, key: &str, payload: Value) -> Result<StoredRecord> {
    let record = StoredRecord::from_value(payload)?;
    store.set(key, record.clone())?;
    info!(key, name = record.market_hash_name(), "stored record");
    Ok(record)
}

/// Stores each normalized row as a holding keyed by its market hash name.
/// Rows sharing a name overwrite each other, the last one wins. Rows that don't validate
/// (no market name at all) are skipped. Returns how many were stored.
pub fn import_rows<S: RecordStore + ?Sized>(store: &mut S, rows: &[AggregatedRow]) -> Result<usize> {
    let mut imported = 0;
    for row in rows {
        let record = StoredRecord::from_row(row);
        if let Err(e) = record.validate() {
            warn!(error = %e, "skipping row");
            continue;
        }
        store.set(&row.market_hash_name, record)?;
        imported += 1;
    }
    info!(imported, "imported inventory rows");
    Ok(imported)
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: IndexMap<String, StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&StoredRecord> {
        self.records.get(key)
    }

    fn set(&mut self, key: &str, record: StoredRecord) -> Result<()> {
        self.records.insert(key.to_string(), record);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<StoredRecord>> {
        Ok(self.records.shift_remove(key))
    }

    fn keys(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }
}

/// Records kept as one pretty printed JSON object, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: IndexMap<String, StoredRecord>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty if it doesn't exist yet. Every stored record is re-validated.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut records = IndexMap::new();

        if path.exists() {
            let raw: IndexMap<String, Value> = serde_json::from_str(&fs::read_to_string(&path)?)?;
            for (key, value) in raw {
                records.insert(key, StoredRecord::from_value(value)?);
            }
        }

        Ok(Self { path, records })
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&StoredRecord> {
        self.records.get(key)
    }

    fn set(&mut self, key: &str, record: StoredRecord) -> Result<()> {
        self.records.insert(key.to_string(), record);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<Option<StoredRecord>> {
        let removed = self.records.shift_remove(key);
        if removed.is_some() {
            self.flush()?;
        }
        Ok(removed)
    }

    fn keys(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{error::InventoryError, models::record::Holding};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skinvault-store-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn rejected_payload_is_not_stored() {
        let mut store = MemoryStore::new();
        let res = save_payload(&mut store, "bad", json!({ "kind": "holding", "market_hash_name": "x", "quantity": "two" }));

        assert!(matches!(res, Err(InventoryError::InvalidRecord(_))));
        assert!(store.get("bad").is_none());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn memory_store_keeps_insertion_order() {
        let mut store = MemoryStore::new();
        save_payload(&mut store, "b", json!({ "kind": "watch", "market_hash_name": "Kilowatt Case", "target_price": 0.3 })).unwrap();
        save_payload(&mut store, "a", json!({ "kind": "holding", "market_hash_name": "Clutch Case", "quantity": 3 })).unwrap();

        assert_eq!(store.keys(), ["b", "a"]);
        assert!(store.remove("b").unwrap().is_some());
        assert_eq!(store.keys(), ["a"]);
    }

    #[test]
    fn import_stores_rows_as_holdings() {
        let chunk = crate::RawChunk {
            assets: vec![
                crate::RawAsset { classid: "1".into(), instanceid: "0".into(), assetid: "A".into() },
                crate::RawAsset { classid: "1".into(), instanceid: "0".into(), assetid: "B".into() },
                crate::RawAsset { classid: "2".into(), instanceid: "0".into(), assetid: "C".into() },
            ],
            descriptions: vec![
                crate::RawDescription { classid: "1".into(), instanceid: "0".into(), market_hash_name: "Clutch Case".into(), ..Default::default() },
                crate::RawDescription { classid: "2".into(), instanceid: "0".into(), ..Default::default() },
            ],
            ..Default::default()
        };
        let rows = crate::normalize(&[chunk]);

        let mut store = MemoryStore::new();
        assert_eq!(import_rows(&mut store, &rows).unwrap(), 1);
        assert!(matches!(store.get("Clutch Case"), Some(StoredRecord::Holding(Holding { quantity: 2, .. }))));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        fs::remove_file(&path).ok();

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            save_payload(&mut store, "clutch", json!({ "kind": "holding", "market_hash_name": "Clutch Case", "quantity": 3, "buy_price": 0.2 })).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        fs::remove_file(&path).ok();

        let expected = StoredRecord::Holding(Holding {
            market_hash_name: "Clutch Case".into(),
            quantity: 3,
            buy_price: Some(0.2),
            note: None,
        });
        assert_eq!(store.get("clutch"), Some(&expected));
    }

    #[test]
    fn file_store_refuses_tampered_file() {
        let path = temp_path("tampered");
        fs::write(&path, r#"{ "x": { "kind": "holding", "market_hash_name": "", "quantity": 1 } }"#).unwrap();

        let res = JsonFileStore::open(&path);
        fs::remove_file(&path).ok();
        assert!(res.is_err());
    }
}
