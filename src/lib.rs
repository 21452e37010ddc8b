//! Steam inventory tracking for CS2 cosmetics.
//!
//! Inventory pages from `steamcommunity.com/inventory` are merged and folded
//! into display rows by [`parsing::inventory::normalize`]; the rows can then be
//! priced against the csgotrader.app feeds and kept as validated records.

pub mod browser;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod pricing;
pub mod store;

pub use error::{InventoryError, Result};
pub use models::item::AggregatedRow;
pub use models::steam::{RawAction, RawAsset, RawChunk, RawDescription};
pub use parsing::inventory::{normalize, normalize_with, parse_chunks, IdentityKey, NormalizeOptions};
