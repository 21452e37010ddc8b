//! Persistent configuration.
//!
//! Stored as JSON, by default in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::models::item_metadata::ECONOMY_IMAGE_BASE;
use crate::models::price::{Currency, Market, PriceType, PricingMode};
use crate::parsing::inventory::{IdentityKey, NormalizeOptions};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SteamID64 of the inventory owner.
    pub steamid: Option<u64>,
    pub appid: u32,
    /// Inventory contexts to fetch. The first is the main inventory, the rest
    /// (16 is trade protected items) are optional and fail soft.
    pub contexts: Vec<u32>,
    /// Value of the `steamLoginSecure` cookie, needed for private or trade protected items.
    pub steamloginsecure: Option<String>,
    pub language: String,
    pub page_size: u32,
    pub max_pages: u32,
    pub page_delay_ms: u64,
    pub image_base: String,
    pub identity: IdentityKey,
    pub prefer_markets: Vec<Market>,
    pub pricing_mode: PricingMode,
    /// `starting_at` (lowest listing) or `highest_order` (best buy order).
    pub price_type: PriceType,
    pub currency: Currency,
    /// How long a fetched price feed stays usable for callers that keep a `PriceCache` around.
    pub price_cache_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steamid: None,
            appid: 730,
            contexts: vec![2],
            steamloginsecure: None,
            language: "english".to_string(),
            page_size: 2000,
            max_pages: 10,
            page_delay_ms: 1500,
            image_base: ECONOMY_IMAGE_BASE.to_string(),
            identity: IdentityKey::default(),
            prefer_markets: vec![Market::Youpin, Market::Csfloat, Market::Buff163, Market::Steam],
            pricing_mode: PricingMode::default(),
            price_type: PriceType::default(),
            currency: Currency::default(),
            price_cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("config_dir() unavailable")?;
        Ok(base.join("skinvault").join("skinvault.json"))
    }

    /// Loads `path`, or the default location. A missing file gives the defaults,
    /// a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let json = fs::read_to_string(&path).with_context(|| format!("read {:?}", path))?;
        let cfg: Config = serde_json::from_str(&json).with_context(|| format!("parse {:?}", path))?;
        cfg.price_cache_ttl().with_context(|| format!("invalid {:?}", path))?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, json).with_context(|| format!("write {:?}", path))?;
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            image_base: self.image_base.clone(),
            owner_steamid: self.steamid,
            identity: self.identity,
        }
    }

    pub fn price_cache_ttl(&self) -> Result<TimeDelta> {
        match TimeDelta::try_seconds(self.price_cache_ttl_secs) {
            Some(ttl) if ttl >= TimeDelta::zero() => Ok(ttl),
            _ => bail!("price_cache_ttl_secs of {} is out of range", self.price_cache_ttl_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skinvault-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load(Some(&temp_path("missing"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.contexts, vec![2]);
        assert_eq!(cfg.identity, IdentityKey::Triple);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "steamid": 76561198389123475, "identity": "name-image", "currency": "NOK" }"#).unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.steamid, Some(76561198389123475));
        assert_eq!(cfg.identity, IdentityKey::NameImage);
        assert_eq!(cfg.currency, Currency::NOK);
        assert_eq!(cfg.page_size, 2000);
        assert_eq!(cfg.normalize_options().owner_steamid, Some(76561198389123475));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::write(&path, "{ steamid: ").unwrap();
        let res = Config::load(Some(&path));
        fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn pricing_mode_aliases_load_from_file() {
        for (raw, mode) in [("cheapest", PricingMode::Cheapest), ("most", PricingMode::MostExpensive), ("hier", PricingMode::Hierarchical), ("Random", PricingMode::Random)] {
            let path = temp_path(&format!("mode-{}", raw));
            fs::write(&path, format!(r#"{{ "pricing_mode": "{}", "price_type": "highest_order" }}"#, raw)).unwrap();

            let cfg = Config::load(Some(&path));
            fs::remove_file(&path).ok();

            let cfg = cfg.unwrap();
            assert_eq!(cfg.pricing_mode, mode);
            assert_eq!(cfg.price_type, PriceType::HighestOrder);
        }
    }

    #[test]
    fn out_of_range_ttl_is_an_error_not_a_panic() {
        let path = temp_path("ttl");
        fs::write(&path, format!(r#"{{ "price_cache_ttl_secs": {} }}"#, i64::MAX)).unwrap();
        let res = Config::load(Some(&path));
        fs::remove_file(&path).ok();
        assert!(res.is_err());

        let negative = Config { price_cache_ttl_secs: -5, ..Default::default() };
        assert!(negative.price_cache_ttl().is_err());
        assert_eq!(Config::default().price_cache_ttl().unwrap(), TimeDelta::hours(1));
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("saved");
        let cfg = Config { max_pages: 3, pricing_mode: PricingMode::Cheapest, ..Default::default() };
        cfg.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
