use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};


#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
#[serde(try_from = "String")]
pub enum PricingMode {
    Cheapest,
    MostExpensive,
    #[default]
    Hierarchical,
    Random
}
impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "cheapest" => Ok(Self::Cheapest),
            "mostexpensive" | "most" => Ok(Self::MostExpensive),
            "hierarchical" | "hier" => Ok(Self::Hierarchical),
            "random" | "r" => Ok(Self::Random),
            _ => Err( format!("Pricingmode of {} not allowed.", s))
        }
    }
}
impl TryFrom<String> for PricingMode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, String> {
        s.parse()
    }
}

//--------------------

/// Which side of the order book to read where a feed has both.
#[derive(PartialEq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    StartingAt,
    HighestOrder
}
impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::StartingAt => "starting_at",
            PriceType::HighestOrder => "highest_order"
        }
    }
}

//--------------------

/// Markets served by the csgotrader.app price feed, one JSON file each.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Steam,
    Bitskins,
    Lootfarm,
    Csgotm,
    Csmoney,
    Skinport,
    Csgotrader,
    Csfloat,
    Buff163,
    Youpin,
}
impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Steam => "steam",
            Market::Bitskins => "bitskins",
            Market::Lootfarm => "lootfarm",
            Market::Csgotm => "csgotm",
            Market::Csmoney => "csmoney",
            Market::Skinport => "skinport",
            Market::Csgotrader => "csgotrader",
            Market::Csfloat => "csfloat",
            Market::Buff163 => "buff163",
            Market::Youpin => "youpin",
        }
    }
}
impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//--------------------

/// Currencies the exchange rate feed quotes against USD.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize, EnumIter, EnumString, AsRefStr, Display)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    COP, SAR, PLN, ARS, SGD, GBP,
    #[default]
    USD,
    PHP, DKK, KRW, INR, ZAR, BRL, BGN,
    CLP, JPY, PEN, ETH, TRY, RON, NOK,
    TWD, HUF, MXN, UYU, QAR, AUD, CRC,
    KZT, RUB, BTC, EUR, AED, CZK, HRK,
    MYR, CNY, ILS, UAH, HKD, THB, NZD,
    VND, GEL, SEK, CAD, CHF, ISK, IDR,
    KWD, FET
}
