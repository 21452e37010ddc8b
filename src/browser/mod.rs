pub mod csgotrader;
pub mod steamcommunity;
