pub mod inventory;
pub mod market_name_parse;
