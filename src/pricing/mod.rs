pub mod cache;
pub mod prices;
