pub mod item;
pub mod item_metadata;
pub mod price;
pub mod record;
pub mod steam;
