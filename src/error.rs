use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed sending the HTTP request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET request failed with status {0}")]
    Status(StatusCode),

    #[error("Inventory of {steamid} is private or the cookie is invalid")]
    PrivateInventory { steamid: u64 },

    #[error("Rate limited by steam, try again later")]
    RateLimited,

    #[error("Response was empty or reported no success, steamid and/or appid might be wrong")]
    EmptyResponse,

    #[error("Could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rejected record: {0}")]
    InvalidRecord(String),
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;
