use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save slot '{slot}' not found")]
    SlotNotFound { slot: String },

    #[error("Unknown state key '{key}'")]
    UnknownStateKey { key: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type HotelResult<T> = Result<T, HotelError>;
