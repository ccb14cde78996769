use thiserror::Error;

/// Storage failures. Every variant is reported to clients as a server error.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("could not connect to the database: {0}")]
    Connect(String),

    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}
