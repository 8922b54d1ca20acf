use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("deadline of {0:?} exceeded")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    UnexpectedStatus(StatusCode),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("file error: {0}")]
    File(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
