// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BolsaError {
    #[error("Offers endpoint returned status {status}")]
    EndpointStatus { status: u16 },

    #[error("Offers feed is not a JSON array: {0}")]
    MalformedFeed(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}
