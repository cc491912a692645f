use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Local validation failures. These never reach the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a city name!")]
    EmptyInput,
}

/// Everything that can go wrong between sending the request and holding a snapshot.
///
/// The controller folds all of these into one "not found" message; the variants
/// only exist for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather service returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather report is missing data: {0}")]
    Malformed(String),

    #[error("no response from weather service within {0:?}")]
    Timeout(Duration),
}
