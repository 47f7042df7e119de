use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
