use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api responded with {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected payload: {0}")]
    UnexpectedShape(String),
}
