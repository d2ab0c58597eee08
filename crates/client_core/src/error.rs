use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url: {0}")]
    InvalidServerUrl(#[from] url::ParseError),
    #[error("seat search request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("seat search response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("seat search transport unavailable: {0}")]
    Unavailable(String),
}
