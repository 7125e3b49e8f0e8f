use thiserror::Error;

/// Errors raised while talking to the recipe API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Lookup succeeded but no record matched the id
    #[error("No recipe found with id {0}")]
    NotFound(String),
}

/// Errors that can occur while setting up or running the finder
#[derive(Error, Debug)]
pub enum FinderError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Client builder was given an unusable option
    #[error("Builder error: {0}")]
    Builder(String),

    /// Remote call failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
