use thiserror::Error;

/// Errors surfaced by the reference-data client.
///
/// These are always caught at the call site: one ticker's fetch failure must
/// never abort a whole batch.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    #[error("No data found for symbol: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}
