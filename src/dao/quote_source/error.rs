use thiserror::Error;

/// Convenient result alias returning [`QuoteSourceError`] failures.
pub type QuoteSourceResult<T> = Result<T, QuoteSourceError>;

/// Failures that can occur while talking to the quote provider.
#[derive(Debug, Error)]
pub enum QuoteSourceError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build quote provider client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The provider only serves a bounded number of random quotes.
    #[error("amount should be between 1 and 10. Given: {amount}")]
    AmountOutOfRange { amount: usize },
    #[error("unexpected error when retrieving `{path}` from quote provider")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status code received: {status}")]
    RequestStatus { path: String, status: u16 },
    /// The provider does not know the requested quote.
    #[error("unknown_quote_id: {id}")]
    UnknownQuote { id: i64 },
    #[error("unexpected error when decoding result from `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}
