//! HTTP client error types.

use kart_commerce::{LookupError, ProductId};
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// Check if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::HttpError { status: 404, .. })
    }

    /// Classify as a lookup failure for `product_id`.
    pub fn into_lookup_error(self, product_id: ProductId) -> LookupError {
        if self.is_not_found() {
            LookupError::NotFound(product_id)
        } else {
            LookupError::Unavailable(self.to_string())
        }
    }
}
