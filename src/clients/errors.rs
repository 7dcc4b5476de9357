//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: a request that fails validation before sending
//! - [`HttpError`]: unified error type for all HTTP-related failures
//!
//! Errors are forwarded to the caller unchanged; the client never retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// `message` holds the response body serialized as JSON (or the raw text for
/// bodies that are not JSON).
#[derive(Debug, Error)]
#[error("{method} {url} failed with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The HTTP method of the failed request.
    pub method: String,
    /// The absolute URL of the failed request.
    pub url: String,
    /// Serialized error body.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A `text/uri-list` body was not a JSON string.
    #[error("A text/uri-list body must be a string.")]
    InvalidUriListBody,

    /// The request URL is empty.
    #[error("Cannot send a request without a URL.")]
    EmptyUrl,

    /// The request URL cannot be resolved against the base URL.
    #[error("Cannot resolve '{url}' against the base URL.")]
    InvalidUrl {
        /// The URL as given.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) => None,
        }
    }
}
