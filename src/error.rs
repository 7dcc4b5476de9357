//! Configuration error types for the HATEOAS client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid base URL or missing field is reported when the client is set up,
//! not on the first request.
//!
//! # Example
//!
//! ```rust
//! use hateoas_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base API URL cannot be empty.
    #[error("Base API URL cannot be empty. Please provide the root URL of the HAL API.")]
    EmptyBaseUrl,

    /// The base API URL is invalid.
    #[error("Invalid base API URL '{url}'. Please provide a URL with scheme (e.g., 'http://localhost:8080/api/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A default header name or value is invalid.
    #[error("Invalid default header '{name}'.")]
    InvalidHeader {
        /// The header name that was provided.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
