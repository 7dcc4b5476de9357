//! HTTP client types for HAL API communication.
//!
//! This module provides the HTTP layer and the HAL client built on it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`HalClient`]: Typed HAL operations with caching
//! - [`ResourceCache`]: The cache seam, with [`NoopCache`] and [`InMemoryCache`]
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::{BaseUrl, HateoasConfig};
//! use hateoas_client::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = HateoasConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080/api")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "products")
//!     .query_param("page", "0")
//!     .build()?;
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Requests are sent once. Failures surface to the caller unchanged.

mod errors;
mod hal;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use hal::{CacheKey, HalClient, HttpExecutor, InMemoryCache, NoopCache, ResourceCache};
pub use http_client::{HttpClient, ACCEPT_HAL_JSON, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
