//! # HATEOAS Client
//!
//! A Rust client for HAL/HATEOAS REST APIs (Spring Data REST and
//! compatible servers), mapping HAL+JSON documents onto typed models.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`HateoasConfig`] and [`HateoasConfigBuilder`]
//! - A validated [`BaseUrl`] newtype
//! - Typed resources ([`hal::Resource`]) with relation navigation
//! - Collections and paged collections with page navigation
//! - URI-template filling and structural kind detection
//! - Flattening of typed graphs into request bodies
//! - An async [`HalClient`] with an optional response cache
//!
//! ## Quick Start
//!
//! ```rust
//! use hateoas_client::{BaseUrl, HateoasConfig};
//!
//! let config = HateoasConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
//!     .verbose_logs(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.base_url().as_ref(), "http://localhost:8080/api");
//! ```
//!
//! ## Reading Resources
//!
//! ```rust,ignore
//! use hateoas_client::{BaseUrl, HalClient, HateoasConfig};
//! use hateoas_client::hal::{Resource, ResourceIdentifiable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Product {
//!     name: String,
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Category {
//!     name: String,
//! }
//!
//! let client = HalClient::new(config)?;
//! let product: Resource<Product> = client.get_resource("products", 1, None).await?;
//! let category: Resource<Category> = product.get_relation(&client, "category", None).await?;
//! println!("{} belongs to {}", product.name, category.name);
//! ```
//!
//! ## Writing Resources
//!
//! ```rust,ignore
//! use hateoas_client::hal::{HalResponse, Include, RequestBody};
//!
//! let created: HalResponse<Product> = client
//!     .create_resource("products", &RequestBody::new(Product { name: "Lamp".into() }), None)
//!     .await?;
//!
//! // Nested resources are sent as their self links
//! client.update_resource::<_, Product>(&product, Include::NonNull, None).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration validates on construction
//! - **Thread-safe**: The client is `Send + Sync`
//! - **Async-first**: Every network operation is an `async fn`

pub mod clients;
pub mod config;
pub mod error;
pub mod hal;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, HalFormat, HateoasConfig, HateoasConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    DataType, HalClient, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

// Re-export the core resource types
pub use hal::{
    EmbeddedResource, Link, PagedResourceCollection, Resource, ResourceCollection, ResourceError,
    ResourceIdentifiable,
};
