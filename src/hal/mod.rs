//! HAL resource model.
//!
//! This module maps HAL+JSON documents onto typed Rust values and back.
//!
//! # Overview
//!
//! - [`Resource`] / [`EmbeddedResource`]: typed payload plus `_links`
//! - [`ResourceCollection`] / [`PagedResourceCollection`]: `_embedded` lists
//! - [`ResourceIdentifiable`]: relation lookup and navigation
//! - [`ResourceKind`]: structural detection of the document kind
//! - [`GetOption`], [`PagedGetOption`], [`RequestOption`], [`RequestBody`]:
//!   request options
//! - [`HalResourceService`] / [`HalResourceOperation`]: per-resource facades
//! - [`url`] and [`utils`]: URI templates, instantiation and body flattening
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::hal::{PagedGetOption, Resource, ResourceIdentifiable, Sort, SortOrder};
//!
//! let options = PagedGetOption::default().sort(Sort::new().by("name", SortOrder::Asc));
//! let page = client.get_page::<Product>("products", Some(options)).await?;
//! for product in page.resources() {
//!     let category = product.get_relation::<Category>(&client, "category", None).await?;
//!     println!("{} -> {}", product.name, category.name);
//! }
//! ```

mod collection;
pub(crate) mod errors;
mod kind;
mod link;
mod params;
mod resource;
mod response;
mod service;
pub mod url;
pub mod utils;

pub use collection::{PageData, PagedResourceCollection, ResourceCollection};
pub use errors::ResourceError;
pub use kind::ResourceKind;
pub use link::{Link, Links, SELF_REL};
pub use params::{
    GetOption, Include, Observe, PageParam, PagedGetOption, ParamValue, RequestBody,
    RequestOption, RequestParam, Sort, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    RESERVED_PARAMS,
};
pub use resource::{EmbeddedResource, Resource, ResourceIdentifiable};
pub use response::HalResponse;
pub use service::{HalResourceOperation, HalResourceService};
pub use utils::HalDocument;
