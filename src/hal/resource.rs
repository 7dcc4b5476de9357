//! Typed HAL resources and relation navigation.
//!
//! This module defines the [`ResourceIdentifiable`] trait, which gives any
//! value owning a `_links` map relation lookup and relation navigation, and
//! the two concrete resource types:
//!
//! - [`Resource<T>`]: an entity with a `self` link; it can be updated,
//!   deleted and bound to other resources
//! - [`EmbeddedResource<T>`]: a value object without a `self` link
//!
//! The typed payload `T` is flattened beside `_links`, so a model struct only
//! declares its own fields. Nested resources are declared by field type
//! (`Resource<Category>`, `Vec<Resource<Tag>>`) and are hydrated by serde.
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::hal::{Resource, ResourceIdentifiable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     pub name: String,
//!     pub price: f64,
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Category {
//!     pub name: String,
//! }
//!
//! let product: Resource<Product> = client.get_resource("products", 1, None).await?;
//! let category: Resource<Category> = product.get_relation(&client, "category", None).await?;
//! product.bind_relation(&client, "category", &category).await?;
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HalClient, HttpMethod, HttpResponse};
use crate::hal::url::{remove_template_params, resource_id_from_url, resource_name_from_url};
use crate::hal::utils::resolve_uri_list;
use crate::hal::{
    GetOption, HalResponse, Link, Links, PagedGetOption, PagedResourceCollection, RequestBody,
    RequestOption, ResourceCollection, ResourceError, SELF_REL,
};

/// A value that owns a HAL `_links` map.
///
/// Implementors get relation lookup and the relation-navigation methods.
/// Navigation methods take the [`HalClient`] explicitly; a resource holds no
/// connection of its own.
#[allow(async_fn_in_trait)]
pub trait ResourceIdentifiable {
    /// Returns the `_links` map.
    fn links(&self) -> &Links;

    /// Returns the link for a relation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] if the links are empty,
    /// the relation is absent, or its href is empty.
    fn get_relation_link(&self, relation: &str) -> Result<&Link, ResourceError> {
        self.links().relation(relation)
    }

    /// Returns `true` if the relation is present with a non-empty href.
    fn has_relation(&self, relation: &str) -> bool {
        self.links().has(relation)
    }

    /// Fetches a related resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::ShapeMismatch`] if the target is not a resource, or
    /// an HTTP error.
    async fn get_relation<R>(
        &self,
        client: &HalClient,
        relation: &str,
        options: Option<GetOption>,
    ) -> Result<Resource<R>, ResourceError>
    where
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client.get_resource_by_url(&link.href, options).await
    }

    /// Fetches a related collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::ShapeMismatch`] if the target is not a collection, or
    /// an HTTP error.
    async fn get_related_collection<R>(
        &self,
        client: &HalClient,
        relation: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<R>, ResourceError>
    where
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client.get_collection_by_url(&link.href, options).await
    }

    /// Fetches a page of a related collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::ShapeMismatch`] if the target is not a paged
    /// collection, or an HTTP error.
    async fn get_related_page<R>(
        &self,
        client: &HalClient,
        relation: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<R>, ResourceError>
    where
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client.get_page_by_url(&link.href, options).await
    }

    /// Sends a POST to a relation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation or
    /// an HTTP error.
    async fn post_relation<B, R>(
        &self,
        client: &HalClient,
        relation: &str,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client
            .send_by_url(HttpMethod::Post, &link.href, Some(body), options)
            .await
    }

    /// Sends a PUT to a relation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation or
    /// an HTTP error.
    async fn put_relation<B, R>(
        &self,
        client: &HalClient,
        relation: &str,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client
            .send_by_url(HttpMethod::Put, &link.href, Some(body), options)
            .await
    }

    /// Sends a PATCH to a relation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation or
    /// an HTTP error.
    async fn patch_relation<B, R>(
        &self,
        client: &HalClient,
        relation: &str,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let link = self.get_relation_link(relation)?;
        client
            .send_by_url(HttpMethod::Patch, &link.href, Some(body), options)
            .await
    }
}

/// An entity resource: typed data plus a `_links` map with a `self` link.
///
/// Dereferences to the payload, so `product.name` reads the model field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource<T> {
    /// The `_links` map.
    #[serde(rename = "_links", default)]
    pub links: Links,
    /// The typed payload.
    #[serde(flatten)]
    pub data: T,
}

impl<T> Resource<T> {
    /// Creates a resource with the given `self` link.
    pub fn new(data: T, self_href: impl Into<String>) -> Self {
        Self {
            links: Links::new().with(SELF_REL, Link::new(self_href)),
            data,
        }
    }

    /// Returns the `self` href with any URI template stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if there is no non-empty
    /// `self` link.
    pub fn get_self_link_href(&self) -> Result<String, ResourceError> {
        self.links
            .self_link()
            .filter(|link| !link.href.is_empty())
            .map(|link| remove_template_params(&link.href))
            .ok_or(ResourceError::MissingSelfLink)
    }

    /// Returns the id segment of the `self` link.
    #[must_use]
    pub fn resource_id(&self) -> Option<String> {
        self.get_self_link_href()
            .ok()
            .and_then(|href| resource_id_from_url(&href))
    }

    /// Returns `true` if the `self` link points into the named collection.
    ///
    /// The comparison ignores ASCII case.
    #[must_use]
    pub fn is_resource_of(&self, resource_name: &str) -> bool {
        self.get_self_link_href()
            .ok()
            .and_then(|href| resource_name_from_url(&href))
            .is_some_and(|name| name.eq_ignore_ascii_case(resource_name.trim_matches('/')))
    }

    /// Consumes the resource, returning the payload.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Adds entities to a collection relation (POST `text/uri-list`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::MissingSelfLink`] if an entity has no `self` link, or
    /// an HTTP error.
    pub async fn add_collection_relation<U>(
        &self,
        client: &HalClient,
        relation: &str,
        entities: &[Resource<U>],
    ) -> Result<HttpResponse, ResourceError> {
        let link = self.get_relation_link(relation)?;
        let body = resolve_uri_list(entities)?;
        client
            .send_uri_list(HttpMethod::Post, &link.href, Some(body))
            .await
    }

    /// Binds a single-valued relation to an entity (PUT `text/uri-list`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::MissingSelfLink`] if the entity has no `self` link,
    /// or an HTTP error.
    pub async fn bind_relation<U>(
        &self,
        client: &HalClient,
        relation: &str,
        entity: &Resource<U>,
    ) -> Result<HttpResponse, ResourceError> {
        let link = self.get_relation_link(relation)?;
        let body = entity.get_self_link_href()?;
        client
            .send_uri_list(HttpMethod::Put, &link.href, Some(body))
            .await
    }

    /// Removes a single-valued relation (DELETE on the relation URI).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation or
    /// an HTTP error.
    pub async fn unbind_relation(
        &self,
        client: &HalClient,
        relation: &str,
    ) -> Result<HttpResponse, ResourceError> {
        let link = self.get_relation_link(relation)?;
        client
            .send_uri_list(HttpMethod::Delete, &link.href, None)
            .await
    }

    /// Removes one entity from a collection relation
    /// (DELETE `{relation}/{entity id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation,
    /// [`ResourceError::MissingSelfLink`] if the entity has no usable `self`
    /// link, or an HTTP error.
    pub async fn unbind_collection_relation<U>(
        &self,
        client: &HalClient,
        relation: &str,
        entity: &Resource<U>,
    ) -> Result<HttpResponse, ResourceError> {
        let link = self.get_relation_link(relation)?;
        let id = entity.resource_id().ok_or(ResourceError::MissingSelfLink)?;
        let url = format!(
            "{}/{id}",
            remove_template_params(&link.href).trim_end_matches('/')
        );
        client.send_uri_list(HttpMethod::Delete, &url, None).await
    }

    /// Removes every entity from a collection relation
    /// (PUT an empty `text/uri-list`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] for a missing relation or
    /// an HTTP error.
    pub async fn clear_collection_relation(
        &self,
        client: &HalClient,
        relation: &str,
    ) -> Result<HttpResponse, ResourceError> {
        let link = self.get_relation_link(relation)?;
        client
            .send_uri_list(HttpMethod::Put, &link.href, Some(String::new()))
            .await
    }
}

impl<T> ResourceIdentifiable for Resource<T> {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl<T> Deref for Resource<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Resource<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

/// A value object: typed data plus a `_links` map without a `self` link.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedResource<T> {
    /// The `_links` map.
    #[serde(rename = "_links", default)]
    pub links: Links,
    /// The typed payload.
    #[serde(flatten)]
    pub data: T,
}

impl<T> EmbeddedResource<T> {
    /// Creates an embedded resource without links.
    pub fn new(data: T) -> Self {
        Self {
            links: Links::new(),
            data,
        }
    }

    /// Consumes the resource, returning the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> ResourceIdentifiable for EmbeddedResource<T> {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl<T> Deref for EmbeddedResource<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for EmbeddedResource<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}
