//! Per-resource service facades.
//!
//! [`HalResourceService`] binds a [`HalClient`] to one resource name, so
//! repository-style calls need neither the name nor a type annotation at
//! each call site. [`HalResourceOperation`] gives model types the same calls
//! as associated functions.
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::hal::{HalResourceOperation, RequestBody};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     pub name: String,
//! }
//!
//! impl HalResourceOperation for Product {
//!     const RESOURCE_NAME: &'static str = "products";
//! }
//!
//! let chair = Product::get_resource(&client, 1, None).await?;
//! let page = Product::get_page(&client, None).await?;
//! let created = Product::create_resource(&client, &RequestBody::new(Product { name: "Lamp".into() }), None).await?;
//! ```

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{HalClient, HttpMethod};
use crate::hal::{
    GetOption, HalDocument, HalResponse, Include, PagedGetOption, PagedResourceCollection,
    RequestBody, RequestOption, Resource, ResourceCollection, ResourceError,
};

/// Repository-style operations on one resource name.
#[derive(Debug)]
pub struct HalResourceService<'a, T> {
    client: &'a HalClient,
    resource_name: String,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for HalResourceService<'_, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            resource_name: self.resource_name.clone(),
            marker: PhantomData,
        }
    }
}

impl<'a, T> HalResourceService<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a service for `resource_name`.
    pub fn new(client: &'a HalClient, resource_name: impl Into<String>) -> Self {
        Self {
            client,
            resource_name: resource_name.into(),
            marker: PhantomData,
        }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// See [`HalClient::get_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn get_resource(
        &self,
        id: impl Display,
        options: Option<GetOption>,
    ) -> Result<Resource<T>, ResourceError> {
        self.client
            .get_resource(&self.resource_name, id, options)
            .await
    }

    /// See [`HalClient::get_collection`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn get_collection(
        &self,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<T>, ResourceError> {
        self.client
            .get_collection(&self.resource_name, options)
            .await
    }

    /// See [`HalClient::get_page`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn get_page(
        &self,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<T>, ResourceError> {
        self.client.get_page(&self.resource_name, options).await
    }

    /// See [`HalClient::create_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn create_resource(
        &self,
        body: &RequestBody<T>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client
            .create_resource(&self.resource_name, body, options)
            .await
    }

    /// See [`HalClient::update_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn update_resource(
        &self,
        entity: &Resource<T>,
        include: Include,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client.update_resource(entity, include, options).await
    }

    /// See [`HalClient::update_resource_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn update_resource_by_id(
        &self,
        id: impl Display,
        body: &RequestBody<T>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client
            .update_resource_by_id(&self.resource_name, id, body, options)
            .await
    }

    /// See [`HalClient::patch_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn patch_resource<B: Serialize>(
        &self,
        entity: &Resource<T>,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client.patch_resource(entity, body, options).await
    }

    /// See [`HalClient::patch_resource_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn patch_resource_by_id<B: Serialize>(
        &self,
        id: impl Display,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client
            .patch_resource_by_id(&self.resource_name, id, body, options)
            .await
    }

    /// See [`HalClient::delete_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn delete_resource(
        &self,
        entity: &Resource<T>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client.delete_resource(entity, options).await
    }

    /// See [`HalClient::delete_resource_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn delete_resource_by_id(
        &self,
        id: impl Display,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<T>, ResourceError> {
        self.client
            .delete_resource_by_id(&self.resource_name, id, options)
            .await
    }

    /// See [`HalClient::search_resource`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn search_resource(
        &self,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<Resource<T>, ResourceError> {
        self.client
            .search_resource(&self.resource_name, query, options)
            .await
    }

    /// See [`HalClient::search_collection`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn search_collection(
        &self,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<T>, ResourceError> {
        self.client
            .search_collection(&self.resource_name, query, options)
            .await
    }

    /// See [`HalClient::search_page`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn search_page(
        &self,
        query: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<T>, ResourceError> {
        self.client
            .search_page(&self.resource_name, query, options)
            .await
    }

    /// See [`HalClient::custom_query`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn custom_query(
        &self,
        method: HttpMethod,
        query: &str,
        body: Option<serde_json::Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<T>, ResourceError> {
        self.client
            .custom_query(method, &self.resource_name, query, body, options)
            .await
    }

    /// See [`HalClient::custom_search_query`].
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    pub async fn custom_search_query(
        &self,
        method: HttpMethod,
        query: &str,
        body: Option<serde_json::Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<T>, ResourceError> {
        self.client
            .custom_search_query(method, &self.resource_name, query, body, options)
            .await
    }
}

/// A model type exposed by the server under a fixed resource name.
///
/// Implementors only declare [`Self::RESOURCE_NAME`]; every operation has a
/// default implementation delegating to [`HalResourceService`].
#[allow(async_fn_in_trait)]
pub trait HalResourceOperation: Serialize + DeserializeOwned + Sized {
    /// The collection path segment, e.g. `"products"`.
    const RESOURCE_NAME: &'static str;

    /// Returns a service bound to [`Self::RESOURCE_NAME`].
    fn service(client: &HalClient) -> HalResourceService<'_, Self> {
        HalResourceService::new(client, Self::RESOURCE_NAME)
    }

    /// Fetches one resource by id.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn get_resource(
        client: &HalClient,
        id: impl Display,
        options: Option<GetOption>,
    ) -> Result<Resource<Self>, ResourceError> {
        Self::service(client).get_resource(id, options).await
    }

    /// Fetches the whole collection.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn get_collection(
        client: &HalClient,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<Self>, ResourceError> {
        Self::service(client).get_collection(options).await
    }

    /// Fetches one page.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn get_page(
        client: &HalClient,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<Self>, ResourceError> {
        Self::service(client).get_page(options).await
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn create_resource(
        client: &HalClient,
        body: &RequestBody<Self>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client).create_resource(body, options).await
    }

    /// Replaces a resource at its self link.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn update_resource(
        client: &HalClient,
        entity: &Resource<Self>,
        include: Include,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client)
            .update_resource(entity, include, options)
            .await
    }

    /// Replaces a resource by id.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn update_resource_by_id(
        client: &HalClient,
        id: impl Display,
        body: &RequestBody<Self>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client)
            .update_resource_by_id(id, body, options)
            .await
    }

    /// Partially updates a resource at its self link.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn patch_resource<B: Serialize>(
        client: &HalClient,
        entity: &Resource<Self>,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client)
            .patch_resource(entity, body, options)
            .await
    }

    /// Partially updates a resource by id.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn patch_resource_by_id<B: Serialize>(
        client: &HalClient,
        id: impl Display,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client)
            .patch_resource_by_id(id, body, options)
            .await
    }

    /// Deletes a resource at its self link.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn delete_resource(
        client: &HalClient,
        entity: &Resource<Self>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client).delete_resource(entity, options).await
    }

    /// Deletes a resource by id.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn delete_resource_by_id(
        client: &HalClient,
        id: impl Display,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<Self>, ResourceError> {
        Self::service(client)
            .delete_resource_by_id(id, options)
            .await
    }

    /// Runs a search expecting one resource.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn search_resource(
        client: &HalClient,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<Resource<Self>, ResourceError> {
        Self::service(client).search_resource(query, options).await
    }

    /// Runs a search expecting a collection.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn search_collection(
        client: &HalClient,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<Self>, ResourceError> {
        Self::service(client).search_collection(query, options).await
    }

    /// Runs a search expecting a page.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn search_page(
        client: &HalClient,
        query: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<Self>, ResourceError> {
        Self::service(client).search_page(query, options).await
    }

    /// Sends a custom request to `{base}/{resource}/{query}`.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn custom_query(
        client: &HalClient,
        method: HttpMethod,
        query: &str,
        body: Option<serde_json::Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<Self>, ResourceError> {
        Self::service(client)
            .custom_query(method, query, body, options)
            .await
    }

    /// Sends a custom request to `{base}/{resource}/search/{query}`.
    ///
    /// # Errors
    ///
    /// Propagates the client error.
    async fn custom_search_query(
        client: &HalClient,
        method: HttpMethod,
        query: &str,
        body: Option<serde_json::Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<Self>, ResourceError> {
        Self::service(client)
            .custom_search_query(method, query, body, options)
            .await
    }
}
