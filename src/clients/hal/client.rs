//! HAL client implementation.
//!
//! [`HalClient`] is the single entry point for talking to a HAL server. It
//! offers two families of operations:
//!
//! - **By URL**: fetch or send to any link, templated or not
//!   ([`HalClient::get_resource_by_url`], [`HalClient::get_page_by_url`], ...)
//! - **By resource name**: the usual repository operations on
//!   `{base}/{name}` ([`HalClient::get_resource`], [`HalClient::create_resource`],
//!   [`HalClient::search_page`], ...)
//!
//! Every read validates the kind of the returned document before
//! instantiating it, so asking for a collection and receiving a single
//! resource fails with [`ResourceError::ShapeMismatch`].

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::hal::cache::{InMemoryCache, NoopCache, ResourceCache};
use crate::clients::hal::executor::HttpExecutor;
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpResponse};
use crate::config::HateoasConfig;
use crate::hal::errors::require_not_empty;
use crate::hal::url::{convert_to_http_params, generate_link_url, generate_resource_url};
use crate::hal::utils::{
    instantiate_collection, instantiate_paged_collection, instantiate_resource, resolve_values,
};
use crate::hal::{
    GetOption, HalDocument, HalResponse, Include, Link, PageParam, PagedGetOption,
    PagedResourceCollection, RequestBody, RequestOption, Resource, ResourceCollection,
    ResourceError,
};

/// Client for a HAL/HATEOAS REST API.
///
/// # Thread Safety
///
/// `HalClient` is `Send + Sync`; share it between tasks behind an `Arc` or
/// by reference.
///
/// # Example
///
/// ```rust,ignore
/// use hateoas_client::{BaseUrl, HalClient, HateoasConfig};
/// use hateoas_client::hal::{PageParam, PagedGetOption, Resource};
///
/// let config = HateoasConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:8080/api")?)
///     .build()?;
/// let client = HalClient::new(config)?;
///
/// let product: Resource<Product> = client.get_resource("products", 1, None).await?;
/// let page = client
///     .get_page::<Product>("products", Some(PagedGetOption::default().page(PageParam::new(0, 50))))
///     .await?;
/// ```
#[derive(Debug)]
pub struct HalClient {
    config: HateoasConfig,
    executor: HttpExecutor,
}

// Verify HalClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HalClient>();
};

impl HalClient {
    /// Creates a client.
    ///
    /// The cache is an [`InMemoryCache`] with the configured lifetime when
    /// caching is enabled, a [`NoopCache`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the underlying HTTP client cannot be built.
    pub fn new(config: HateoasConfig) -> Result<Self, HttpError> {
        let cache: Box<dyn ResourceCache> = if config.cache_enabled() {
            Box::new(InMemoryCache::new(config.cache_lifetime()))
        } else {
            Box::new(NoopCache)
        };
        Self::build(config, cache)
    }

    /// Creates a client with a custom cache.
    ///
    /// The cache is consulted only when caching is enabled in the config.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the underlying HTTP client cannot be built.
    pub fn with_cache(
        config: HateoasConfig,
        cache: impl ResourceCache + 'static,
    ) -> Result<Self, HttpError> {
        Self::build(config, Box::new(cache))
    }

    fn build(config: HateoasConfig, cache: Box<dyn ResourceCache>) -> Result<Self, HttpError> {
        let http = HttpClient::new(&config)?;
        let executor = HttpExecutor::new(
            http,
            cache,
            config.cache_enabled(),
            config.verbose_logs(),
        );
        tracing::debug!(base_url = %config.base_url(), "HAL client created");
        Ok(Self { config, executor })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HateoasConfig {
        &self.config
    }

    /// Returns the cache in use.
    #[must_use]
    pub fn cache(&self) -> &dyn ResourceCache {
        self.executor.cache()
    }

    // ------------------------------------------------------------------
    // By URL
    // ------------------------------------------------------------------

    /// Fetches a resource from a URL or link template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ShapeMismatch`] if the document is not a
    /// resource, [`ResourceError::ReservedParam`] for misplaced params, or an
    /// HTTP error.
    pub async fn get_resource_by_url<T>(
        &self,
        url: &str,
        options: Option<GetOption>,
    ) -> Result<Resource<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch(url, options.map(Into::into)).await?;
        self.stage("resource", url);
        instantiate_resource(body)
    }

    /// Fetches a collection from a URL or link template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ShapeMismatch`] if the document is not a
    /// collection, [`ResourceError::ReservedParam`] for misplaced params, or
    /// an HTTP error.
    pub async fn get_collection_by_url<T>(
        &self,
        url: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch(url, options.map(Into::into)).await?;
        self.stage("collection", url);
        instantiate_collection(body, self.config.hal_format())
    }

    /// Fetches a page from a URL or link template.
    ///
    /// No paging is added unless `options` carries a page; links such as
    /// `next` already encode theirs.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ShapeMismatch`] if the document is not a
    /// collection, [`ResourceError::ReservedParam`] for misplaced params, or
    /// an HTTP error.
    pub async fn get_page_by_url<T>(
        &self,
        url: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch(url, options).await?;
        self.stage("paged collection", url);
        instantiate_paged_collection(body, self.config.hal_format())
    }

    /// Sends a body-carrying or DELETE request to a URL or link template.
    ///
    /// The body is flattened with [`resolve_values`] and sent as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ReservedParam`] for misplaced params,
    /// [`ResourceError::Deserialize`] if the body cannot be serialized or a
    /// returned resource does not fit `R`, or an HTTP error.
    pub async fn send_by_url<B, R>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&RequestBody<B>>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let options = options.unwrap_or_default();
        let observe = options.observe;
        let (url, query) = generate_link_url(&Link::new(url), &options.into())?;
        let body = body
            .map(resolve_values)
            .transpose()?
            .map(|value| (value, DataType::Json));

        let response = self.executor.send(method, &url, body, query).await?;
        HalResponse::from_http(response, observe)
    }

    /// Sends a `text/uri-list` body, used to bind and unbind relations.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error.
    pub async fn send_uri_list(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ResourceError> {
        let (url, query) = generate_link_url(&Link::new(url), &PagedGetOption::default())?;
        let body = body.map(|list| (Value::String(list), DataType::UriList));
        Ok(self.executor.send(method, &url, body, query).await?)
    }

    // ------------------------------------------------------------------
    // By resource name
    // ------------------------------------------------------------------

    /// Fetches `{base}/{resource_name}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or id, plus
    /// the errors of [`Self::get_resource_by_url`].
    pub async fn get_resource<T>(
        &self,
        resource_name: &str,
        id: impl Display,
        options: Option<GetOption>,
    ) -> Result<Resource<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.entity_url(resource_name, &id)?;
        self.get_resource_by_url(&url, options).await
    }

    /// Fetches the `{base}/{resource_name}` collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name, plus the
    /// errors of [`Self::get_collection_by_url`].
    pub async fn get_collection<T>(
        &self,
        resource_name: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, None)?;
        self.get_collection_by_url(&url, options).await
    }

    /// Fetches a page of `{base}/{resource_name}`.
    ///
    /// Page 0 of size 20 is requested unless `options` sets a page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name, plus the
    /// errors of [`Self::get_page_by_url`].
    pub async fn get_page<T>(
        &self,
        resource_name: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, None)?;
        self.get_page_by_url(&url, Some(with_default_page(options)))
            .await
    }

    /// POSTs a new entity to `{base}/{resource_name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name, plus the
    /// errors of [`Self::send_by_url`].
    pub async fn create_resource<B, R>(
        &self,
        resource_name: &str,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, None)?;
        self.send_by_url(HttpMethod::Post, &url, Some(body), options)
            .await
    }

    /// Replaces an entity (PUT to its `self` link) with its current data.
    ///
    /// `include` controls whether `null` fields are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the entity has no
    /// `self` link, plus the errors of [`Self::send_by_url`].
    pub async fn update_resource<T, R>(
        &self,
        entity: &Resource<T>,
        include: Include,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = entity.get_self_link_href()?;
        let body = RequestBody::new(entity).include(include);
        self.send_by_url(HttpMethod::Put, &url, Some(&body), options)
            .await
    }

    /// Replaces `{base}/{resource_name}/{id}` with `body` (PUT).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or id, plus
    /// the errors of [`Self::send_by_url`].
    pub async fn update_resource_by_id<B, R>(
        &self,
        resource_name: &str,
        id: impl Display,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.entity_url(resource_name, &id)?;
        self.send_by_url(HttpMethod::Put, &url, Some(body), options)
            .await
    }

    /// Partially updates an entity (PATCH to its `self` link).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the entity has no
    /// `self` link, plus the errors of [`Self::send_by_url`].
    pub async fn patch_resource<T, B, R>(
        &self,
        entity: &Resource<T>,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = entity.get_self_link_href()?;
        self.send_by_url(HttpMethod::Patch, &url, Some(body), options)
            .await
    }

    /// Partially updates `{base}/{resource_name}/{id}` (PATCH).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or id, plus
    /// the errors of [`Self::send_by_url`].
    pub async fn patch_resource_by_id<B, R>(
        &self,
        resource_name: &str,
        id: impl Display,
        body: &RequestBody<B>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.entity_url(resource_name, &id)?;
        self.send_by_url(HttpMethod::Patch, &url, Some(body), options)
            .await
    }

    /// Deletes an entity through its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the entity has no
    /// `self` link, plus the errors of [`Self::send_by_url`].
    pub async fn delete_resource<T, R>(
        &self,
        entity: &Resource<T>,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        R: DeserializeOwned,
    {
        let url = entity.get_self_link_href()?;
        self.send_by_url(HttpMethod::Delete, &url, None::<&RequestBody<()>>, options)
            .await
    }

    /// Deletes `{base}/{resource_name}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or id, plus
    /// the errors of [`Self::send_by_url`].
    pub async fn delete_resource_by_id<R>(
        &self,
        resource_name: &str,
        id: impl Display,
        options: Option<RequestOption>,
    ) -> Result<HalResponse<R>, ResourceError>
    where
        R: DeserializeOwned,
    {
        let url = self.entity_url(resource_name, &id)?;
        self.send_by_url(HttpMethod::Delete, &url, None::<&RequestBody<()>>, options)
            .await
    }

    /// Runs `{base}/{resource_name}/search/{query}` expecting one resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or query,
    /// plus the errors of [`Self::get_resource_by_url`].
    pub async fn search_resource<T>(
        &self,
        resource_name: &str,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<Resource<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, Some(query))?;
        self.get_resource_by_url(&url, options).await
    }

    /// Runs `{base}/{resource_name}/search/{query}` expecting a collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or query,
    /// plus the errors of [`Self::get_collection_by_url`].
    pub async fn search_collection<T>(
        &self,
        resource_name: &str,
        query: &str,
        options: Option<GetOption>,
    ) -> Result<ResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, Some(query))?;
        self.get_collection_by_url(&url, options).await
    }

    /// Runs `{base}/{resource_name}/search/{query}` expecting a page.
    ///
    /// Page 0 of size 20 is requested unless `options` sets a page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or query,
    /// plus the errors of [`Self::get_page_by_url`].
    pub async fn search_page<T>(
        &self,
        resource_name: &str,
        query: &str,
        options: Option<PagedGetOption>,
    ) -> Result<PagedResourceCollection<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, Some(query))?;
        self.get_page_by_url(&url, Some(with_default_page(options)))
            .await
    }

    /// Sends an arbitrary request to `{base}/{resource_name}/{query}`.
    ///
    /// The result is instantiated by its detected kind. `body` is sent as
    /// JSON as is; use [`resolve_values`] to flatten typed bodies first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyArgument`] for a blank name or query,
    /// [`ResourceError::ReservedParam`] for misplaced params, or an HTTP
    /// error.
    pub async fn custom_query<T>(
        &self,
        method: HttpMethod,
        resource_name: &str,
        query: &str,
        body: Option<Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        require_not_empty(query, "query")?;
        let base = self.resource_url(resource_name, None)?;
        let url = format!("{base}/{}", query.trim_start_matches('/'));
        self.custom(method, &url, body, options.unwrap_or_default())
            .await
    }

    /// Sends an arbitrary request to
    /// `{base}/{resource_name}/search/{query}`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::custom_query`].
    pub async fn custom_search_query<T>(
        &self,
        method: HttpMethod,
        resource_name: &str,
        query: &str,
        body: Option<Value>,
        options: Option<PagedGetOption>,
    ) -> Result<HalDocument<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource_name, Some(query))?;
        self.custom(method, &url, body, options.unwrap_or_default())
            .await
    }

    async fn custom<T>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
        options: PagedGetOption,
    ) -> Result<HalDocument<T>, ResourceError>
    where
        T: DeserializeOwned,
    {
        let value = if method == HttpMethod::Get {
            self.fetch(url, Some(options)).await?
        } else {
            let query = convert_to_http_params(&options)?;
            let body = body.map(|value| (value, DataType::Json));
            self.executor.send(method, url, body, query).await?.body
        };
        self.stage("document", url);
        HalDocument::from_value(value, self.config.hal_format())
    }

    async fn fetch(&self, url: &str, options: Option<PagedGetOption>) -> Result<Value, ResourceError> {
        require_not_empty(url, "url")?;
        let options = options.unwrap_or_default();
        let (url, query) = generate_link_url(&Link::new(url), &options)?;
        Ok(self.executor.get(&url, query, options.use_cache).await?)
    }

    fn resource_url(&self, resource_name: &str, query: Option<&str>) -> Result<String, ResourceError> {
        generate_resource_url(self.config.base_url().as_ref(), resource_name, query)
    }

    fn entity_url(&self, resource_name: &str, id: &dyn Display) -> Result<String, ResourceError> {
        let id = id.to_string();
        require_not_empty(&id, "id")?;
        Ok(format!("{}/{}", self.resource_url(resource_name, None)?, id.trim_matches('/')))
    }

    fn stage(&self, kind: &str, url: &str) {
        stage!(self.config.verbose_logs(), kind, url, "Instantiating response");
    }
}

fn with_default_page(options: Option<PagedGetOption>) -> PagedGetOption {
    let mut options = options.unwrap_or_default();
    options.page.get_or_insert_with(PageParam::default);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;

    fn client() -> HalClient {
        let config = HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api/").unwrap())
            .build()
            .unwrap();
        HalClient::new(config).unwrap()
    }

    #[test]
    fn test_hal_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HalClient>();
    }

    #[test]
    fn test_resource_and_entity_urls() {
        let client = client();
        assert_eq!(
            client.resource_url("products", None).unwrap(),
            "http://localhost:8080/api/products"
        );
        assert_eq!(
            client.resource_url("products", Some("byName")).unwrap(),
            "http://localhost:8080/api/products/search/byName"
        );
        assert_eq!(
            client.entity_url("products", &7).unwrap(),
            "http://localhost:8080/api/products/7"
        );
        assert!(matches!(
            client.entity_url("products", &""),
            Err(ResourceError::EmptyArgument { argument: "id" })
        ));
    }

    #[test]
    fn test_default_page_is_applied_only_when_missing() {
        let options = with_default_page(None);
        assert_eq!(options.page, Some(PageParam::new(0, 20)));

        let options = with_default_page(Some(PagedGetOption::default().page(PageParam::new(3, 5))));
        assert_eq!(options.page, Some(PageParam::new(3, 5)));
    }

    #[test]
    fn test_cache_choice_follows_config() {
        let config = HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
            .cache_enabled(true)
            .build()
            .unwrap();
        let client = HalClient::new(config).unwrap();
        assert!(format!("{:?}", client.cache()).contains("InMemoryCache"));

        assert!(format!("{:?}", self::client().cache()).contains("NoopCache"));
    }
}
