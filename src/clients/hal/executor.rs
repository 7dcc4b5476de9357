//! HTTP execution with caching and stage logging.

use serde_json::Value;

use crate::clients::hal::cache::{CacheKey, ResourceCache};
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};

/// Sends requests through the [`HttpClient`], serving GETs from the cache
/// and evicting it after every successful mutation.
#[derive(Debug)]
pub struct HttpExecutor {
    http: HttpClient,
    cache: Box<dyn ResourceCache>,
    cache_enabled: bool,
    verbose: bool,
}

impl HttpExecutor {
    /// Creates an executor.
    pub fn new(
        http: HttpClient,
        cache: Box<dyn ResourceCache>,
        cache_enabled: bool,
        verbose: bool,
    ) -> Self {
        Self {
            http,
            cache,
            cache_enabled,
            verbose,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the cache.
    #[must_use]
    pub fn cache(&self) -> &dyn ResourceCache {
        self.cache.as_ref()
    }

    /// Sends a GET and returns the body.
    ///
    /// With `use_cache` (and caching enabled), a live cached body is returned
    /// without a request; a fresh body is stored.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request failure or a non-2xx status.
    pub async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        use_cache: bool,
    ) -> Result<Value, HttpError> {
        let url = self.http.resolve_url(url)?;
        let key = CacheKey::new(url.as_str(), &query);

        if self.cache_enabled && use_cache {
            if let Some(body) = self.cache.get(&key) {
                stage!(self.verbose, %url, "Cache hit");
                return Ok(body);
            }
        }

        stage!(self.verbose, method = "get", %url, ?query, "Request started");
        let request = HttpRequest::builder(HttpMethod::Get, url.as_str())
            .query(query)
            .build()?;
        let response = self.http.request(request).await?;
        stage!(self.verbose, method = "get", %url, code = response.code, "Response received");

        if self.cache_enabled {
            self.cache.put(key, response.body.clone());
        }
        Ok(response.body)
    }

    /// Sends a mutation and returns the full response.
    ///
    /// The whole cache is evicted when the request succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request validation failure, network failure
    /// or a non-2xx status.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<(Value, DataType)>,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.http.resolve_url(url)?;
        stage!(self.verbose, %method, %url, ?query, "Request started");

        let mut builder = HttpRequest::builder(method, url.as_str()).query(query);
        if let Some((body, body_type)) = body {
            builder = builder.body(body).body_type(body_type);
        }
        let response = self.http.request(builder.build()?).await?;
        stage!(self.verbose, %method, %url, code = response.code, "Response received");

        if self.cache_enabled && method.is_mutation() {
            tracing::warn!(%method, %url, "Evicting resource cache after mutation");
            self.cache.evict_all();
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::NoopCache;
    use crate::config::{BaseUrl, HateoasConfig};

    #[test]
    fn test_executor_exposes_http_client() {
        let config = HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
            .build()
            .unwrap();
        let http = HttpClient::new(&config).unwrap();
        let executor = HttpExecutor::new(http, Box::new(NoopCache), false, false);

        assert_eq!(executor.http().base_url().as_ref(), "http://localhost:8080/api");
        assert!(executor
            .cache()
            .get(&CacheKey::new("http://localhost:8080/api/products", &[]))
            .is_none());
    }
}
