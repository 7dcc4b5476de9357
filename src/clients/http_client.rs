//! HTTP client for HAL API communication.
//!
//! This module provides the [`HttpClient`] type, the thin `reqwest` wrapper
//! every higher layer sends its requests through.

use std::collections::HashMap;

use reqwest::Url;

use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, HateoasConfig};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media types accepted from the server.
pub const ACCEPT_HAL_JSON: &str = "application/hal+json, application/json";

/// HTTP client for making requests to a HAL API.
///
/// The client handles:
/// - Resolving relative paths against the configured base URL
/// - Default headers including User-Agent and `Accept`
/// - Response body parsing and non-2xx error mapping
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use hateoas_client::{BaseUrl, HateoasConfig};
/// use hateoas_client::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = HateoasConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "products").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &HateoasConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}HATEOAS Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), ACCEPT_HAL_JSON.to_string());
        for (name, value) in config.default_headers() {
            default_headers.insert(name.clone(), value.clone());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a URI reference against the base URL.
    ///
    /// Absolute URLs pass through, host-relative hrefs (`/api/products/1`)
    /// resolve against the server origin and relative paths (`products/1`)
    /// are joined under the base path.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the reference cannot
    /// be resolved.
    pub fn resolve_url(&self, url: &str) -> Result<String, InvalidHttpRequestError> {
        let invalid = || InvalidHttpRequestError::InvalidUrl {
            url: url.to_string(),
        };
        let base = Url::parse(&format!("{}/", self.base_url)).map_err(|_| invalid())?;
        base.join(url).map(String::from).map_err(|_| invalid())
    }

    /// Sends an HTTP request to the API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request.url)?;

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = request.body_text() {
            req_builder = req_builder.body(body);
        }

        tracing::debug!(method = %request.http_method, %url, "Sending request");
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let body = Self::parse_body(&body_text);

        let response = HttpResponse::new(code, res_headers, body);
        tracing::debug!(method = %request.http_method, %url, code, "Received response");

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            method: request.http_method.to_string(),
            url,
            message: response.body.to_string(),
        }))
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a body as JSON; non-JSON text is kept under `raw_body`.
    fn parse_body(body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> HateoasConfig {
        HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_config() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_url().as_ref(), "http://localhost:8080/api");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("HATEOAS Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_accept_header_prefers_hal_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&ACCEPT_HAL_JSON.to_string())
        );
    }

    #[test]
    fn test_configured_default_headers_are_sent() {
        let config = HateoasConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8080/api").unwrap())
            .default_header("Authorization", "Bearer abc")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
    }

    #[test]
    fn test_resolve_url() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.resolve_url("products?page=1").unwrap(),
            "http://localhost:8080/api/products?page=1"
        );
        assert_eq!(
            client.resolve_url("http://other:9000/api/products/1").unwrap(),
            "http://other:9000/api/products/1"
        );
    }

    #[test]
    fn test_resolve_url_host_relative_href_uses_origin() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.resolve_url("/api/products/1/category").unwrap(),
            "http://localhost:8080/api/products/1/category"
        );
        assert!(matches!(
            client.resolve_url("http://[bad"),
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(HttpClient::parse_body(""), serde_json::json!({}));
        assert_eq!(
            HttpClient::parse_body(r#"{"name":"Chair"}"#),
            serde_json::json!({"name": "Chair"})
        );
        assert_eq!(
            HttpClient::parse_body("Internal error"),
            serde_json::json!({"raw_body": "Internal error"})
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
