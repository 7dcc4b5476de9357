//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used against a HAL API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that change server state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// URI list content type (`text/uri-list`), used to bind relations.
    UriList,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::UriList => "text/uri-list",
        }
    }
}

/// An HTTP request to be sent to the API.
///
/// `url` is either absolute (a link href returned by the server) or relative
/// to the configured base URL.
///
/// # Example
///
/// ```rust
/// use hateoas_client::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "products")
///     .query_param("page", "0")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "products")
///     .body(json!({"name": "Chair"}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// Absolute URL, or path relative to the base URL.
    pub url: String,
    /// The request body, if any. `text/uri-list` bodies are JSON strings.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Query parameters in order; keys may repeat (e.g., `sort`).
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is empty
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post`, `Put` or `Patch` but `body` is `None`
    /// - a `text/uri-list` body is not a string
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.url.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyUrl);
        }

        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if matches!(
            self.http_method,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
        ) && self.body.is_none()
        {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.body_type == Some(DataType::UriList)
            && !matches!(self.body, Some(serde_json::Value::String(_)))
        {
            return Err(InvalidHttpRequestError::InvalidUriListBody);
        }

        Ok(())
    }

    /// Returns the body as it goes on the wire.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        match (&self.body, self.body_type) {
            (Some(serde_json::Value::String(text)), Some(DataType::UriList)) => Some(text.clone()),
            (Some(body), _) => Some(body.to_string()),
            (None, _) => None,
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    query: Vec<(String, String)>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            body_type: None,
            query: Vec::new(),
            extra_headers: None,
        }
    }

    /// Sets the request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_only_get_is_not_a_mutation() {
        assert!(!HttpMethod::Get.is_mutation());
        assert!(HttpMethod::Patch.is_mutation());
        assert!(HttpMethod::Delete.is_mutation());
    }

    #[test]
    fn test_data_type_content_type() {
        assert_eq!(DataType::Json.as_content_type(), "application/json");
        assert_eq!(DataType::UriList.as_content_type(), "text/uri-list");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "products");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_verify_requires_body_for_patch() {
        let result = HttpRequest::builder(HttpMethod::Patch, "products/1").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "patch"
        ));
    }

    #[test]
    fn test_verify_rejects_empty_url() {
        let result = HttpRequest::builder(HttpMethod::Get, " ").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyUrl)));
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            url: "test".to_string(),
            body: Some(json!({"key": "value"})),
            body_type: None,
            query: Vec::new(),
            extra_headers: None,
        };

        assert!(matches!(
            request.verify(),
            Err(InvalidHttpRequestError::MissingBodyType)
        ));
    }

    #[test]
    fn test_uri_list_body_is_sent_as_plain_text() {
        let request = HttpRequest::builder(HttpMethod::Put, "cart/products")
            .body("http://localhost/products/1\nhttp://localhost/products/2")
            .body_type(DataType::UriList)
            .build()
            .unwrap();

        assert_eq!(
            request.body_text().as_deref(),
            Some("http://localhost/products/1\nhttp://localhost/products/2")
        );
    }

    #[test]
    fn test_uri_list_body_must_be_string() {
        let result = HttpRequest::builder(HttpMethod::Put, "cart/products")
            .body(json!({"a": 1}))
            .body_type(DataType::UriList)
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidUriListBody)
        ));
    }

    #[test]
    fn test_builder_keeps_repeated_query_params_in_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .query_param("sort", "name,ASC")
            .query_param("sort", "price,DESC")
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("sort".to_string(), "name,ASC".to_string()),
                ("sort".to_string(), "price,DESC".to_string()),
            ]
        );
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .header("X-Custom-Header", "custom-value")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(
            headers.get("X-Custom-Header"),
            Some(&"custom-value".to_string())
        );
    }
}
