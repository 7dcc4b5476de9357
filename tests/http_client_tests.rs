//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! response parsing, and error handling behavior.

use hateoas_client::clients::{DataType, HttpClient, HttpMethod, HttpRequest, ACCEPT_HAL_JSON};
use hateoas_client::{BaseUrl, HateoasConfig, HttpError, InvalidHttpRequestError};
use wiremock::matchers::{body_string, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(base_url: &str) -> HateoasConfig {
    HateoasConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .user_agent_prefix("Inventory")
        .default_header("X-Tenant", "acme")
        .build()
        .unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_full_workflow_config_to_client_to_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "0"))
        .and(header("accept", ACCEPT_HAL_JSON))
        .and(header("x-tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&format!("{}/api/", server.uri()))).unwrap();
    assert_eq!(client.base_url().as_ref(), format!("{}/api", server.uri()));

    let request = HttpRequest::builder(HttpMethod::Get, "products")
        .query_param("page", "0")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn test_user_agent_carries_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_regex("user-agent", r"^Inventory \| HATEOAS Client v"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let response = client
        .request(HttpRequest::builder(HttpMethod::Get, "products").build().unwrap())
        .await
        .unwrap();

    assert!(response.is_ok());
}

#[tokio::test]
async fn test_host_relative_url_resolves_against_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1/category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Seating"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&format!("{}/api", server.uri()))).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/api/products/1/category")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.body["name"], "Seating");
}

#[tokio::test]
async fn test_invalid_request_produces_correct_error() {
    // POST without body should fail
    let result = HttpRequest::builder(HttpMethod::Post, "products").build();
    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));

    // Body without body_type should fail when we manually construct
    let request = HttpRequest {
        http_method: HttpMethod::Get,
        url: "products".to_string(),
        body: Some(serde_json::json!({"key": "value"})),
        body_type: None,
        query: Vec::new(),
        extra_headers: None,
    };
    assert!(matches!(
        request.verify(),
        Err(InvalidHttpRequestError::MissingBodyType)
    ));
}

#[tokio::test]
async fn test_non_2xx_response_maps_to_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(serde_json::json!({"message": "in use"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Delete, "products/1")
        .build()
        .unwrap();
    let error = client.request(request).await.unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 409);
            assert_eq!(e.method, "delete");
            assert!(e.message.contains("in use"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_uri_list_body_is_sent_raw() {
    let server = MockServer::start().await;
    let list = format!("{0}/categories/1\n{0}/categories/2", server.uri());
    Mock::given(method("PUT"))
        .and(path("/products/1/categories"))
        .and(header("content-type", "text/uri-list"))
        .and(body_string(list.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Put, "products/1/categories")
        .body(list)
        .body_type(DataType::UriList)
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 204);
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_kept_as_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let response = client
        .request(HttpRequest::builder(HttpMethod::Get, "health").build().unwrap())
        .await
        .unwrap();

    assert_eq!(response.body["raw_body"], "plain text");
}
