//! End-to-end dispatch against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives a real `ApiClient`
//! (reqwest transport) through the catalog, checking what the session keeps
//! and what the user is told after each call.

use std::net::SocketAddr;
use std::sync::Arc;

use crypto_client_core::{
    catalog, ApiClient, ApiError, HttpMethod, MemorySink, NoticeLevel, ReqwestTransport,
    ResponseBody,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

/// An address nothing listens on: bind, read the port, close.
fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Serve one raw HTTP/1.1 response to the first connection.
async fn start_raw_server(response: &'static str) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    addr
}

fn client() -> (ApiClient<ReqwestTransport, Arc<MemorySink>>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (ApiClient::new(ReqwestTransport::new(), sink.clone()), sink)
}

#[tokio::test]
async fn catalog_walkthrough() {
    let addr = start_server().await;
    let (client, sink) = client();

    // Step 1: nothing configured, so no call is made.
    let err = client.dispatch(HttpMethod::Get, "/prices", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Configuration));

    // Step 2: configure with a trailing slash.
    let base = client.configure_base_url(&format!("http://{addr}/")).await.unwrap();
    assert_eq!(base.as_str(), format!("http://{addr}"));

    // Step 3: root and prices are JSON.
    let root = client.call_endpoint(catalog::find("API Info").unwrap()).await.unwrap();
    assert_eq!(root.status, 200);
    assert_eq!(root.status_text, "OK");
    assert_eq!(root.data.as_json().unwrap()["name"], "crypto-api");
    assert_eq!(root.headers["content-type"], "application/json");

    let prices = client.call_endpoint(catalog::find("/prices").unwrap()).await.unwrap();
    assert!(prices.is_success());
    assert!(prices.data.as_json().unwrap().as_array().is_some());
    assert_eq!(sink.last().unwrap().message, "GET /prices - Success (200)");

    // Step 4: config round trip.
    let updated = client.update_config("sensitivity", "3").await.unwrap();
    assert_eq!(updated.data, ResponseBody::Json(json!({"key": "sensitivity", "value": "3"})));
    let fetched = client.fetch_config("sensitivity").await.unwrap();
    assert_eq!(fetched.data.as_json().unwrap()["value"], "3");

    // Step 5: unknown key. The 404 comes back as text data.
    let missing = client.fetch_config("does_not_exist").await.unwrap();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.data, ResponseBody::Text("unknown config key: does_not_exist".to_string()));
    let notice = sink.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "GET /config/does_not_exist - Error (404)");

    // Step 6: the session keeps only the latest response.
    assert_eq!(client.last_response().await, Some(missing));
    assert!(!client.is_loading());
}

#[tokio::test]
async fn malformed_post_body_is_reported_as_http_error() {
    let addr = start_server().await;
    let (client, _) = client();
    client.configure_base_url(&format!("http://{addr}")).await.unwrap();

    let response = client
        .dispatch(HttpMethod::Post, "/config/sensitivity", Some(&json!({"value": 3})))
        .await
        .unwrap();
    assert_eq!(response.status, 422);
    assert!(!response.is_success());
}

#[tokio::test]
async fn unreachable_host_yields_network_error_sentinel() {
    let addr = unreachable_addr();
    let (client, sink) = client();
    client.configure_base_url(&format!("http://{addr}")).await.unwrap();

    let response = client.dispatch(HttpMethod::Get, "/stats", None).await.unwrap();
    assert_eq!(response.status, 0);
    assert_eq!(response.status_text, "Network Error");
    assert!(response.headers.is_empty());
    let message = response.data.as_json().unwrap()["error"].as_str().unwrap();
    assert!(!message.is_empty());

    let notice = sink.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with(&format!("Failed to reach http://{addr}/stats: ")));
    assert_eq!(client.last_response().await, Some(response));
}

#[tokio::test]
async fn overlapping_calls_all_complete() {
    let addr = start_server().await;
    let client = ApiClient::over_http();
    client.configure_base_url(&format!("http://{addr}")).await.unwrap();

    let (a, b, c) = tokio::join!(
        client.dispatch(HttpMethod::Get, "/prices", None),
        client.dispatch(HttpMethod::Get, "/orders", None),
        client.dispatch(HttpMethod::Get, "/stats", None),
    );
    assert!(a.unwrap().is_success());
    assert!(b.unwrap().is_success());
    assert!(c.unwrap().is_success());
    assert!(!client.is_loading());
    assert!(client.last_response().await.is_some());
}

#[tokio::test]
async fn server_reason_phrase_is_kept() {
    let addr = start_raw_server(
        "HTTP/1.1 599 Custom Thing\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;
    let (client, sink) = client();
    client.configure_base_url(&format!("http://{addr}")).await.unwrap();

    let response = client.dispatch(HttpMethod::Get, "/odd", None).await.unwrap();
    assert_eq!(response.status, 599);
    assert_eq!(response.status_text, "Custom Thing");
    assert_eq!(response.data, ResponseBody::Text(String::new()));
    assert_eq!(sink.last().unwrap().message, "GET /odd - Error (599)");
}

#[tokio::test]
async fn malformed_concatenation_yields_network_error_sentinel() {
    let (client, sink) = client();
    client.configure_base_url("http://127.0.0.1:1").await.unwrap();

    // No leading slash: the path runs into the port.
    let response = client.dispatch(HttpMethod::Get, "abc", None).await.unwrap();
    assert_eq!(response.status, 0);
    assert_eq!(response.status_text, "Network Error");
    assert!(response.headers.is_empty());
    assert!(response.data.as_json().unwrap()["error"].is_string());

    let notice = sink.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Failed to reach http://127.0.0.1:1abc: "));
    assert!(!client.is_loading());
    assert_eq!(client.last_response().await, Some(response));
}
