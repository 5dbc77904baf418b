use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ApiInfo, ConfigEntry, Order, Price, Stats};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- read-only endpoints ---

#[tokio::test]
async fn root_describes_api() {
    let resp = app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/json");
    let info: ApiInfo = body_json(resp).await;
    assert_eq!(info.name, "crypto-api");
    assert!(info.endpoints.contains(&"/prices".to_string()));
}

#[tokio::test]
async fn prices_lists_symbols() {
    let resp = app().oneshot(get("/prices")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let prices: Vec<Price> = body_json(resp).await;
    assert!(prices.iter().any(|p| p.symbol == "BTCUSDT"));
}

#[tokio::test]
async fn orders_start_empty() {
    let resp = app().oneshot(get("/orders")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let orders: Vec<Order> = body_json(resp).await;
    assert!(orders.is_empty());
}

// --- config ---

#[tokio::test]
async fn seeded_config_is_readable() {
    let resp = app().oneshot(get("/config/sensitivity")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: ConfigEntry = body_json(resp).await;
    assert_eq!(entry.key, "sensitivity");
    assert_eq!(entry.value, "1");
}

#[tokio::test]
async fn unknown_config_key_is_plain_text_404() {
    let resp = app().oneshot(get("/config/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_bytes(resp).await, "unknown config key: nope");
}

#[tokio::test]
async fn config_post_rejects_non_string_value() {
    let resp = app()
        .oneshot(json_request("POST", "/config/sensitivity", r#"{"value":3}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- stateful flow ---

#[tokio::test]
async fn config_and_order_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // set a value
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/config/sensitivity", r#"{"value":"3"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entry: ConfigEntry = body_json(resp).await;
    assert_eq!(entry.value, "3");

    // read it back
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/config/sensitivity"))
        .await
        .unwrap();
    let entry: ConfigEntry = body_json(resp).await;
    assert_eq!(entry.value, "3");

    // prepare and execute an order
    let steps = [
        ("action_position", "sell"),
        ("order_total", "2"),
        ("order_execute_now", "true"),
    ];
    for (key, value) in steps {
        let body = format!(r#"{{"value":"{value}"}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", &format!("/config/{key}"), &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{key}");
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/orders"))
        .await
        .unwrap();
    let orders: Vec<Order> = body_json(resp).await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].side, "sell");
    assert_eq!(orders[0].quantity, "2");
    assert_eq!(orders[0].status, "executed");

    // stats reflect everything above, including this request
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/stats"))
        .await
        .unwrap();
    let stats: Stats = body_json(resp).await;
    assert_eq!(stats.requests_served, 7);
    assert_eq!(stats.orders, 1);
}
