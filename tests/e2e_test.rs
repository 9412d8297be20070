//! End-to-end test: member → item → order → cancel over HTTP.
//!
//! The server runs on a local port backed by the in-memory store, so no
//! external infrastructure is needed.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use shop_service::{build_server, InMemoryStore};
use std::time::Duration;
use uuid::Uuid;

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port()
}

/// Wait until `url` answers at all, retrying every `interval` for up to
/// `timeout` total. Panics if the service never comes up.
async fn wait_for_http(url: &str, timeout: Duration, interval: Duration) {
    let client = Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if tokio::time::Instant::now() > deadline {
            panic!("server did not become ready within {:?}", timeout);
        }
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
}

async fn start_server() -> String {
    let port = free_port();
    let server = build_server(InMemoryStore::new(), "127.0.0.1", port)
        .expect("Failed to bind the shop service");
    tokio::spawn(server);

    let app_url = format!("http://127.0.0.1:{}", port);
    wait_for_http(
        &format!("{}/items", app_url),
        Duration::from_secs(10),
        Duration::from_millis(100),
    )
    .await;
    app_url
}

async fn post_created(http: &Client, url: String, body: Value) -> String {
    let resp = http.post(url).json(&body).send().await.expect("POST failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid JSON body");
    body["id"].as_str().expect("missing id").to_string()
}

async fn get_json(http: &Client, url: String) -> Value {
    let resp = http.get(url).send().await.expect("GET failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("invalid JSON body")
}

#[tokio::test]
async fn order_then_cancel_restores_stock() {
    let app_url = start_server().await;
    let http = Client::new();

    let member_id = post_created(
        &http,
        format!("{}/members", app_url),
        json!({ "name": "kim", "city": "Seoul", "street": "Teheran-ro 1", "zipcode": "06000" }),
    )
    .await;
    let item_id = post_created(
        &http,
        format!("{}/items", app_url),
        json!({
            "type": "book",
            "name": "JPA",
            "price": "100",
            "stock_quantity": 10,
            "author": "kim",
            "isbn": "123"
        }),
    )
    .await;

    // ── Place the order ──────────────────────────────────────────────────────
    let order_id = post_created(
        &http,
        format!("{}/orders", app_url),
        json!({ "member_id": member_id, "item_id": item_id, "count": 3 }),
    )
    .await;

    let item = get_json(&http, format!("{}/items/{}", app_url, item_id)).await;
    assert_eq!(item["stock_quantity"].as_i64(), Some(7));
    assert_eq!(item["type"].as_str(), Some("book"));

    let order = get_json(&http, format!("{}/orders/{}", app_url, order_id)).await;
    assert_eq!(order["status"].as_str(), Some("ORDER"));
    assert_eq!(order["total_price"].as_str(), Some("300"));
    assert_eq!(order["delivery"]["status"].as_str(), Some("READY"));
    assert_eq!(order["delivery"]["address"]["city"].as_str(), Some("Seoul"));
    assert_eq!(order["order_items"].as_array().map(Vec::len), Some(1));

    // ── Cancel it ────────────────────────────────────────────────────────────
    let resp = http
        .post(format!("{}/orders/{}/cancel", app_url, order_id))
        .send()
        .await
        .expect("cancel failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let item = get_json(&http, format!("{}/items/{}", app_url, item_id)).await;
    assert_eq!(item["stock_quantity"].as_i64(), Some(10));

    let order = get_json(&http, format!("{}/orders/{}", app_url, order_id)).await;
    assert_eq!(order["status"].as_str(), Some("CANCEL"));

    let resp = http
        .post(format!("{}/orders/{}/cancel", app_url, order_id))
        .send()
        .await
        .expect("second cancel failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let cancelled = get_json(&http, format!("{}/orders?status=CANCEL", app_url)).await;
    assert_eq!(cancelled.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn rejected_requests_map_to_http_errors() {
    let app_url = start_server().await;
    let http = Client::new();

    let member_id = post_created(
        &http,
        format!("{}/members", app_url),
        json!({ "name": "lee", "city": "Busan", "street": "Haeundae 1", "zipcode": "48000" }),
    )
    .await;
    let item_id = post_created(
        &http,
        format!("{}/items", app_url),
        json!({
            "type": "movie",
            "name": "Parasite",
            "price": "15",
            "stock_quantity": 2,
            "director": "Bong",
            "actor": "Song"
        }),
    )
    .await;

    // Not enough stock: nothing is created and stock stays put.
    let resp = http
        .post(format!("{}/orders", app_url))
        .json(&json!({ "member_id": member_id, "item_id": item_id, "count": 5 }))
        .send()
        .await
        .expect("POST /orders failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let item = get_json(&http, format!("{}/items/{}", app_url, item_id)).await;
    assert_eq!(item["stock_quantity"].as_i64(), Some(2));
    let orders = get_json(&http, format!("{}/orders", app_url)).await;
    assert_eq!(orders.as_array().map(Vec::len), Some(0));

    // Unknown order.
    let resp = http
        .post(format!("{}/orders/{}/cancel", app_url, Uuid::new_v4()))
        .send()
        .await
        .expect("cancel failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Duplicate member name.
    let resp = http
        .post(format!("{}/members", app_url))
        .json(&json!({ "name": "lee", "city": "Seoul", "street": "x", "zipcode": "1" }))
        .send()
        .await
        .expect("POST /members failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Shipped orders cannot be cancelled.
    let order_id = post_created(
        &http,
        format!("{}/orders", app_url),
        json!({ "member_id": member_id, "item_id": item_id, "count": 1 }),
    )
    .await;
    let resp = http
        .post(format!("{}/orders/{}/delivery/complete", app_url, order_id))
        .send()
        .await
        .expect("complete failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = http
        .post(format!("{}/orders/{}/cancel", app_url, order_id))
        .send()
        .await
        .expect("cancel failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Bad price.
    let resp = http
        .post(format!("{}/items", app_url))
        .json(&json!({
            "type": "album",
            "name": "Kind of Blue",
            "price": "cheap",
            "stock_quantity": 1,
            "artist": "Miles Davis"
        }))
        .send()
        .await
        .expect("POST /items failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app_url = start_server().await;
    let doc = get_json(&Client::new(), format!("{}/api-docs/openapi.json", app_url)).await;
    assert!(doc["paths"]["/orders/{id}/cancel"].is_object());
}
