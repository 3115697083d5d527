use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use stockpile_api::app::{self, services::AppServices};
use stockpile_infra::InMemoryInventoryRepository;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, wired over the in-memory repository and
        // bound to an ephemeral port.
        let services = Arc::new(AppServices::new(Arc::new(
            InMemoryInventoryRepository::new(),
        )));
        let app = app::build_app_with(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn check_stock_for_unknown_sku_is_false() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/inventory/check-stock?skuCode=OUT-OF-STOCK-ITEM&quantity=5",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<bool>().await.unwrap(), false);
}

#[tokio::test]
async fn check_stock_requires_both_parameters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/inventory/check-stock?skuCode=ONLY-SKU",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adding_new_sku_creates_record_and_answers_stock_checks() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "NEW-SKU-001", "quantity": 10}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"].as_i64(), Some(1));
    assert_eq!(body["skuCode"], "NEW-SKU-001");
    assert_eq!(body["quantity"].as_i64(), Some(10));
    assert!(body["createdAt"].is_string());

    let in_stock: bool = client
        .get(format!(
            "{}/api/inventory/check-stock?skuCode=NEW-SKU-001&quantity=5",
            srv.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(in_stock);

    let in_stock: bool = client
        .get(format!(
            "{}/api/inventory/check-stock?skuCode=NEW-SKU-001&quantity=11",
            srv.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!in_stock);
}

#[tokio::test]
async fn adding_existing_sku_accumulates_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first: serde_json::Value = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "EXISTING-SKU", "quantity": 15}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let second: serde_json::Value = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "EXISTING-SKU", "quantity": 5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["skuCode"], "EXISTING-SKU");
    assert_eq!(second["quantity"].as_i64(), Some(20));
}

#[tokio::test]
async fn adding_zero_quantity_is_accepted_and_changes_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "STEADY-SKU", "quantity": 7}))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "STEADY-SKU", "quantity": 0}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["quantity"].as_i64(), Some(7));
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "NEGATIVE-SKU", "quantity": -3}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn bulk_add_creates_and_merges_in_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/inventory/bulk", srv.base_url))
        .json(&json!([
            {"skuCode": "BULK-A", "quantity": 1},
            {"skuCode": "BULK-B", "quantity": 2},
            {"skuCode": "BULK-A", "quantity": 4},
        ]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[2]["skuCode"], "BULK-A");
    assert_eq!(results[2]["quantity"].as_i64(), Some(5));
    assert_eq!(results[2]["id"], results[0]["id"]);
}

#[tokio::test]
async fn zero_quantity_check_is_true_only_once_sku_was_stocked() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let url = format!(
        "{}/api/inventory/check-stock?skuCode=ZERO-QTY-SKU&quantity=0",
        srv.base_url
    );

    let before: bool = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(!before);

    client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "ZERO-QTY-SKU", "quantity": 0}))
        .send()
        .await
        .unwrap();

    let after: bool = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(after);
}

#[tokio::test]
async fn record_lifecycle_list_get_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/api/inventory/add", srv.base_url))
        .json(&json!({"skuCode": "LIFECYCLE-SKU", "quantity": 12}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let all: serde_json::Value = client
        .get(format!("{}/api/inventory", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);

    let fetched: serde_json::Value = client
        .get(format!("{}/api/inventory/{id}", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["quantity"].as_i64(), Some(12));

    let res = client
        .put(format!("{}/api/inventory/{id}", srv.base_url))
        .json(&json!({"skuCode": "LIFECYCLE-SKU", "quantity": 3}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"].as_i64(), Some(id));
    assert_eq!(updated["quantity"].as_i64(), Some(3));

    let res = client
        .delete(format!("{}/api/inventory/{id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/inventory/{id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/inventory/404", srv.base_url))
        .json(&json!({"skuCode": "ANY-SKU", "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/inventory/404", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
