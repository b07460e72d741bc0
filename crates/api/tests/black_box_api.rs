use reqwest::StatusCode;
use serde_json::json;

use vendora_core::UserId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the same router as prod, but bind to an ephemeral port.
        let app = vendora_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn get(&self, client: &reqwest::Client, path: &str, user: &TestUser) -> reqwest::RequestBuilder {
        client
            .get(format!("{}{}", self.base_url, path))
            .header("x-user-id", &user.id)
            .header("x-user-role", user.role)
    }

    fn post(&self, client: &reqwest::Client, path: &str, user: &TestUser) -> reqwest::RequestBuilder {
        client
            .post(format!("{}{}", self.base_url, path))
            .header("x-user-id", &user.id)
            .header("x-user-role", user.role)
    }

    fn put(&self, client: &reqwest::Client, path: &str, user: &TestUser) -> reqwest::RequestBuilder {
        client
            .put(format!("{}{}", self.base_url, path))
            .header("x-user-id", &user.id)
            .header("x-user-role", user.role)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct TestUser {
    id: String,
    role: &'static str,
}

fn user(role: &'static str) -> TestUser {
    TestUser {
        id: UserId::new().to_string(),
        role,
    }
}

fn place_order_body(product_id: &str, quantity: u32, total_cents: u64) -> serde_json::Value {
    json!({
        "lines": [{"product_id": product_id, "quantity": quantity}],
        "shipping_address": {
            "full_name": "Jamie Doe",
            "address": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "phone_number": "555-0100",
        },
        "payment_method": "credit_card",
        "totals": {
            "subtotal": total_cents,
            "shipping_cost": 0,
            "tax": 0,
            "discount": 0,
            "total": total_cents,
        },
    })
}

async fn create_product(
    server: &TestServer,
    client: &reqwest::Client,
    vendor: &TestUser,
    price_cents: u64,
    stock: u32,
) -> String {
    let res = server
        .post(client, "/api/products", vendor)
        .json(&json!({"name": "Linen Shirt", "price": price_cents, "stock": stock}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_identity_headers_are_unauthorized() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/cart", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/cart", server.base_url))
        .header("x-user-id", "not-a-uuid")
        .header("x-user-role", "customer")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn place_then_cancel_full_flow() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let vendor = user("vendor");
    let customer = user("customer");

    let product_id = create_product(&server, &client, &vendor, 2000, 5).await;

    // Fill the cart.
    let res = server
        .post(&client, "/api/cart/items", &customer)
        .json(&json!({"product_id": product_id, "quantity": 2}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Place the order.
    let res = server
        .post(&client, "/api/orders", &customer)
        .json(&place_order_body(&product_id, 2, 4000))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totals"]["total"], 4000);
    let order_id = order["id"].as_str().unwrap().to_string();

    // Stock dropped, cart emptied.
    let res = server
        .get(&client, &format!("/api/products/{product_id}"), &customer)
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 3);

    let res = server.get(&client, "/api/cart", &customer).send().await.unwrap();
    let cart: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 0);

    // Cancel restores stock.
    let res = server
        .put(&client, &format!("/api/orders/{order_id}/cancel"), &customer)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cancelled: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancellation_reason"], "cancelled by customer");

    let res = server
        .get(&client, &format!("/api/products/{product_id}"), &customer)
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 5);

    // A second cancel is a conflict, not a second stock release.
    let res = server
        .put(&client, &format!("/api/orders/{order_id}/cancel"), &customer)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn oversized_order_conflicts_and_reserves_nothing() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let vendor = user("vendor");
    let customer = user("customer");

    let product_id = create_product(&server, &client, &vendor, 1000, 1).await;

    let res = server
        .post(&client, "/api/orders", &customer)
        .json(&place_order_body(&product_id, 5, 5000))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    let res = server
        .get(&client, &format!("/api/products/{product_id}"), &customer)
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 1);
}

#[tokio::test]
async fn customers_cannot_see_or_update_foreign_orders() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let vendor = user("vendor");
    let customer = user("customer");
    let stranger = user("customer");

    let product_id = create_product(&server, &client, &vendor, 1000, 5).await;

    let res = server
        .post(&client, "/api/orders", &customer)
        .json(&place_order_body(&product_id, 1, 1000))
        .send()
        .await
        .unwrap();
    let order: serde_json::Value = res.json().await.unwrap();
    let order_id = order["id"].as_str().unwrap().to_string();

    let res = server
        .get(&client, &format!("/api/orders/{order_id}"), &stranger)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Customers never drive the fulfillment state machine.
    let res = server
        .put(&client, &format!("/api/orders/{order_id}/status"), &customer)
        .json(&json!({"status": "processing"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn vendor_sales_are_scoped_to_their_lines() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let v1 = user("vendor");
    let v2 = user("vendor");
    let customer = user("customer");

    let p1 = create_product(&server, &client, &v1, 2000, 10).await;
    let p2 = create_product(&server, &client, &v2, 5000, 10).await;

    let res = server
        .post(&client, "/api/orders", &customer)
        .json(&json!({
            "lines": [
                {"product_id": p1, "quantity": 2},
                {"product_id": p2, "quantity": 1},
            ],
            "shipping_address": {
                "full_name": "Jamie Doe",
                "address": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "zip_code": "62701",
                "phone_number": "555-0100",
            },
            "payment_method": "paypal",
            "totals": {"subtotal": 9000, "shipping_cost": 0, "tax": 0, "discount": 0, "total": 9000},
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server
        .get(&client, "/api/orders/vendor/sales", &v1)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let views: serde_json::Value = res.json().await.unwrap();
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["lines"].as_array().unwrap().len(), 1);
    assert_eq!(views[0]["vendor_subtotal"], 4000);
}

#[tokio::test]
async fn admin_report_is_admin_only() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let vendor = user("vendor");
    let customer = user("customer");
    let admin = user("admin");

    let product_id = create_product(&server, &client, &vendor, 1000, 5).await;
    let res = server
        .post(&client, "/api/orders", &customer)
        .json(&place_order_body(&product_id, 1, 1000))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server
        .get(&client, "/api/orders/admin/all", &customer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .get(&client, "/api/orders/admin/all", &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value = res.json().await.unwrap();
    assert_eq!(report["stats"]["total_orders"], 1);
    assert_eq!(report["stats"]["total_revenue"], 1000);
    assert_eq!(report["stats"]["pending_orders"], 1);
}
