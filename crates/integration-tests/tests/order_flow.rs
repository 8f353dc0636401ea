//! End-to-end order lifecycle flows against a scripted backend.

use rust_decimal::Decimal;
use stockpilot_console::api::orders::{OrderCreate, OrderItemCreate};
use stockpilot_core::{Order, OrderStatus, ProductId, WarehouseId};
use stockpilot_integration_tests::{order_json, stock_json, TestBackend};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// Create an order with two items, trust the server's total, then
/// cancel it with a reason and observe the server-set fields.
#[tokio::test]
async fn test_create_then_cancel_order() {
    let backend = TestBackend::start().await;

    let created = order_json(
        1,
        "new",
        1,
        None,
        &[(100, "Product A", 2, "100"), (200, "Product B", 1, "50")],
        "250",
    );
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(serde_json::json!({
            "warehouse_id": 1,
            "client_name": "Acme",
            "destination_address": "1 Main St",
            "items": [
                {"product_id": 100, "quantity": 2},
                {"product_id": 200, "quantity": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1)
        .mount(&backend.server)
        .await;

    let cancelled = order_json(1, "cancelled", 1, None, &[], "250");
    Mock::given(method("PATCH"))
        .and(path("/orders/1/cancel"))
        .and(body_json(serde_json::json!({
            "status": "cancelled",
            "reason": "duplicate"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cancelled.clone()))
        .expect(1)
        .mount(&backend.server)
        .await;
    let mut refetched = cancelled;
    refetched["cancellation_reason"] = serde_json::json!("duplicate");
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refetched))
        .expect(1)
        .mount(&backend.server)
        .await;

    let order = backend
        .client
        .create_order(&OrderCreate {
            warehouse_id: WarehouseId::new(1),
            client_name: "Acme".to_string(),
            destination_address: "1 Main St".to_string(),
            comment: None,
            items: vec![
                OrderItemCreate {
                    product_id: ProductId::new(100),
                    quantity: 2,
                },
                OrderItemCreate {
                    product_id: ProductId::new(200),
                    quantity: 1,
                },
            ],
        })
        .await
        .expect("order should be created");

    assert_eq!(order.total_price, Decimal::from(250));
    assert_eq!(
        order.items.iter().map(|i| i.line_total()).sum::<Decimal>(),
        order.total_price
    );

    let cancelled = backend
        .lifecycle()
        .cancel(&order, "duplicate")
        .await
        .expect("cancel should succeed");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("duplicate"));
}

/// Completing a transfer-generated order books the received stock at
/// the order's warehouse, visible on the next stock query.
#[tokio::test]
async fn test_completing_transfer_order_books_received_stock() {
    let backend = TestBackend::start().await;
    let comment = format!("{} from warehouse 1", Order::TRANSFER_MARKER);

    Mock::given(method("PATCH"))
        .and(path("/orders/42/status"))
        .and(body_json(serde_json::json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(
            42,
            "completed",
            2,
            Some(&comment),
            &[(10, "Widget", 5, "100")],
            "500",
        )))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products/stock/add"))
        .and(body_json(serde_json::json!({
            "product_id": 10,
            "warehouse_id": 2,
            "quantity": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "stock_quantity": 10
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/stock"))
        .and(query_param("product_id", "10"))
        .and(query_param("warehouse_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_json(10)))
        .mount(&backend.server)
        .await;

    let shipped: Order = serde_json::from_value(order_json(
        42,
        "shipped",
        2,
        Some(&comment),
        &[(10, "Widget", 5, "100")],
        "500",
    ))
    .expect("backend-shaped order should deserialize");

    let change = backend
        .lifecycle()
        .advance(&shipped, OrderStatus::Completed)
        .await
        .expect("completion should succeed");

    assert_eq!(change.order.status, OrderStatus::Completed);
    let report = change.completion.expect("side-effect should have run");
    assert!(report.is_clean());

    let stock = backend
        .client
        .stock_at(ProductId::new(10), WarehouseId::new(2))
        .await
        .expect("stock refresh");
    assert_eq!(stock.quantity, 10);
}
