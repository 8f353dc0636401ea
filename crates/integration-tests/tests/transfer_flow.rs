//! End-to-end stock transfer flows against a scripted backend.

use stockpilot_core::{Order, ProductId, WarehouseId};
use stockpilot_console::transfer::{FollowUpOrder, TransferPlan};
use stockpilot_integration_tests::{order_json, stock_json, TestBackend};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plan(quantity: u32, available: i64, follow_up: bool) -> TransferPlan {
    TransferPlan {
        product_id: ProductId::new(10),
        source: WarehouseId::new(1),
        destination: Some(WarehouseId::new(2)),
        quantity,
        available,
        create_follow_up_order: follow_up,
    }
}

async fn mount_transfer_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/products/stock/transfer"))
        .and(body_json(serde_json::json!({
            "product_id": 10,
            "from_warehouse_id": 1,
            "to_warehouse_id": 2,
            "quantity": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "message": "Transferred",
            "from_warehouse_stock": 5,
            "to_warehouse_stock": 5
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Moving 5 of 10 units with a follow-up order: both warehouses end at
/// 5 after the confirming refresh, and exactly one receiving order
/// exists at the destination.
#[tokio::test]
async fn test_transfer_with_follow_up_order() {
    let backend = TestBackend::start().await;

    // Source stock: 10 before the transfer, 5 afterwards.
    Mock::given(method("GET"))
        .and(path("/products/stock"))
        .and(query_param("product_id", "10"))
        .and(query_param("warehouse_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_json(10)))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/stock"))
        .and(query_param("product_id", "10"))
        .and(query_param("warehouse_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_json(5)))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/stock"))
        .and(query_param("product_id", "10"))
        .and(query_param("warehouse_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_json(5)))
        .mount(&backend.server)
        .await;

    mount_transfer_success(&backend.server).await;

    let created = order_json(
        42,
        "new",
        2,
        Some(&format!("{} from warehouse 1", Order::TRANSFER_MARKER)),
        &[(10, "Widget", 5, "100")],
        "500",
    );
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(serde_json::json!({
            "warehouse_id": 2,
            "client_name": "Internal transfer",
            "destination_address": "Warehouse 2",
            "comment": format!("{} from warehouse 1", Order::TRANSFER_MARKER),
            "items": [{"product_id": 10, "quantity": 5}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([created])))
        .mount(&backend.server)
        .await;

    let product = ProductId::new(10);
    let source = WarehouseId::new(1);
    let destination = WarehouseId::new(2);

    let available = backend
        .client
        .stock_at(product, source)
        .await
        .expect("initial stock query")
        .quantity;
    assert_eq!(available, 10);

    let report = backend
        .orchestrator()
        .execute(&plan(5, available, true))
        .await
        .expect("transfer should succeed");

    assert!(report.is_fully_successful());
    assert_eq!(report.outcome.from_warehouse_stock, 5);
    assert_eq!(report.outcome.to_warehouse_stock, 5);
    match &report.follow_up {
        Some(FollowUpOrder::Created(order)) => {
            assert_eq!(order.warehouse, destination);
            assert!(order.is_transfer_generated());
        }
        other => panic!("expected created follow-up order, got {other:?}"),
    }

    // The confirming refresh, not the transfer response, is what the
    // view trusts.
    let source_stock = backend
        .client
        .stock_at(product, source)
        .await
        .expect("source refresh");
    let destination_stock = backend
        .client
        .stock_at(product, destination)
        .await
        .expect("destination refresh");
    assert_eq!(source_stock.quantity, 5);
    assert_eq!(destination_stock.quantity, 5);

    let orders = backend.client.list_orders().await.expect("order list");
    let at_destination: Vec<_> = orders.iter().filter(|o| o.warehouse == destination).collect();
    assert_eq!(at_destination.len(), 1);
    let order = at_destination[0];
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, product);
    assert_eq!(order.items[0].quantity, 5);
}

/// A failed follow-up order never masks the successful transfer.
#[tokio::test]
async fn test_follow_up_failure_reports_both_outcomes() {
    let backend = TestBackend::start().await;

    mount_transfer_success(&backend.server).await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"detail": "Order service unavailable"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let report = backend
        .orchestrator()
        .execute(&plan(5, 10, true))
        .await
        .expect("the transfer itself succeeded");

    assert!(report.outcome.is_success());
    assert!(!report.is_fully_successful());
    match &report.follow_up {
        Some(FollowUpOrder::Failed(message)) => {
            assert_eq!(message, "Order service unavailable");
        }
        other => panic!("expected failed follow-up, got {other:?}"),
    }
}
