//! Order resource methods.

use serde::Serialize;
use stockpilot_core::{Order, OrderId, OrderStatus, ProductId, WarehouseId};
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;

/// One line of an order-creation payload. Prices are snapshotted
/// server-side; the client sends only product and quantity.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemCreate {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub warehouse_id: WarehouseId,
    pub client_name: String,
    pub destination_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub items: Vec<OrderItemCreate>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

#[derive(Serialize)]
struct CancelRequest<'a> {
    status: OrderStatus,
    reason: &'a str,
}

impl ApiClient {
    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders").await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}")).await
    }

    /// Create an order. The response is the server's authoritative copy,
    /// including snapshotted item prices and the computed total.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, input), fields(warehouse_id = %input.warehouse_id, items = input.items.len()))]
    pub async fn create_order(&self, input: &OrderCreate) -> Result<Order, ApiError> {
        self.post("/orders", input).await
    }

    /// Set an order's status. Use [`ApiClient::cancel_order`] for
    /// cancellation; the backend requires a reason there.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.patch(&format!("/orders/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// Cancel an order with a reason.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, reason), fields(order_id = %id))]
    pub async fn cancel_order(&self, id: OrderId, reason: &str) -> Result<Order, ApiError> {
        self.patch(
            &format!("/orders/{id}/cancel"),
            &CancelRequest {
                status: OrderStatus::Cancelled,
                reason,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ConsoleConfig;

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ConsoleConfig::with_api_url(server.uri())).expect("client should build")
    }

    fn order_body(id: i32, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "status": status,
            "created_at": "2025-03-01T10:00:00Z",
            "warehouse": 1,
            "client_name": "Acme",
            "destination_address": "1 Main St",
            "comment": null,
            "cancellation_reason": null,
            "items": [],
            "total_price": "0",
            "qr_code": null
        })
    }

    #[tokio::test]
    async fn test_status_update_body_is_snake_case() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/orders/3/status"))
            .and(body_json(serde_json::json!({"status": "processing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_body(3, "processing")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let order = client
            .update_order_status(OrderId::new(3), OrderStatus::Processing)
            .await
            .expect("update should succeed");
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_cancel_sends_status_and_reason() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/orders/3/cancel"))
            .and(body_json(serde_json::json!({
                "status": "cancelled",
                "reason": "duplicate"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_body(3, "cancelled")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let order = client
            .cancel_order(OrderId::new(3), "duplicate")
            .await
            .expect("cancel should succeed");
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}
