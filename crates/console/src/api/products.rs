//! Product resource methods and stock operations.
//!
//! Stock is not a first-class entity; it is addressed by the
//! `(product_id, warehouse_id)` pair and only ever mutated through the
//! add/decrease/transfer endpoints. Quantities are non-negative and the
//! backend enforces that a transfer never drives the source below zero;
//! the client re-checks what it can before calling (see
//! [`crate::transfer`]).

use std::collections::HashMap;

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockpilot_core::{Product, ProductId, WarehouseId};
use tracing::instrument;

use super::{ApiClient, MutationOutcome};
use crate::error::ApiError;

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreate {
    pub name: String,
    pub product_type: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
}

/// Partial update for a product; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
}

/// Stock of one product at one warehouse.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseStock {
    pub quantity: i64,
}

/// Aggregate stock of one product across all warehouses.
#[derive(Debug, Clone, Deserialize)]
pub struct StockSummary {
    pub total_quantity_all_warehouses: i64,
    #[serde(default)]
    pub warehouses_with_stock: Vec<WarehouseId>,
}

/// Payload for the add/decrease stock endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: u32,
}

/// `{status, message|stock_quantity}` envelope for stock adjustments.
#[derive(Debug, Clone, Deserialize)]
pub struct StockChangeOutcome {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}

impl StockChangeOutcome {
    /// Whether the backend reported the adjustment as applied.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The failure message, or a generic text when none was sent.
    #[must_use]
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("stock adjustment {}", self.status))
    }
}

/// Payload for the transfer endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StockTransfer {
    pub product_id: ProductId,
    pub from_warehouse_id: WarehouseId,
    pub to_warehouse_id: WarehouseId,
    pub quantity: u32,
}

/// Transient result of a transfer call. Not an entity; valid only until
/// the next stock re-fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from_warehouse_stock: i64,
    #[serde(default)]
    pub to_warehouse_stock: i64,
}

impl TransferOutcome {
    /// Whether the backend reported the transfer as applied.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Serialize)]
struct StockQuery {
    product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse_id: Option<WarehouseId>,
}

#[derive(Serialize)]
struct ProductListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse_id: Option<WarehouseId>,
}

impl ApiClient {
    /// List products, optionally restricted to one warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Vec<Product>, ApiError> {
        self.get_query("/products", &ProductListQuery { warehouse_id })
            .await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductCreate) -> Result<Product, ApiError> {
        self.post("/products", input).await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.patch(&format!("/products/{id}"), input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<MutationOutcome, ApiError> {
        self.delete(&format!("/products/{id}")).await
    }

    /// Stock of a product at one warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %product_id, warehouse_id = %warehouse_id))]
    pub async fn stock_at(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<WarehouseStock, ApiError> {
        self.get_query(
            "/products/stock",
            &StockQuery {
                product_id,
                warehouse_id: Some(warehouse_id),
            },
        )
        .await
    }

    /// Aggregate stock of a product across all warehouses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn stock_summary(&self, product_id: ProductId) -> Result<StockSummary, ApiError> {
        self.get_query(
            "/products/stock",
            &StockQuery {
                product_id,
                warehouse_id: None,
            },
        )
        .await
    }

    /// Add stock of a product at a warehouse ("stock received").
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(
        skip(self, adjustment),
        fields(product_id = %adjustment.product_id, warehouse_id = %adjustment.warehouse_id)
    )]
    pub async fn add_stock(
        &self,
        adjustment: &StockAdjustment,
    ) -> Result<StockChangeOutcome, ApiError> {
        self.post("/products/stock/add", adjustment).await
    }

    /// Write off stock of a product at a warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(
        skip(self, adjustment),
        fields(product_id = %adjustment.product_id, warehouse_id = %adjustment.warehouse_id)
    )]
    pub async fn decrease_stock(
        &self,
        adjustment: &StockAdjustment,
    ) -> Result<StockChangeOutcome, ApiError> {
        self.post("/products/stock/decrease", adjustment).await
    }

    /// Move stock of a product between two warehouses.
    ///
    /// A rejected transfer (insufficient stock, unknown product or
    /// warehouse) may arrive either as a non-2xx rejection or as a 2xx
    /// body with a non-success status; callers must check both.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(
        skip(self, transfer),
        fields(
            product_id = %transfer.product_id,
            from = %transfer.from_warehouse_id,
            to = %transfer.to_warehouse_id,
            quantity = transfer.quantity
        )
    )]
    pub async fn transfer_stock(
        &self,
        transfer: &StockTransfer,
    ) -> Result<TransferOutcome, ApiError> {
        self.post("/products/stock/transfer", transfer).await
    }

    /// Per-product stock at one warehouse, fanned out concurrently.
    ///
    /// Issues one stock query per product and joins them before
    /// returning; ordering between the in-flight requests is meaningless
    /// and only the complete map is exposed. A product whose query fails
    /// is reported as 0 rather than failing the whole page load.
    #[instrument(skip(self, product_ids), fields(warehouse_id = %warehouse_id))]
    pub async fn stock_levels(
        &self,
        product_ids: &[ProductId],
        warehouse_id: WarehouseId,
    ) -> HashMap<ProductId, i64> {
        let lookups = product_ids.iter().map(|&product_id| async move {
            let quantity = match self.stock_at(product_id, warehouse_id).await {
                Ok(stock) => stock.quantity,
                Err(err) => {
                    tracing::debug!(%product_id, %warehouse_id, error = %err, "stock lookup failed");
                    0
                }
            };
            (product_id, quantity)
        });

        join_all(lookups).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ConsoleConfig;

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ConsoleConfig::with_api_url(server.uri())).expect("client should build")
    }

    #[tokio::test]
    async fn test_stock_at_sends_both_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/stock"))
            .and(query_param("product_id", "7"))
            .and(query_param("warehouse_id", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"quantity": 14})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let stock = client
            .stock_at(ProductId::new(7), WarehouseId::new(2))
            .await
            .expect("lookup should succeed");
        assert_eq!(stock.quantity, 14);
    }

    #[tokio::test]
    async fn test_stock_summary_omits_warehouse_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/stock"))
            .and(query_param("product_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_quantity_all_warehouses": 30,
                "warehouses_with_stock": [1, 3]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let summary = client
            .stock_summary(ProductId::new(7))
            .await
            .expect("lookup should succeed");
        assert_eq!(summary.total_quantity_all_warehouses, 30);
        assert_eq!(
            summary.warehouses_with_stock,
            vec![WarehouseId::new(1), WarehouseId::new(3)]
        );
    }

    #[tokio::test]
    async fn test_transfer_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products/stock/transfer"))
            .and(body_json(serde_json::json!({
                "product_id": 7,
                "from_warehouse_id": 1,
                "to_warehouse_id": 2,
                "quantity": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "message": "Transferred 5 units",
                "from_warehouse_stock": 5,
                "to_warehouse_stock": 5
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let outcome = client
            .transfer_stock(&StockTransfer {
                product_id: ProductId::new(7),
                from_warehouse_id: WarehouseId::new(1),
                to_warehouse_id: WarehouseId::new(2),
                quantity: 5,
            })
            .await
            .expect("transfer should succeed");
        assert!(outcome.is_success());
        assert_eq!(outcome.from_warehouse_stock, 5);
        assert_eq!(outcome.to_warehouse_stock, 5);
    }

    #[tokio::test]
    async fn test_decrease_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products/stock/decrease"))
            .and(body_json(serde_json::json!({
                "product_id": 7,
                "warehouse_id": 1,
                "quantity": 4
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "stock_quantity": 6
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let outcome = client
            .decrease_stock(&StockAdjustment {
                product_id: ProductId::new(7),
                warehouse_id: WarehouseId::new(1),
                quantity: 4,
            })
            .await
            .expect("write-off should succeed");
        assert!(outcome.is_success());
        assert_eq!(outcome.stock_quantity, Some(6));
    }

    #[tokio::test]
    async fn test_stock_levels_degrades_failures_to_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/stock"))
            .and(query_param("product_id", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"quantity": 9})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/stock"))
            .and(query_param("product_id", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "detail": "boom"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let levels = client
            .stock_levels(
                &[ProductId::new(1), ProductId::new(2)],
                WarehouseId::new(1),
            )
            .await;
        assert_eq!(levels.get(&ProductId::new(1)), Some(&9));
        assert_eq!(levels.get(&ProductId::new(2)), Some(&0));
    }
}
