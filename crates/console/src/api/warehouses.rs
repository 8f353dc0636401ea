//! Warehouse resource methods.

use serde::Serialize;
use stockpilot_core::{Warehouse, WarehouseId};
use tracing::instrument;

use super::{ApiClient, MutationOutcome};
use crate::error::ApiError;

/// Payload for creating a warehouse.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial update for a warehouse; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WarehouseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ApiClient {
    /// List all warehouses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.get("/warehouses").await
    }

    /// Fetch a single warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(warehouse_id = %id))]
    pub async fn get_warehouse(&self, id: WarehouseId) -> Result<Warehouse, ApiError> {
        self.get(&format!("/warehouses/{id}")).await
    }

    /// Create a warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_warehouse(&self, input: &WarehouseCreate) -> Result<Warehouse, ApiError> {
        self.post("/warehouses", input).await
    }

    /// Update a warehouse.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, input), fields(warehouse_id = %id))]
    pub async fn update_warehouse(
        &self,
        id: WarehouseId,
        input: &WarehouseUpdate,
    ) -> Result<Warehouse, ApiError> {
        self.patch(&format!("/warehouses/{id}"), input).await
    }

    /// Delete a warehouse.
    ///
    /// The backend may refuse (warehouse still holds stock); that refusal
    /// arrives as a non-success [`MutationOutcome`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(warehouse_id = %id))]
    pub async fn delete_warehouse(&self, id: WarehouseId) -> Result<MutationOutcome, ApiError> {
        self.delete(&format!("/warehouses/{id}")).await
    }
}
