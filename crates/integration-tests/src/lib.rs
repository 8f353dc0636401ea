//! Integration test harness for Stockpilot.
//!
//! Spins up a mock backend per test and wires the console components to
//! it. Tests script the backend's responses with wiremock; stateful
//! flows (stock changing across a transfer) are modeled by mounting
//! expiring mocks in sequence with `up_to_n_times`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockpilot-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use stockpilot_console::lifecycle::OrderLifecycle;
use stockpilot_console::transfer::TransferOrchestrator;
use stockpilot_console::{ApiClient, ConsoleConfig};
use wiremock::MockServer;

/// One mock backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestBackend {
    /// Start a fresh mock backend.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = ApiClient::new(&ConsoleConfig::with_api_url(server.uri()))
            .expect("client should build");
        Self { server, client }
    }

    /// A transfer orchestrator with the follow-up delay collapsed to
    /// zero so tests do not sleep.
    #[must_use]
    pub fn orchestrator(&self) -> TransferOrchestrator {
        TransferOrchestrator::with_delay(self.client.clone(), std::time::Duration::ZERO)
    }

    #[must_use]
    pub fn lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(self.client.clone())
    }
}

/// Backend-shaped order JSON with the fields tests care about.
#[must_use]
pub fn order_json(
    id: i32,
    status: &str,
    warehouse: i32,
    comment: Option<&str>,
    items: &[(i32, &str, u32, &str)],
    total_price: &str,
) -> serde_json::Value {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(product_id, name, quantity, price)| {
            serde_json::json!({
                "product_id": product_id,
                "name": name,
                "quantity": quantity,
                "price": price
            })
        })
        .collect();
    serde_json::json!({
        "id": id,
        "status": status,
        "created_at": "2025-03-10T09:00:00Z",
        "warehouse": warehouse,
        "client_name": "Internal transfer",
        "destination_address": "Warehouse 2",
        "comment": comment,
        "cancellation_reason": null,
        "items": items,
        "total_price": total_price,
        "qr_code": null
    })
}

/// `{quantity}` body for the per-warehouse stock endpoint.
#[must_use]
pub fn stock_json(quantity: i64) -> serde_json::Value {
    serde_json::json!({ "quantity": quantity })
}
