//! Stock transfer orchestration.
//!
//! The one multi-step workflow in the console: move stock between
//! warehouses, optionally creating a follow-up order at the destination
//! to represent the incoming shipment. The two steps are strictly
//! ordered; step 2 runs only after step 1 succeeded, and a step-2
//! failure never hides the fact that the stock already moved.

use std::time::Duration;

use stockpilot_core::{Order, ProductId, WarehouseId};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::orders::{OrderCreate, OrderItemCreate};
use crate::api::products::{StockTransfer, TransferOutcome};
use crate::api::ApiClient;
use crate::config::ConsoleConfig;
use crate::error::ApiError;

/// Everything the orchestrator needs to run one transfer.
///
/// `available` is the caller's last-known stock at the source; the
/// orchestrator validates against it before touching the network, the
/// backend re-validates authoritatively.
#[derive(Debug, Clone)]
pub struct TransferPlan {
    pub product_id: ProductId,
    pub source: WarehouseId,
    pub destination: Option<WarehouseId>,
    pub quantity: u32,
    pub available: i64,
    pub create_follow_up_order: bool,
}

/// Local-validation and step-1 failures. A step-2 failure is not an
/// error; it is carried inside [`TransferReport`].
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("Requested {requested} units but only {available} available")]
    InsufficientStock { requested: u32, available: i64 },
    #[error("No destination warehouse selected")]
    NoDestination,
    #[error("Source and destination warehouse are the same")]
    SameWarehouse,
    /// The backend answered the transfer call and refused it.
    #[error("Transfer rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Outcome of the conditional follow-up order step.
#[derive(Debug, Clone)]
pub enum FollowUpOrder {
    Created(Order),
    Failed(String),
}

/// Consolidated result of a transfer that got past step 1.
///
/// When `follow_up` is `Some(Failed(_))` the transfer itself still
/// succeeded; callers must surface both facts and never collapse the
/// pair into a single pass/fail.
#[derive(Debug, Clone)]
pub struct TransferReport {
    pub outcome: TransferOutcome,
    pub follow_up: Option<FollowUpOrder>,
}

impl TransferReport {
    /// True only when the transfer succeeded and no follow-up step failed.
    #[must_use]
    pub fn is_fully_successful(&self) -> bool {
        !matches!(self.follow_up, Some(FollowUpOrder::Failed(_)))
    }
}

/// Runs transfers against the backend.
///
/// The pause before the follow-up order tolerates the backend's
/// eventually-consistent stock view; it is configuration, not a magic
/// sleep (`STOCKPILOT_FOLLOW_UP_DELAY_MS`).
#[derive(Debug, Clone)]
pub struct TransferOrchestrator {
    client: ApiClient,
    follow_up_delay: Duration,
}

impl TransferOrchestrator {
    #[must_use]
    pub fn new(client: ApiClient, config: &ConsoleConfig) -> Self {
        Self {
            client,
            follow_up_delay: config.follow_up_delay,
        }
    }

    /// An orchestrator with an explicit follow-up delay.
    #[must_use]
    pub fn with_delay(client: ApiClient, follow_up_delay: Duration) -> Self {
        Self {
            client,
            follow_up_delay,
        }
    }

    /// Run one transfer end to end.
    ///
    /// Validation failures short-circuit before any request is issued.
    /// After this returns, the caller must re-fetch the stock it
    /// displays; the quantities inside the report are a display nicety,
    /// not a substitute for the confirmed refresh.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] for local validation failures, transport
    /// failures, and a backend-refused transfer. A failed follow-up
    /// order is reported inside the `Ok` value instead.
    #[instrument(skip(self, plan), fields(
        product_id = %plan.product_id,
        source = %plan.source,
        quantity = plan.quantity,
    ))]
    pub async fn execute(&self, plan: &TransferPlan) -> Result<TransferReport, TransferError> {
        let destination = Self::validate(plan)?;

        let outcome = self
            .client
            .transfer_stock(&StockTransfer {
                product_id: plan.product_id,
                from_warehouse_id: plan.source,
                to_warehouse_id: destination,
                quantity: plan.quantity,
            })
            .await?;
        if !outcome.is_success() {
            return Err(TransferError::Rejected(outcome.message));
        }
        info!(
            from_stock = outcome.from_warehouse_stock,
            to_stock = outcome.to_warehouse_stock,
            "stock transferred"
        );

        let follow_up = if plan.create_follow_up_order {
            tokio::time::sleep(self.follow_up_delay).await;
            Some(self.create_follow_up(plan, destination).await)
        } else {
            None
        };

        Ok(TransferReport { outcome, follow_up })
    }

    fn validate(plan: &TransferPlan) -> Result<WarehouseId, TransferError> {
        if plan.quantity == 0 {
            return Err(TransferError::NonPositiveQuantity);
        }
        if i64::from(plan.quantity) > plan.available {
            return Err(TransferError::InsufficientStock {
                requested: plan.quantity,
                available: plan.available,
            });
        }
        let destination = plan.destination.ok_or(TransferError::NoDestination)?;
        if destination == plan.source {
            return Err(TransferError::SameWarehouse);
        }
        Ok(destination)
    }

    async fn create_follow_up(&self, plan: &TransferPlan, destination: WarehouseId) -> FollowUpOrder {
        let input = OrderCreate {
            warehouse_id: destination,
            client_name: "Internal transfer".to_string(),
            destination_address: format!("Warehouse {destination}"),
            comment: Some(format!(
                "{} from warehouse {}",
                Order::TRANSFER_MARKER,
                plan.source
            )),
            items: vec![OrderItemCreate {
                product_id: plan.product_id,
                quantity: plan.quantity,
            }],
        };

        match self.client.create_order(&input).await {
            Ok(order) => FollowUpOrder::Created(order),
            Err(e) => {
                warn!(error = %e, "stock moved but follow-up order was not created");
                FollowUpOrder::Failed(e.to_string())
            }
        }
    }
}
