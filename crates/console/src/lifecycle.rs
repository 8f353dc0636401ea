//! Order lifecycle control.
//!
//! Drives an order's status forward, handles cancel-with-reason, and
//! runs the stock side-effect of completing a transfer-generated order:
//! each line item's quantity is added back at the order's warehouse,
//! modeling physical receipt of the shipment.

use futures::future::join_all;
use stockpilot_core::{Order, OrderStatus, ProductId};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::products::StockAdjustment;
use crate::api::ApiClient;
use crate::error::ApiError;

/// Local-validation and request failures for lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Cancellation is not a direct status update; use cancel with a reason")]
    CancelViaStatusUpdate,
    #[error("Cancellation requires a non-empty reason")]
    ReasonRequired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One line item whose stock-add failed during completion.
#[derive(Debug, Clone)]
pub struct ItemStockFailure {
    pub product_id: ProductId,
    pub name: String,
    pub message: String,
}

/// Aggregate outcome of the completion side-effect.
///
/// The order is completed either way; failures here mean some received
/// stock was not booked and needs manual correction.
#[derive(Debug, Clone, Default)]
pub struct CompletionReport {
    pub failures: Vec<ItemStockFailure>,
}

impl CompletionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The server's authoritative copy of the order after the change.
    pub order: Order,
    /// Present only when the completion side-effect ran.
    pub completion: Option<CompletionReport>,
}

/// Drives order status transitions against the backend.
#[derive(Debug, Clone)]
pub struct OrderLifecycle {
    client: ApiClient,
}

impl OrderLifecycle {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Move an order to a new non-cancelled status.
    ///
    /// Transition legality is checked locally first; an illegal move
    /// never reaches the network. On success the returned
    /// [`StatusChange`] carries the server's copy of the order, which
    /// must replace the local one.
    ///
    /// When the target is `completed` and the order is
    /// transfer-generated, one best-effort stock add runs per line item
    /// at the order's warehouse. All adds settle before this returns;
    /// their failures are aggregated in the completion report and do not
    /// undo the completed status.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] for an illegal transition, a cancelled
    /// target (use [`Self::cancel`]), or a failed request.
    #[instrument(skip(self, order), fields(order_id = %order.id, from = %order.status, to = %target))]
    pub async fn advance(
        &self,
        order: &Order,
        target: OrderStatus,
    ) -> Result<StatusChange, LifecycleError> {
        if target == OrderStatus::Cancelled {
            return Err(LifecycleError::CancelViaStatusUpdate);
        }
        if !order.status.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        let updated = self.client.update_order_status(order.id, target).await?;

        let completion = if updated.status == OrderStatus::Completed
            && updated.is_transfer_generated()
        {
            Some(self.receive_stock(&updated).await)
        } else {
            None
        };

        Ok(StatusChange {
            order: updated,
            completion,
        })
    }

    /// Cancel an order with a reason, then re-fetch it so the local copy
    /// picks up the server-set `cancellation_reason` and anything else
    /// the cancel endpoint does not return directly.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ReasonRequired`] for an empty or
    /// whitespace-only reason (no request is made),
    /// [`LifecycleError::InvalidTransition`] when the order is already
    /// terminal, or the request failure.
    #[instrument(skip(self, order, reason), fields(order_id = %order.id))]
    pub async fn cancel(&self, order: &Order, reason: &str) -> Result<Order, LifecycleError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LifecycleError::ReasonRequired);
        }
        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(LifecycleError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        self.client.cancel_order(order.id, reason).await?;
        Ok(self.client.get_order(order.id).await?)
    }

    /// Book the received stock for every line item, best effort.
    async fn receive_stock(&self, order: &Order) -> CompletionReport {
        let adds = order.items.iter().map(|item| async move {
            let result = self
                .client
                .add_stock(&StockAdjustment {
                    product_id: item.product_id,
                    warehouse_id: order.warehouse,
                    quantity: item.quantity,
                })
                .await;

            let message = match result {
                Ok(outcome) if outcome.is_success() => return None,
                Ok(outcome) => outcome.message_or_default(),
                Err(e) => e.to_string(),
            };
            Some(ItemStockFailure {
                product_id: item.product_id,
                name: item.name.clone(),
                message,
            })
        });

        let failures: Vec<ItemStockFailure> =
            join_all(adds).await.into_iter().flatten().collect();

        if failures.is_empty() {
            info!(order_id = %order.id, items = order.items.len(), "received stock booked");
        } else {
            warn!(
                order_id = %order.id,
                failed = failures.len(),
                "order completed but some stock adds failed"
            );
        }
        CompletionReport { failures }
    }
}
