//! Orders and the order status state machine.
//!
//! Status transitions form a linear happy path with cancellation reachable
//! from every non-terminal state:
//!
//! ```text
//! new -> processing -> shipped -> completed
//!  \         |           /
//!   +--- cancelled <----+
//! ```
//!
//! `completed` and `cancelled` are terminal; no transition leaves either.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, WarehouseId};

/// Order status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether no transition is defined out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the state machine defines a transition from `self` to `next`.
    ///
    /// The happy path is strictly linear; `Cancelled` is reachable from any
    /// non-terminal status. Self-transitions are not defined.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Processing)
                | (Self::Processing, Self::Shipped)
                | (Self::Shipped, Self::Completed)
                | (Self::New | Self::Processing | Self::Shipped, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// One line item of an order.
///
/// `price` is a snapshot taken at order-creation time, not a live
/// reference to the product's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Warehouse the order ships from (or, for transfer-generated orders,
    /// the warehouse that receives the transferred stock).
    pub warehouse: WarehouseId,
    pub client_name: String,
    pub destination_address: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    pub items: Vec<OrderItem>,
    /// Server-computed sum of line totals.
    pub total_price: Decimal,
    /// Server-generated asset reference; never fetched by this client.
    #[serde(default)]
    pub qr_code: Option<String>,
}

impl Order {
    /// Comment substring marking orders auto-created by a stock transfer.
    ///
    /// The transfer orchestrator writes it and the lifecycle controller
    /// reads it; keeping the literal here stops the two from drifting.
    pub const TRANSFER_MARKER: &'static str = "[stock-transfer]";

    /// Whether this order was auto-created by a stock transfer.
    #[must_use]
    pub fn is_transfer_generated(&self) -> bool {
        self.comment
            .as_deref()
            .is_some_and(|c| c.contains(Self::TRANSFER_MARKER))
    }
}
