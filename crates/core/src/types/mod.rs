//! Core types for Stockpilot.
//!
//! Type-safe wrappers for the warehouse domain: entity IDs, the order
//! status state machine, and the entities themselves.

pub mod id;
pub mod order;
pub mod product;
pub mod warehouse;

pub use id::*;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use warehouse::Warehouse;
