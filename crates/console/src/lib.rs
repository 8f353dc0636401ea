//! Stockpilot Console - client library for the warehouse backend.
//!
//! The backend owns every business rule and all persistent state; this
//! crate is the client-side contract. It provides:
//!
//! - [`api`] - Typed resource clients over the backend's REST endpoints
//! - [`view`] - Per-page view state: load state, stable sorting, the
//!   patch-vs-refetch commit protocol
//! - [`transfer`] - The stock transfer orchestrator (the one multi-step
//!   workflow, with compound partial-failure reporting)
//! - [`lifecycle`] - Order status transitions, cancellation, and the
//!   stock side-effect of completing a transfer-generated order
//! - [`session`] - Explicit login session carried via backend cookies
//!
//! # Error handling
//!
//! Every component recovers errors at its own boundary and returns them
//! as values; nothing here panics on a failed request. Transport failures
//! and server rejections share the single [`error::ApiError`] channel.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod transfer;
pub mod view;

pub use api::ApiClient;
pub use config::ConsoleConfig;
pub use error::ApiError;
pub use lifecycle::OrderLifecycle;
pub use session::Session;
pub use transfer::TransferOrchestrator;
