//! Stockpilot Core - Shared domain types.
//!
//! This crate provides the entity types used across all Stockpilot
//! components:
//! - `console` - Client library talking to the warehouse backend
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. All
//! entities here are owned and mutated by the remote backend; the structs
//! model the shapes the backend returns, nothing more.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order state machine, and entity structs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
