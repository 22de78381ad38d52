// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)
)]

//! Gateway Mock - Library
//!
//! A test double for a brokerage's client-portal gateway (IBKR Client
//! Portal API shapes). Client integrations point at this process
//! instead of a live gateway and get structurally faithful,
//! deterministic responses.
//!
//! # Components
//!
//! - [`ledger`]: the order ledger, the only stateful piece. Tracks
//!   orders placed through the mock so modify/cancel/list calls stay
//!   self-consistent.
//! - [`catalog`]: canned payload builders for every read-only endpoint
//!   (auth, accounts, positions, summary, market data, contract
//!   search).
//! - [`server`]: axum router wiring each Client Portal path to its
//!   handler.
//! - [`config`]: environment-variable configuration for the bind
//!   address and mock account id.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod ledger;
pub mod server;

pub use config::{ConfigError, GatewayConfig};
pub use ledger::{Order, OrderLedger, OrderStatus};
pub use server::{AppState, create_router};
