//! caja-cli - Terminal-based daily cash register for a vehicle dealership
//!
//! This library implements the dealership back office's daily cash register:
//! income and expense movements tagged with a payment method, reconciled into
//! daily, monthly, and running-balance summaries.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (movements, money, payment methods)
//! - `store`: Document store abstraction and its backends
//! - `register`: Pure aggregation core (filter, totals, breakdown, balance,
//!   monthly grouping)
//! - `services`: Business logic between views and the store
//! - `export`: CSV sheets and clipboard summary
//! - `display`: Terminal tables for the CLI surface
//! - `cli`: Subcommand handlers
//! - `tui`: Interactive register

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod register;
pub mod services;
pub mod store;
pub mod tui;

pub use error::CajaError;
