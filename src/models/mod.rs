//! Core data models for caja-cli
//!
//! This module contains the data structures that represent the cash-register
//! domain: movements, money, payment methods, and identifiers.

pub mod ids;
pub mod money;
pub mod movement;

pub use ids::MovementId;
pub use money::Money;
pub use movement::{CheckDetail, Movement, MovementKind, PaymentMethod};
