//! Service layer for caja-cli
//!
//! Business logic on top of the document store: validation, document
//! encoding/decoding, and window queries.

pub mod movement;

pub use movement::{MovementInput, MovementService, MOVEMENTS_COLLECTION};
