//! Modal dialogs

pub mod confirm;
pub mod movement;

pub use movement::{MovementField, MovementFormState};
