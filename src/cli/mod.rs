//! CLI command handlers
//!
//! Subcommand enums and handlers for the non-interactive surface.

pub mod export;
pub mod movement;

pub use export::{handle_export_command, ExportCommands};
pub use movement::{handle_movement_command, MovementCommands};
