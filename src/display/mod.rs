//! Terminal display formatting for the CLI surface

pub mod movement;

pub use movement::{format_movement_table, format_summary_table};
