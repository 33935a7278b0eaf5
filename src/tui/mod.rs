//! Terminal User Interface module
//!
//! The interactive register: a ratatui screen over the view controller in
//! `app`, with modal dialogs for entry, edit, and delete confirmation.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
