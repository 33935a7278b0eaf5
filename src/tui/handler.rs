//! Event handler for the TUI
//!
//! Routes keyboard events to the view controller's operations based on the
//! current state: dialog keys first, then filter entry, then the register
//! shortcuts.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::app::{ActiveDialog, App};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog {
        ActiveDialog::AddMovement | ActiveDialog::EditMovement(_) => handle_form_key(app, key),
        ActiveDialog::ConfirmDelete(_) => handle_confirm_key(app, key),
        ActiveDialog::None => {
            if app.filter_active {
                handle_filter_key(app, key)
            } else {
                handle_register_key(app, key)
            }
        }
    }
}

/// Keys on the register screen
fn handle_register_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),

        // Date navigation
        KeyCode::Char('[') | KeyCode::Left => app.prev_period(),
        KeyCode::Char(']') | KeyCode::Right => app.next_period(),
        KeyCode::Char('t') => app.goto_today(),

        // View modes
        KeyCode::Char('h') => app.toggle_full_history(),
        KeyCode::Char('m') => app.toggle_monthly(),

        // Advanced filters
        KeyCode::Char('f') | KeyCode::Char('/') => app.toggle_filters(),

        // Sorting
        KeyCode::Char('s') => app.cycle_sort_field(),
        KeyCode::Char('r') => app.toggle_sort_direction(),

        // Selection
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        // Movement lifecycle
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),

        // Export and explicit reload
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('R') => app.refresh(),

        _ => {}
    }
    Ok(())
}

/// Keys while the filter row is active
fn handle_filter_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.toggle_filters(),
        KeyCode::Enter => app.filter_active = false,
        KeyCode::Tab => app.cycle_kind_filter(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Char(c) => app.push_filter_char(c),
        _ => {}
    }
    Ok(())
}

/// Keys inside the movement form
fn handle_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_dialog(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Char(' ') => match app.form.focused_input() {
            // Space toggles the choice fields, types into text fields
            None => {
                use super::dialogs::MovementField;
                if app.form.focused_field == MovementField::Kind {
                    app.form.toggle_kind();
                } else {
                    app.form.cycle_method();
                }
            }
            Some(input) => input.insert(' '),
        },
        KeyCode::Char(c) => {
            if let Some(input) = app.form.focused_input() {
                input.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.form.focused_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.form.focused_input() {
                input.move_right();
            }
        }
        _ => {}
    }
    Ok(())
}

/// Keys in the delete confirmation
fn handle_confirm_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_dialog(),
        _ => {}
    }
    Ok(())
}
