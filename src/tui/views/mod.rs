//! View rendering
//!
//! Draws the full screen from the view controller's state: header, content
//! (movement table or monthly buckets), summary panel, status bar, and any
//! active dialog or notification on top.

pub mod monthly;
pub mod register;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{ActiveDialog, App, ViewMode};
use super::dialogs;
use super::layout::AppLayout;

/// Render the whole frame
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    register::render_header(frame, app, layout.header);

    match app.mode {
        ViewMode::Monthly => monthly::render(frame, app, layout.content),
        _ => register::render_table(frame, app, layout.content),
    }

    register::render_summary(frame, app, layout.summary);
    render_status_bar(frame, app, layout.status_bar);

    match &app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::AddMovement | ActiveDialog::EditMovement(_) => {
            dialogs::movement::render(frame, &app.form);
        }
        ActiveDialog::ConfirmDelete(_) => {
            let description = app
                .selected_movement()
                .map(|m| m.description.clone())
                .unwrap_or_default();
            dialogs::confirm::render(frame, &format!("Delete movement '{}'?", description));
        }
    }

    if let Some(notification) = &app.notification {
        frame.render_widget(notification, frame.area());
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mode = match app.mode {
        ViewMode::Daily => "daily",
        ViewMode::FullHistory => "history",
        ViewMode::Monthly => "monthly",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            "  [/]: day  h: history  m: monthly  t: today  q: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
