//! Register view
//!
//! Renders the movement table for the daily and full-history windows, plus
//! the header and the summary panel shared with the monthly view.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::MovementKind;
use crate::register::BalanceState;
use crate::tui::app::{App, FetchStatus, ViewMode};

/// Render the register header: window label, fetch status, filter row
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = match &app.fetch_status {
        FetchStatus::Idle => Span::raw(""),
        FetchStatus::Loading => Span::styled("  loading...", Style::default().fg(Color::Yellow)),
        FetchStatus::Error(_) => Span::styled(
            "  stale - press R to reload",
            Style::default().fg(Color::Red),
        ),
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.window_label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        status,
    ]);

    let filter_line = if app.show_filters {
        Line::from(vec![
            Span::styled("filter: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                if app.filter.text.is_empty() && !app.filter_active {
                    "(type to search)".to_string()
                } else {
                    format!("{}_", app.filter.text)
                },
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("   kind: {:?}   sort: {:?} {:?}", app.filter.kind, app.filter.sort, app.filter.direction),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "f: filters  a: add  Enter: edit  d: delete  e: export",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(vec![title, filter_line]).block(block), area);
}

/// Render the movement table
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.view.rows.is_empty() {
        let text = Paragraph::new("No movements. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Description
        Constraint::Length(9),  // Type
        Constraint::Length(10), // Method
        Constraint::Length(14), // Amount
    ];

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Description"),
        Cell::from("Type"),
        Cell::from("Method"),
        Cell::from("Amount"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = app
        .view
        .rows
        .iter()
        .map(|movement| {
            let amount_color = match movement.kind {
                MovementKind::Income => Color::Green,
                MovementKind::Expense => Color::Red,
            };
            Row::new(vec![
                Cell::from(movement.date.format("%Y-%m-%d").to_string()),
                Cell::from(movement.description.clone()),
                Cell::from(movement.kind.to_string()),
                Cell::from(movement.method_label().to_string()),
                Cell::from(movement.amount_display())
                    .style(Style::default().fg(amount_color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the summary panel: totals, breakdown, running balance
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let totals = &app.view.totals;
    let mut lines = vec![Line::from(vec![
        Span::styled("Income ", Style::default().fg(Color::Green)),
        Span::raw(format!("{:>12}", totals.income.to_string())),
        Span::styled("   Expense ", Style::default().fg(Color::Red)),
        Span::raw(format!("{:>12}", totals.expense.to_string())),
        Span::styled("   Net ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("{:>12}", totals.net().to_string())),
    ])];

    lines.push(Line::from(""));
    for (method, bucket) in app.view.breakdown.iter() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", method.to_string()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                "income {:>12}   expense {:>12}   net {:>12}",
                bucket.income.to_string(),
                bucket.expense.to_string(),
                bucket.net().to_string()
            )),
        ]));
    }

    if app.mode == ViewMode::Daily {
        let balance = match app.balance {
            BalanceState::Known(balance) => balance.to_string(),
            BalanceState::Unknown => "unknown".to_string(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "Running balance ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(balance),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
