//! Monthly view
//!
//! One row per calendar day with its income/expense/net subtotal, folding
//! into the month totals shown in the summary panel.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::tui::app::App;

/// Render the per-day buckets of the month
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let summary = match &app.monthly {
        Some(summary) if !summary.days.is_empty() => summary,
        _ => {
            let text = Paragraph::new("No movements this month.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text, area);
            return;
        }
    };

    let widths = [
        Constraint::Length(12), // Day
        Constraint::Length(10), // Movements
        Constraint::Length(14), // Income
        Constraint::Length(14), // Expense
        Constraint::Length(14), // Net
    ];

    let header = Row::new(vec![
        Cell::from("Day"),
        Cell::from("Entries"),
        Cell::from("Income"),
        Cell::from("Expense"),
        Cell::from("Net"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = summary
        .days
        .iter()
        .map(|day| {
            let net = day.net();
            let net_color = if net.is_negative() {
                Color::Red
            } else {
                Color::Green
            };
            Row::new(vec![
                Cell::from(day.date.format("%Y-%m-%d").to_string()),
                Cell::from(day.movements.len().to_string()),
                Cell::from(day.totals.income.to_string()),
                Cell::from(day.totals.expense.to_string()),
                Cell::from(net.to_string()).style(Style::default().fg(net_color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
