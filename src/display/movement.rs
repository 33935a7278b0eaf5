//! Movement display formatting
//!
//! Renders movements and register summaries as terminal tables for the CLI
//! surface. Raw stored values (unrecognized methods, non-numeric amounts) are
//! shown verbatim here; normalization only applies to aggregation.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Movement;
use crate::register::{MethodBreakdown, Totals};

#[derive(Tabled)]
struct MovementRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Movement> for MovementRow {
    fn from(movement: &Movement) -> Self {
        Self {
            date: movement.date.format("%Y-%m-%d").to_string(),
            description: movement.description.clone(),
            kind: movement.kind.to_string(),
            method: movement.method_label().to_string(),
            amount: movement.amount_display(),
        }
    }
}

/// Format a list of movements as a table
pub fn format_movement_table(movements: &[Movement]) -> String {
    if movements.is_empty() {
        return "No movements found.".to_string();
    }

    let rows: Vec<MovementRow> = movements.iter().map(MovementRow::from).collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Format totals and the per-method breakdown as a table
pub fn format_summary_table(totals: &Totals, breakdown: &MethodBreakdown) -> String {
    let mut rows: Vec<BreakdownRow> = breakdown
        .iter()
        .map(|(method, bucket)| BreakdownRow {
            method: method.to_string(),
            income: bucket.income.to_string(),
            expense: bucket.expense.to_string(),
            net: bucket.net().to_string(),
        })
        .collect();

    rows.push(BreakdownRow {
        method: "Total".to_string(),
        income: totals.income.to_string(),
        expense: totals.expense.to_string(),
        net: totals.net().to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MovementKind, PaymentMethod};
    use crate::register::{RegisterFilter, RegisterView};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_table() {
        assert_eq!(format_movement_table(&[]), "No movements found.");
    }

    #[test]
    fn test_movement_table_contents() {
        let movement = Movement::new(
            "Sale deposit",
            Money::from_cents(250_000),
            MovementKind::Income,
            PaymentMethod::Transfer,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        );

        let table = format_movement_table(&[movement]);
        assert!(table.contains("2025-03-10"));
        assert!(table.contains("Sale deposit"));
        assert!(table.contains("transfer"));
        assert!(table.contains("2500.00"));
    }

    #[test]
    fn test_raw_values_shown_verbatim() {
        let mut movement = Movement::new(
            "Odd entry",
            Money::zero(),
            MovementKind::Expense,
            PaymentMethod::Cash,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        );
        movement.raw_amount = Some("not-a-number".to_string());
        movement.raw_method = Some("bitcoin".to_string());

        let table = format_movement_table(&[movement]);
        assert!(table.contains("not-a-number"));
        assert!(table.contains("bitcoin"));
    }

    #[test]
    fn test_summary_table() {
        let movements = vec![Movement::new(
            "Sale",
            Money::from_cents(100_000),
            MovementKind::Income,
            PaymentMethod::Cash,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )];
        let view = RegisterView::compute(&movements, &RegisterFilter::new());

        let table = format_summary_table(&view.totals, &view.breakdown);
        assert!(table.contains("Cash"));
        assert!(table.contains("Total"));
        assert!(table.contains("$1000.00"));
    }
}
