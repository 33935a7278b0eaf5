//! CSV export
//!
//! Writes the register's two sheets in spreadsheet-compatible CSV: the
//! movements sheet (one row per displayed movement) and the summary sheet
//! (totals, per-method breakdown, running balance).

use std::io::Write;

use crate::error::{CajaError, CajaResult};
use crate::models::{Money, Movement};
use crate::register::{MethodBreakdown, Totals};

fn export_err(e: csv::Error) -> CajaError {
    CajaError::Export(e.to_string())
}

/// Write the movements sheet
pub fn export_movements_csv<W: Write>(rows: &[Movement], writer: W) -> CajaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "Date",
        "Description",
        "Type",
        "Payment Method",
        "Amount",
        "Check Number",
        "Check Issuer",
        "Check Issue Date",
        "Check Due Date",
    ])
    .map_err(export_err)?;

    for movement in rows {
        let detail = movement.check_detail.as_ref();
        csv.write_record([
            movement.date.to_string(),
            movement.description.clone(),
            movement.kind.to_string(),
            movement.method_label().to_string(),
            movement.amount_display(),
            detail.map(|d| d.number.clone()).unwrap_or_default(),
            detail.map(|d| d.issuer.clone()).unwrap_or_default(),
            detail
                .and_then(|d| d.issue_date)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            detail
                .and_then(|d| d.due_date)
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(|e| CajaError::Export(e.to_string()))?;
    Ok(())
}

/// Write the summary sheet
pub fn export_summary_csv<W: Write>(
    totals: &Totals,
    breakdown: &MethodBreakdown,
    balance: Option<Money>,
    writer: W,
) -> CajaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Section", "Income", "Expense", "Net"])
        .map_err(export_err)?;

    csv.write_record([
        "Totals".to_string(),
        totals.income.to_decimal_string(),
        totals.expense.to_decimal_string(),
        totals.net().to_decimal_string(),
    ])
    .map_err(export_err)?;

    for (method, bucket) in breakdown.iter() {
        csv.write_record([
            method.to_string(),
            bucket.income.to_decimal_string(),
            bucket.expense.to_decimal_string(),
            bucket.net().to_decimal_string(),
        ])
        .map_err(export_err)?;
    }

    if let Some(balance) = balance {
        csv.write_record([
            "Running Balance".to_string(),
            String::new(),
            String::new(),
            balance.to_decimal_string(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(|e| CajaError::Export(e.to_string()))?;
    Ok(())
}
