//! Clipboard summary
//!
//! Plain-text rendering of an aggregated view, suitable for pasting into a
//! message or a report. A pure formatter over data the register already
//! computed.

use crate::models::Money;
use crate::register::{MethodBreakdown, Totals};

/// Build the clipboard text for one aggregated view.
///
/// `title` names the window ("2025-03-10", "March 2025", "Full history");
/// `balance` is included only when known.
pub fn build_clipboard_summary(
    title: &str,
    totals: &Totals,
    breakdown: &MethodBreakdown,
    balance: Option<Money>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Cash register - {}\n", title));
    out.push_str(&format!("Income:  {}\n", totals.income));
    out.push_str(&format!("Expense: {}\n", totals.expense));
    out.push_str(&format!("Net:     {}\n", totals.net()));

    out.push('\n');
    out.push_str("By payment method:\n");
    for (method, bucket) in breakdown.iter() {
        if *bucket == Totals::default() {
            continue;
        }
        out.push_str(&format!(
            "  {:<10} income {}  expense {}  net {}\n",
            method.to_string(),
            bucket.income,
            bucket.expense,
            bucket.net(),
        ));
    }

    if let Some(balance) = balance {
        out.push('\n');
        out.push_str(&format!("Running balance: {}\n", balance));
    }

    out
}
