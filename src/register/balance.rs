//! Running balance
//!
//! The cumulative net of every movement dated up to and including a reference
//! date. Independent of display filters: it always reflects the true
//! historical balance of the register.

use chrono::NaiveDate;

use crate::models::{Money, Movement};

/// Sum of signed amounts over a historical window.
///
/// The caller supplies the full history up to the reference date; movements
/// dated after it are ignored so a partially over-fetched window cannot leak
/// into the balance.
pub fn running_balance(history: &[Movement], as_of: NaiveDate) -> Money {
    history
        .iter()
        .filter(|m| m.date <= as_of)
        .map(Movement::signed_amount)
        .sum()
}

/// The balance as held by the view controller.
///
/// A failed historical fetch must read as "unknown", never as zero: zero is a
/// valid real balance and the two must not be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceState {
    /// No fetch has completed yet, or the last one failed
    #[default]
    Unknown,
    /// Balance as of the last successful fetch
    Known(Money),
}

impl BalanceState {
    /// The balance, if known
    pub fn value(&self) -> Option<Money> {
        match self {
            Self::Known(balance) => Some(*balance),
            Self::Unknown => None,
        }
    }
}
