//! Register aggregation
//!
//! Pure derivation of scalar totals and the per-payment-method breakdown from
//! a window of movements. Aggregation always runs over the filtered set:
//! filtering happens first, summation second.

use crate::models::{Money, Movement, MovementKind, PaymentMethod};

use super::filter::{apply, RegisterFilter};

/// Income/expense sums with their net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Net balance: income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    /// Add one movement's ledger amount to the matching side
    fn accumulate(&mut self, movement: &Movement) {
        match movement.kind {
            MovementKind::Income => self.income += movement.ledger_amount(),
            MovementKind::Expense => self.expense += movement.ledger_amount(),
        }
    }

    /// Totals over a set of movements
    pub fn of(movements: &[Movement]) -> Self {
        let mut totals = Self::default();
        for movement in movements {
            totals.accumulate(movement);
        }
        totals
    }
}

/// Per-payment-method income/expense/net subtotals.
///
/// Every recognized method has a bucket, present even when zero. Movements
/// normalize to one of the five methods at ingestion, so indexing is total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodBreakdown {
    cash: Totals,
    transfer: Totals,
    card: Totals,
    check: Totals,
    other: Totals,
}

impl MethodBreakdown {
    /// Breakdown over a set of movements
    pub fn of(movements: &[Movement]) -> Self {
        let mut breakdown = Self::default();
        for movement in movements {
            breakdown.bucket_mut(movement.payment_method).accumulate(movement);
        }
        breakdown
    }

    /// The bucket for one method
    pub fn bucket(&self, method: PaymentMethod) -> &Totals {
        match method {
            PaymentMethod::Cash => &self.cash,
            PaymentMethod::Transfer => &self.transfer,
            PaymentMethod::Card => &self.card,
            PaymentMethod::Check => &self.check,
            PaymentMethod::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, method: PaymentMethod) -> &mut Totals {
        match method {
            PaymentMethod::Cash => &mut self.cash,
            PaymentMethod::Transfer => &mut self.transfer,
            PaymentMethod::Card => &mut self.card,
            PaymentMethod::Check => &mut self.check,
            PaymentMethod::Other => &mut self.other,
        }
    }

    /// Iterate buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (PaymentMethod, &Totals)> {
        PaymentMethod::ALL.iter().map(move |m| (*m, self.bucket(*m)))
    }
}

/// The fully derived register view: filtered rows plus their aggregates
#[derive(Debug, Clone, Default)]
pub struct RegisterView {
    /// Filtered, sorted movements for display
    pub rows: Vec<Movement>,

    /// Totals over the filtered set
    pub totals: Totals,

    /// Per-method breakdown over the filtered set
    pub breakdown: MethodBreakdown,
}

impl RegisterView {
    /// Derive the view from a fetched window and display parameters.
    ///
    /// Pure function: same inputs, same outputs, no side effects.
    pub fn compute(movements: &[Movement], filter: &RegisterFilter) -> Self {
        let rows = apply(movements, filter);
        let totals = Totals::of(&rows);
        let breakdown = MethodBreakdown::of(&rows);
        Self {
            rows,
            totals,
            breakdown,
        }
    }
}
