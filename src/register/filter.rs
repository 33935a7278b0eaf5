//! Display filtering and sorting for the register
//!
//! Filtering is conjunctive: a movement passes only if it matches the text
//! filter AND the kind filter. Sorting is stable, so movements with equal
//! keys keep their original fetch order.

use crate::models::{Movement, MovementKind};

/// Kind filter for the register view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    /// Whether a movement passes this filter
    pub fn matches(&self, movement: &Movement) -> bool {
        match self {
            Self::All => true,
            Self::Income => movement.kind == MovementKind::Income,
            Self::Expense => movement.kind == MovementKind::Expense,
        }
    }

    /// Cycle to the next filter value (for the TUI toggle)
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }
}

/// Field the register can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Description,
    Amount,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Filter and sort parameters for the register view
#[derive(Debug, Clone, Default)]
pub struct RegisterFilter {
    /// Free-text filter, matched case-insensitively against the description
    /// or the stringified amount
    pub text: String,

    /// Kind filter
    pub kind: KindFilter,

    /// Sort field
    pub sort: SortField,

    /// Sort direction
    pub direction: SortDirection,
}

impl RegisterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn sort(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Whether a movement passes both predicates
    pub fn matches(&self, movement: &Movement) -> bool {
        self.kind.matches(movement) && self.matches_text(movement)
    }

    fn matches_text(&self, movement: &Movement) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        movement.description.to_lowercase().contains(&needle)
            || movement.amount_display().to_lowercase().contains(&needle)
    }
}

/// Apply a filter and stable sort to a fetched window of movements.
///
/// Pure: the input slice is never mutated and equal sort keys preserve their
/// relative fetch order.
pub fn apply(movements: &[Movement], filter: &RegisterFilter) -> Vec<Movement> {
    let mut rows: Vec<Movement> = movements
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect();

    // Vec::sort_by is stable; ties keep fetch order in both directions, so
    // descending flips the key comparison rather than reversing the result.
    let key_cmp = |a: &Movement, b: &Movement| match filter.sort {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
        SortField::Amount => a.ledger_amount().cmp(&b.ledger_amount()),
    };
    match filter.direction {
        SortDirection::Ascending => rows.sort_by(key_cmp),
        SortDirection::Descending => rows.sort_by(|a, b| key_cmp(b, a)),
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentMethod};
    use chrono::NaiveDate;

    fn movement(description: &str, cents: i64, kind: MovementKind, day: u32) -> Movement {
        Movement::new(
            description,
            Money::from_cents(cents),
            kind,
            PaymentMethod::Cash,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
    }

    fn sample() -> Vec<Movement> {
        vec![
            movement("Sale deposit", 100_000, MovementKind::Income, 10),
            movement("Workshop parts", 30_000, MovementKind::Expense, 10),
            movement("Detailing", 20_000, MovementKind::Income, 11),
        ]
    }

    #[test]
    fn test_no_filter_passes_everything() {
        let rows = apply(&sample(), &RegisterFilter::new());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_kind_filter() {
        let filter = RegisterFilter::new().kind(KindFilter::Expense);
        let rows = apply(&sample(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Workshop parts");
    }

    #[test]
    fn test_text_filter_on_description_case_insensitive() {
        let filter = RegisterFilter::new().text("SALE");
        let rows = apply(&sample(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Sale deposit");
    }

    #[test]
    fn test_text_filter_on_amount() {
        // "300.00" is the display form of 30_000 cents
        let filter = RegisterFilter::new().text("300.00");
        let rows = apply(&sample(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Workshop parts");
    }

    #[test]
    fn test_filters_are_conjunctive() {
        // Text matches an income row but the kind filter excludes it
        let filter = RegisterFilter::new().text("Sale").kind(KindFilter::Expense);
        let rows = apply(&sample(), &filter);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_filter_composes_in_either_order() {
        let movements = sample();
        let both = RegisterFilter::new().text("deposit").kind(KindFilter::Income);
        let text_only = RegisterFilter::new().text("deposit");
        let kind_only = RegisterFilter::new().kind(KindFilter::Income);

        let combined = apply(&movements, &both);
        let sequential = apply(&apply(&movements, &text_only), &kind_only);

        let ids =
            |rows: &[Movement]| rows.iter().map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(ids(&combined), ids(&sequential));
    }

    #[test]
    fn test_sort_by_amount() {
        let filter = RegisterFilter::new().sort(SortField::Amount, SortDirection::Ascending);
        let rows = apply(&sample(), &filter);
        let cents: Vec<i64> = rows.iter().map(|m| m.amount.cents()).collect();
        assert_eq!(cents, vec![20_000, 30_000, 100_000]);

        let filter = RegisterFilter::new().sort(SortField::Amount, SortDirection::Descending);
        let rows = apply(&sample(), &filter);
        let cents: Vec<i64> = rows.iter().map(|m| m.amount.cents()).collect();
        assert_eq!(cents, vec![100_000, 30_000, 20_000]);
    }

    #[test]
    fn test_stable_sort_preserves_fetch_order_on_ties() {
        let movements = vec![
            movement("first", 5_000, MovementKind::Income, 10),
            movement("second", 5_000, MovementKind::Income, 10),
            movement("third", 5_000, MovementKind::Income, 10),
        ];

        let filter = RegisterFilter::new().sort(SortField::Amount, SortDirection::Ascending);
        let once = apply(&movements, &filter);
        let twice = apply(&once, &filter);

        let names =
            |rows: &[Movement]| rows.iter().map(|m| m.description.clone()).collect::<Vec<_>>();
        assert_eq!(names(&once), vec!["first", "second", "third"]);
        assert_eq!(names(&once), names(&twice));

        // Descending flips keys, not ties: fetch order still wins
        let filter = RegisterFilter::new().sort(SortField::Amount, SortDirection::Descending);
        let descending = apply(&movements, &filter);
        assert_eq!(names(&descending), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_by_date_descending() {
        let filter = RegisterFilter::new().sort(SortField::Date, SortDirection::Descending);
        let rows = apply(&sample(), &filter);
        assert_eq!(rows[0].description, "Detailing");
    }
}
