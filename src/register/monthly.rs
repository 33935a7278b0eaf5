//! Monthly grouping
//!
//! Partitions a month's movements into per-calendar-day buckets, each with its
//! own subtotals, and folds those into month-level totals. The month total is
//! derived from the day subtotals, not recomputed from a second pass, so the
//! two views cannot drift apart.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{Money, Movement};

use super::aggregate::Totals;

/// One calendar day's movements and subtotals
#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub movements: Vec<Movement>,
    pub totals: Totals,
}

impl DayBucket {
    /// Net subtotal for this day
    pub fn net(&self) -> Money {
        self.totals.net()
    }
}

/// A month of movements grouped by calendar day
#[derive(Debug, Clone, Default)]
pub struct MonthlySummary {
    /// Day buckets in ascending date order; days with no movements are absent
    pub days: Vec<DayBucket>,

    /// Month totals, folded from the day subtotals
    pub totals: Totals,
}

impl MonthlySummary {
    /// Group movements by their business date.
    ///
    /// The caller fetches one calendar month; grouping itself has no month
    /// boundary knowledge and simply buckets whatever it is given.
    pub fn build(movements: &[Movement]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<Movement>> = BTreeMap::new();
        for movement in movements {
            by_day
                .entry(movement.date)
                .or_default()
                .push(movement.clone());
        }

        let days: Vec<DayBucket> = by_day
            .into_iter()
            .map(|(date, movements)| {
                let totals = Totals::of(&movements);
                DayBucket {
                    date,
                    movements,
                    totals,
                }
            })
            .collect();

        // Fold day subtotals into the month totals
        let mut totals = Totals::default();
        for day in &days {
            totals.income += day.totals.income;
            totals.expense += day.totals.expense;
        }

        Self { days, totals }
    }

    /// Net total for the month
    pub fn net(&self) -> Money {
        self.totals.net()
    }

    /// Bucket for a specific day, if it has movements
    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// First and last day of the calendar month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).expect("day 1 always exists");
    let last = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("first of next month always exists")
    .pred_opt()
    .expect("previous day of the first always exists");
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovementKind, PaymentMethod};
    use crate::register::aggregate::RegisterView;
    use crate::register::filter::RegisterFilter;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn movement(cents: i64, kind: MovementKind, date: NaiveDate) -> Movement {
        Movement::new(
            "entry",
            Money::from_cents(cents),
            kind,
            PaymentMethod::Cash,
            date,
        )
    }

    fn march() -> Vec<Movement> {
        vec![
            movement(50_000, MovementKind::Income, day(1)),
            movement(20_000, MovementKind::Expense, day(15)),
            movement(10_000, MovementKind::Income, day(15)),
            movement(5_000, MovementKind::Expense, day(28)),
        ]
    }

    #[test]
    fn test_day_buckets() {
        let summary = MonthlySummary::build(&march());

        assert_eq!(summary.days.len(), 3);
        assert_eq!(summary.days[0].date, day(1));
        assert_eq!(summary.days[0].net().cents(), 50_000);
        assert_eq!(summary.days[1].date, day(15));
        assert_eq!(summary.days[1].net().cents(), -10_000);
        assert_eq!(summary.days[2].date, day(28));
        assert_eq!(summary.days[2].net().cents(), -5_000);
    }

    #[test]
    fn test_month_total_is_sum_of_day_totals() {
        let summary = MonthlySummary::build(&march());

        let day_sum: Money = summary.days.iter().map(|d| d.net()).sum();
        assert_eq!(summary.net(), day_sum);
        assert_eq!(summary.net().cents(), 35_000);
    }

    #[test]
    fn test_day_subtotals_match_aggregation_engine() {
        // Each bucket's subtotal must equal the aggregation engine's totals
        // computed over just that bucket's movements
        let summary = MonthlySummary::build(&march());

        for bucket in &summary.days {
            let view = RegisterView::compute(&bucket.movements, &RegisterFilter::new());
            assert_eq!(bucket.totals, view.totals);
            assert_eq!(bucket.net(), view.totals.net());
        }
    }

    #[test]
    fn test_two_day_scenario() {
        // Day 1 net +500, day 15 net -200, month total +300
        let movements = vec![
            movement(50_000, MovementKind::Income, day(1)),
            movement(20_000, MovementKind::Expense, day(15)),
        ];
        let summary = MonthlySummary::build(&movements);

        assert_eq!(summary.day(day(1)).unwrap().net().cents(), 50_000);
        assert_eq!(summary.day(day(15)).unwrap().net().cents(), -20_000);
        assert_eq!(summary.net().cents(), 30_000);
    }

    #[test]
    fn test_empty_month() {
        let summary = MonthlySummary::build(&[]);
        assert!(summary.days.is_empty());
        assert_eq!(summary.net(), Money::zero());
    }

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds(day(10));
        assert_eq!(first, day(1));
        assert_eq!(last, day(31));

        let december = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let (first, last) = month_bounds(december);
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        let february = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let (_, last) = month_bounds(february);
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
