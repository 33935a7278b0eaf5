//! Register derivation core
//!
//! Pure functions that turn fetched movement windows into everything the
//! views display: filtered/sorted rows, totals, per-method breakdowns, day
//! buckets, and the running balance. Nothing in this module touches the
//! store or catches errors; it only operates on already-fetched data.

pub mod aggregate;
pub mod balance;
pub mod filter;
pub mod monthly;

pub use aggregate::{MethodBreakdown, RegisterView, Totals};
pub use balance::{running_balance, BalanceState};
pub use filter::{KindFilter, RegisterFilter, SortDirection, SortField};
pub use monthly::{month_bounds, DayBucket, MonthlySummary};
