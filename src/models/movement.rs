//! Movement model
//!
//! A movement is one income or expense entry in the daily cash register.
//! Amounts are always stored positive; direction is carried by the kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MovementId;
use super::money::Money;

/// Direction of a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    #[default]
    Income,
    Expense,
}

impl MovementKind {
    /// Canonical wire label as stored in documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Normalize a stored label. Unrecognized values default to expense so a
    /// corrupt document can never inflate the balance.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Self::Income,
            _ => Self::Expense,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Payment method of a movement
///
/// The register recognizes exactly these five methods. Stored documents may
/// carry anything; normalization happens once, at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Check,
    Other,
}

impl PaymentMethod {
    /// All recognized methods, in breakdown display order
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
        PaymentMethod::Check,
        PaymentMethod::Other,
    ];

    /// Canonical wire label as stored in documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Card => "card",
            Self::Check => "check",
            Self::Other => "other",
        }
    }

    /// Parse a stored label into a recognized method, if it is one
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            "card" => Some(Self::Card),
            "check" => Some(Self::Check),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Normalize a stored label: unrecognized or absent values fold into
    /// `Cash` for aggregation purposes.
    pub fn normalize(raw: &str) -> Self {
        Self::from_label(raw).unwrap_or(Self::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Transfer => write!(f, "Transfer"),
            Self::Card => write!(f, "Card"),
            Self::Check => write!(f, "Check"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Check-specific metadata, present only on check movements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckDetail {
    /// Check number as printed
    #[serde(default)]
    pub number: String,

    /// Issuing party
    #[serde(default)]
    pub issuer: String,

    /// Date the check was issued
    pub issue_date: Option<NaiveDate>,

    /// Date the check becomes payable
    pub due_date: Option<NaiveDate>,
}

impl CheckDetail {
    /// A detail with every field empty carries no information
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
            && self.issuer.is_empty()
            && self.issue_date.is_none()
            && self.due_date.is_none()
    }
}

/// One income or expense entry in the cash register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// Unique identifier, assigned by the store on creation
    pub id: MovementId,

    /// Non-empty text label
    pub description: String,

    /// Positive amount; direction comes from `kind`, never from sign
    pub amount: Money,

    /// Verbatim stored amount text when the document carried a non-numeric
    /// value. Such movements contribute zero to every total but the raw text
    /// is shown in movement lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_amount: Option<String>,

    /// Income or expense
    pub kind: MovementKind,

    /// Normalized payment method
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// Verbatim stored method label when normalization changed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_method: Option<String>,

    /// Check metadata; only valid when `payment_method == Check`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_detail: Option<CheckDetail>,

    /// Business date the movement belongs to (the daily grouping key)
    pub date: NaiveDate,

    /// When the movement was created
    pub created_at: DateTime<Utc>,

    /// When the movement was last modified
    pub updated_at: DateTime<Utc>,
}

impl Movement {
    /// Create a new movement
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        kind: MovementKind,
        payment_method: PaymentMethod,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MovementId::new(),
            description: description.into(),
            amount,
            raw_amount: None,
            kind,
            payment_method,
            raw_method: None,
            check_detail: None,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount that enters ledger math: zero for movements whose stored amount
    /// was not a number, the positive amount otherwise.
    pub fn ledger_amount(&self) -> Money {
        if self.raw_amount.is_some() {
            Money::zero()
        } else {
            self.amount
        }
    }

    /// Ledger amount with the direction applied (income positive,
    /// expense negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            MovementKind::Income => self.ledger_amount(),
            MovementKind::Expense => -self.ledger_amount(),
        }
    }

    /// Method label for raw movement lists: the stored text verbatim if
    /// normalization changed it, the canonical label otherwise.
    pub fn method_label(&self) -> &str {
        self.raw_method
            .as_deref()
            .unwrap_or_else(|| self.payment_method.label())
    }

    /// Amount text for raw movement lists
    pub fn amount_display(&self) -> String {
        match &self.raw_amount {
            Some(raw) => raw.clone(),
            None => self.amount.to_decimal_string(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == MovementKind::Expense
    }

    /// Touch the updated-at timestamp after an in-place edit
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the movement before it is sent to the store
    pub fn validate(&self) -> Result<(), MovementValidationError> {
        if self.description.trim().is_empty() {
            return Err(MovementValidationError::EmptyDescription);
        }

        // Ingested ledger-neutral movements bypass the amount check; they are
        // never writable as-is.
        if self.raw_amount.is_none() && !self.amount.is_positive() {
            return Err(MovementValidationError::NonPositiveAmount(self.amount));
        }

        if self.check_detail.is_some() && self.payment_method != PaymentMethod::Check {
            return Err(MovementValidationError::CheckDetailWithoutCheck);
        }

        Ok(())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount_display(),
            self.kind,
        )
    }
}

/// Validation errors for movements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    CheckDetailWithoutCheck,
}

impl fmt::Display for MovementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::CheckDetailWithoutCheck => {
                write!(f, "Check details are only valid for check movements")
            }
        }
    }
}

impl std::error::Error for MovementValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_new_movement() {
        let mov = Movement::new(
            "Oil change",
            Money::from_cents(4500),
            MovementKind::Expense,
            PaymentMethod::Cash,
            test_date(),
        );

        assert_eq!(mov.description, "Oil change");
        assert_eq!(mov.amount.cents(), 4500);
        assert!(mov.is_expense());
        assert!(mov.validate().is_ok());
    }

    #[test]
    fn test_signed_amount() {
        let income = Movement::new(
            "Deposit",
            Money::from_cents(1000),
            MovementKind::Income,
            PaymentMethod::Cash,
            test_date(),
        );
        assert_eq!(income.signed_amount().cents(), 1000);

        let expense = Movement::new(
            "Parts",
            Money::from_cents(1000),
            MovementKind::Expense,
            PaymentMethod::Cash,
            test_date(),
        );
        assert_eq!(expense.signed_amount().cents(), -1000);
    }

    #[test]
    fn test_raw_amount_is_ledger_neutral() {
        let mut mov = Movement::new(
            "Corrupt entry",
            Money::zero(),
            MovementKind::Income,
            PaymentMethod::Cash,
            test_date(),
        );
        mov.raw_amount = Some("not-a-number".to_string());

        assert_eq!(mov.ledger_amount(), Money::zero());
        assert_eq!(mov.signed_amount(), Money::zero());
        assert_eq!(mov.amount_display(), "not-a-number");
    }

    #[test]
    fn test_method_normalization() {
        assert_eq!(PaymentMethod::normalize("transfer"), PaymentMethod::Transfer);
        assert_eq!(PaymentMethod::normalize("CHECK"), PaymentMethod::Check);
        assert_eq!(PaymentMethod::normalize("bitcoin"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::normalize(""), PaymentMethod::Cash);
    }

    #[test]
    fn test_method_label_prefers_raw() {
        let mut mov = Movement::new(
            "Odd method",
            Money::from_cents(100),
            MovementKind::Income,
            PaymentMethod::Cash,
            test_date(),
        );
        assert_eq!(mov.method_label(), "cash");

        mov.raw_method = Some("bitcoin".to_string());
        assert_eq!(mov.method_label(), "bitcoin");
    }

    #[test]
    fn test_validate_empty_description() {
        let mov = Movement::new(
            "   ",
            Money::from_cents(100),
            MovementKind::Income,
            PaymentMethod::Cash,
            test_date(),
        );
        assert_eq!(
            mov.validate(),
            Err(MovementValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_validate_non_positive_amount() {
        let mov = Movement::new(
            "Free",
            Money::zero(),
            MovementKind::Income,
            PaymentMethod::Cash,
            test_date(),
        );
        assert!(matches!(
            mov.validate(),
            Err(MovementValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_validate_check_detail_requires_check() {
        let mut mov = Movement::new(
            "Paid by card",
            Money::from_cents(100),
            MovementKind::Expense,
            PaymentMethod::Card,
            test_date(),
        );
        mov.check_detail = Some(CheckDetail {
            number: "0001".to_string(),
            ..CheckDetail::default()
        });

        assert_eq!(
            mov.validate(),
            Err(MovementValidationError::CheckDetailWithoutCheck)
        );

        mov.payment_method = PaymentMethod::Check;
        assert!(mov.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut mov = Movement::new(
            "Sale deposit",
            Money::from_cents(250000),
            MovementKind::Income,
            PaymentMethod::Check,
            test_date(),
        );
        mov.check_detail = Some(CheckDetail {
            number: "4471".to_string(),
            issuer: "Banco Norte".to_string(),
            issue_date: Some(test_date()),
            due_date: NaiveDate::from_ymd_opt(2025, 4, 10),
        });

        let json = serde_json::to_string(&mov).unwrap();
        let deserialized: Movement = serde_json::from_str(&json).unwrap();
        assert_eq!(mov.id, deserialized.id);
        assert_eq!(mov.amount, deserialized.amount);
        assert_eq!(mov.check_detail, deserialized.check_detail);
    }
}
