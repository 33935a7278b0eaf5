//! Movement service
//!
//! Business logic between the views and the document store: input validation,
//! document encoding/decoding, and window queries. Normalization of stored
//! data (payment methods, non-numeric amounts) happens here, once, so the
//! register core only ever sees well-formed movements.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use crate::error::{CajaError, CajaResult};
use crate::models::{CheckDetail, Money, Movement, MovementId, MovementKind, PaymentMethod};
use crate::register::month_bounds;
use crate::store::{Document, DocumentStore, Fields, Filter, OrderBy};

/// Collection holding the register's movements
pub const MOVEMENTS_COLLECTION: &str = "movements";

/// User-supplied fields for creating or editing a movement
#[derive(Debug, Clone)]
pub struct MovementInput {
    pub description: String,
    pub amount: Money,
    pub kind: MovementKind,
    pub payment_method: PaymentMethod,
    pub check_detail: Option<CheckDetail>,
    pub date: NaiveDate,
}

impl MovementInput {
    /// Validate before anything reaches the store.
    ///
    /// Violations block the operation with a field-level message; they never
    /// turn into a store call.
    pub fn validate(&self) -> CajaResult<()> {
        if self.description.trim().is_empty() {
            return Err(CajaError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(CajaError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the check-detail policy: detail only travels with check
    /// movements; switching the method away from check drops it.
    fn effective_check_detail(&self) -> Option<CheckDetail> {
        if self.payment_method == PaymentMethod::Check {
            self.check_detail.clone().filter(|d| !d.is_empty())
        } else {
            None
        }
    }
}

/// Service for movement management
pub struct MovementService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MovementService<'a> {
    /// Create a new movement service
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Create a movement from validated input.
    ///
    /// The returned movement carries the store-assigned id. Local state is
    /// only ever updated from a successful return, so there is nothing to
    /// roll back when the write fails.
    pub fn create(&self, input: MovementInput) -> CajaResult<Movement> {
        input.validate()?;

        let now = Utc::now();
        let mut movement = Movement::new(
            input.description.trim().to_string(),
            input.amount,
            input.kind,
            input.payment_method,
            input.date,
        );
        movement.check_detail = input.effective_check_detail();
        movement.created_at = now;
        movement.updated_at = now;

        let id = self
            .store
            .create(MOVEMENTS_COLLECTION, encode_movement(&movement))?;
        movement.id = MovementId::from_uuid(id);

        Ok(movement)
    }

    /// Update a movement in place.
    ///
    /// Sends a partial document: user-editable fields plus the updated-at
    /// timestamp. `createdAt` is never rewritten.
    pub fn update(&self, id: MovementId, input: MovementInput) -> CajaResult<()> {
        input.validate()?;

        let mut fields = encode_input(&input);
        fields.insert("updatedAt".to_string(), json!(Utc::now().to_rfc3339()));

        self.store
            .update(MOVEMENTS_COLLECTION, *id.as_uuid(), fields)?;
        Ok(())
    }

    /// Delete a movement. Immediate and irreversible.
    pub fn delete(&self, id: MovementId) -> CajaResult<()> {
        self.store.delete(MOVEMENTS_COLLECTION, *id.as_uuid())?;
        Ok(())
    }

    /// Movements of one business day
    pub fn fetch_day(&self, date: NaiveDate) -> CajaResult<Vec<Movement>> {
        self.fetch(&[
            Filter::DateAtLeast {
                field: "date",
                value: date,
            },
            Filter::DateAtMost {
                field: "date",
                value: date,
            },
        ])
    }

    /// Movements of the calendar month containing `date`
    pub fn fetch_month(&self, date: NaiveDate) -> CajaResult<Vec<Movement>> {
        let (first, last) = month_bounds(date);
        self.fetch(&[
            Filter::DateAtLeast {
                field: "date",
                value: first,
            },
            Filter::DateAtMost {
                field: "date",
                value: last,
            },
        ])
    }

    /// The entire history
    pub fn fetch_all(&self) -> CajaResult<Vec<Movement>> {
        self.fetch(&[])
    }

    /// The history up to and including `date` (running-balance window)
    pub fn fetch_up_to(&self, date: NaiveDate) -> CajaResult<Vec<Movement>> {
        self.fetch(&[Filter::DateAtMost {
            field: "date",
            value: date,
        }])
    }

    fn fetch(&self, filters: &[Filter]) -> CajaResult<Vec<Movement>> {
        let docs = self
            .store
            .list(MOVEMENTS_COLLECTION, filters, Some(&OrderBy::asc("date")))?;
        Ok(docs.iter().map(decode_movement).collect())
    }
}

/// Encode a full movement into its document fields
pub fn encode_movement(movement: &Movement) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        "description".to_string(),
        json!(movement.description.clone()),
    );
    fields.insert("amount".to_string(), amount_to_value(movement.amount));
    fields.insert("type".to_string(), json!(movement.kind.label()));
    fields.insert(
        "paymentMethod".to_string(),
        json!(movement.payment_method.label()),
    );
    fields.insert("date".to_string(), json!(movement.date.to_string()));
    fields.insert(
        "createdAt".to_string(),
        json!(movement.created_at.to_rfc3339()),
    );
    fields.insert(
        "updatedAt".to_string(),
        json!(movement.updated_at.to_rfc3339()),
    );
    insert_check_fields(&mut fields, movement.check_detail.as_ref());
    fields
}

/// Encode user-editable fields only (the update patch)
fn encode_input(input: &MovementInput) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        "description".to_string(),
        json!(input.description.trim().to_string()),
    );
    fields.insert("amount".to_string(), amount_to_value(input.amount));
    fields.insert("type".to_string(), json!(input.kind.label()));
    fields.insert(
        "paymentMethod".to_string(),
        json!(input.payment_method.label()),
    );
    fields.insert("date".to_string(), json!(input.date.to_string()));
    insert_check_fields(&mut fields, input.effective_check_detail().as_ref());
    fields
}

fn insert_check_fields(fields: &mut Fields, detail: Option<&CheckDetail>) {
    match detail {
        Some(detail) => {
            fields.insert("checkNumber".to_string(), json!(detail.number.clone()));
            fields.insert("checkIssuer".to_string(), json!(detail.issuer.clone()));
            fields.insert(
                "checkIssueDate".to_string(),
                detail
                    .issue_date
                    .map(|d| json!(d.to_string()))
                    .unwrap_or(Value::Null),
            );
            fields.insert(
                "checkDueDate".to_string(),
                detail
                    .due_date
                    .map(|d| json!(d.to_string()))
                    .unwrap_or(Value::Null),
            );
        }
        None => {
            // Explicit nulls so an update patch clears stale check fields
            fields.insert("checkNumber".to_string(), Value::Null);
            fields.insert("checkIssuer".to_string(), Value::Null);
            fields.insert("checkIssueDate".to_string(), Value::Null);
            fields.insert("checkDueDate".to_string(), Value::Null);
        }
    }
}

/// Wire amounts are JSON numbers in currency units
fn amount_to_value(amount: Money) -> Value {
    serde_json::Number::from_f64(amount.cents() as f64 / 100.0)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Decode a stored document into a movement.
///
/// Lenient by design: this is the single place where stored data of any shape
/// becomes a well-formed movement. Non-numeric amounts coerce to zero with
/// the raw text preserved; unrecognized payment methods fold into cash with
/// the raw label preserved.
pub fn decode_movement(doc: &Document) -> Movement {
    let fields = &doc.fields;

    let description = str_field(fields, "description").unwrap_or_default();

    let (amount, raw_amount) = decode_amount(fields.get("amount"));

    let kind = str_field(fields, "type")
        .map(|s| MovementKind::normalize(&s))
        .unwrap_or_default();

    let (payment_method, raw_method) = match str_field(fields, "paymentMethod") {
        None => (PaymentMethod::Cash, None),
        Some(raw) => match PaymentMethod::from_label(&raw) {
            Some(method) => (method, None),
            None => (PaymentMethod::Cash, Some(raw)),
        },
    };

    let created_at = timestamp_field(fields, "createdAt");
    let updated_at = timestamp_field(fields, "updatedAt");
    let date = decode_date(fields.get("date"), created_at);

    let check_detail = decode_check_detail(fields, payment_method);

    Movement {
        id: MovementId::from_uuid(doc.id),
        description,
        amount,
        raw_amount,
        kind,
        payment_method,
        raw_method,
        check_detail,
        date,
        created_at,
        updated_at,
    }
}

fn str_field(fields: &Fields, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn decode_amount(value: Option<&Value>) -> (Money, Option<String>) {
    match value {
        Some(Value::Number(n)) => {
            let units = n.as_f64().unwrap_or(0.0);
            (Money::from_cents((units * 100.0).round() as i64), None)
        }
        Some(Value::String(s)) => match Money::parse_lenient(s) {
            Some(amount) => (amount, None),
            None => (Money::zero(), Some(s.clone())),
        },
        Some(other) => (Money::zero(), Some(other.to_string())),
        // Missing amounts coerce to zero and display as blank
        None => (Money::zero(), Some(String::new())),
    }
}

fn decode_date(value: Option<&Value>, fallback: DateTime<Utc>) -> NaiveDate {
    let raw = match value.and_then(Value::as_str) {
        Some(raw) => raw,
        None => return fallback.date_naive(),
    };
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date;
    }
    // Legacy documents carried a full timestamp pinned at local noon
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive();
    }
    fallback.date_naive()
}

fn timestamp_field(fields: &Fields, name: &str) -> DateTime<Utc> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn decode_check_detail(fields: &Fields, method: PaymentMethod) -> Option<CheckDetail> {
    if method != PaymentMethod::Check {
        return None;
    }
    let detail = CheckDetail {
        number: str_field(fields, "checkNumber").unwrap_or_default(),
        issuer: str_field(fields, "checkIssuer").unwrap_or_default(),
        issue_date: str_field(fields, "checkIssueDate").and_then(|s| s.parse().ok()),
        due_date: str_field(fields, "checkDueDate").and_then(|s| s.parse().ok()),
    };
    (!detail.is_empty()).then_some(detail)
}
