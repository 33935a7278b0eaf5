//! Document store abstraction
//!
//! The register treats persistence as an external collaborator: a generic
//! document store addressed by collection name, with list/create/update/delete
//! operations. The store owns the authoritative data set; everything held in
//! memory by the application is a read-through cache.
//!
//! Failures carry a transient/permanent distinction so the caller can decide
//! whether a retry makes sense.

pub mod file;
pub mod file_io;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CajaError;

/// Field map of a stored document
pub type Fields = serde_json::Map<String, Value>;

/// A document as returned by the store: opaque id plus its fields
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub fields: Fields,
}

/// Predicates the store can evaluate server-side: equality on a discrete
/// field, range bounds on a date field (dates are stored as ISO-8601 strings,
/// so lexicographic comparison is date comparison).
#[derive(Debug, Clone)]
pub enum Filter {
    Eq { field: &'static str, value: Value },
    DateAtLeast { field: &'static str, value: NaiveDate },
    DateAtMost { field: &'static str, value: NaiveDate },
}

impl Filter {
    /// Evaluate this predicate against a document's fields
    pub fn matches(&self, fields: &Fields) -> bool {
        match self {
            Self::Eq { field, value } => fields.get(*field) == Some(value),
            Self::DateAtLeast { field, value } => match fields.get(*field).and_then(Value::as_str) {
                Some(s) => s >= value.to_string().as_str(),
                None => false,
            },
            Self::DateAtMost { field, value } => match fields.get(*field).and_then(Value::as_str) {
                Some(s) => s <= value.to_string().as_str(),
                None => false,
            },
        }
    }
}

/// Sort direction for `OrderBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Server-side ordering on one field
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: &'static str,
    pub order: Order,
}

impl OrderBy {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            order: Order::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            order: Order::Descending,
        }
    }
}

/// Errors raised by a document store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or the operation timed out; retrying
    /// the triggering action may succeed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation; retrying will not help.
    #[error("store rejected operation: {0}")]
    Rejected(String),

    /// No document with the given id exists in the collection.
    #[error("document not found: {0}")]
    NotFound(Uuid),
}

impl StoreError {
    /// Whether retrying the triggering action may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<StoreError> for CajaError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Unavailable(_) => CajaError::store_transient(err.to_string()),
            StoreError::Rejected(_) | StoreError::NotFound(_) => {
                CajaError::store_permanent(err.to_string())
            }
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The persistence collaborator consumed by the register.
///
/// Every operation is a fallible boundary driven by the single-threaded event
/// loop; implementations must not assume calls arrive in any particular order
/// across independent user actions.
pub trait DocumentStore {
    /// List documents matching all given filters, optionally ordered by one
    /// field. With no ordering the result order is deterministic per store.
    fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Document>>;

    /// Create a document; the store assigns and returns its id.
    fn create(&self, collection: &str, fields: Fields) -> StoreResult<Uuid>;

    /// Merge the given fields into an existing document.
    fn update(&self, collection: &str, id: Uuid, fields: Fields) -> StoreResult<()>;

    /// Remove a document. Deleting is immediate and irreversible.
    fn delete(&self, collection: &str, id: Uuid) -> StoreResult<()>;
}

/// Stable in-memory sort of documents by one field.
///
/// Shared by backends so that both apply identical ordering semantics.
pub(crate) fn sort_documents(docs: &mut [Document], order: &OrderBy) {
    let key = |doc: &Document| -> String {
        doc.fields
            .get(order.field)
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    };
    match order.order {
        Order::Ascending => docs.sort_by_key(key),
        Order::Descending => {
            docs.sort_by(|a, b| key(b).cmp(&key(a)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_eq_filter() {
        let f = fields(&[("kind", json!("income"))]);
        assert!(Filter::Eq {
            field: "kind",
            value: json!("income")
        }
        .matches(&f));
        assert!(!Filter::Eq {
            field: "kind",
            value: json!("expense")
        }
        .matches(&f));
    }

    #[test]
    fn test_date_range_filters() {
        let f = fields(&[("date", json!("2025-03-10"))]);
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();

        assert!(Filter::DateAtLeast {
            field: "date",
            value: day(10)
        }
        .matches(&f));
        assert!(Filter::DateAtLeast {
            field: "date",
            value: day(1)
        }
        .matches(&f));
        assert!(!Filter::DateAtLeast {
            field: "date",
            value: day(11)
        }
        .matches(&f));
        assert!(Filter::DateAtMost {
            field: "date",
            value: day(10)
        }
        .matches(&f));
        assert!(!Filter::DateAtMost {
            field: "date",
            value: day(9)
        }
        .matches(&f));
    }

    #[test]
    fn test_missing_date_field_never_matches() {
        let f = fields(&[("kind", json!("income"))]);
        assert!(!Filter::DateAtLeast {
            field: "date",
            value: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        }
        .matches(&f));
    }

    #[test]
    fn test_sort_documents_stable() {
        let mut docs: Vec<Document> = ["b", "a", "b", "a"]
            .iter()
            .enumerate()
            .map(|(i, s)| Document {
                id: Uuid::new_v4(),
                fields: fields(&[("k", json!(s)), ("i", json!(i))]),
            })
            .collect();

        sort_documents(&mut docs, &OrderBy::asc("k"));

        let order: Vec<i64> = docs
            .iter()
            .map(|d| d.fields["i"].as_i64().unwrap())
            .collect();
        // Equal keys keep their original relative order
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_transient_classification() {
        assert!(StoreError::Unavailable("down".into()).is_transient());
        assert!(!StoreError::Rejected("bad".into()).is_transient());
        assert!(!StoreError::NotFound(Uuid::new_v4()).is_transient());
    }
}
