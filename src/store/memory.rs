//! In-memory document store
//!
//! Backs tests and offline runs. Supports injecting a failure into the next
//! operation so controller error paths can be exercised deterministically.

use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};

use uuid::Uuid;

use super::{sort_documents, Document, DocumentStore, Fields, Filter, OrderBy, StoreError,
            StoreResult};

type Collection = BTreeMap<Uuid, Fields>;

/// Document store holding everything in memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
    /// Insertion sequence per document, so unordered listings are stable
    insertion_order: RwLock<BTreeMap<Uuid, u64>>,
    next_seq: Mutex<u64>,
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next operation fail with the given error
    pub fn fail_next(&self, err: StoreError) {
        *self.fail_next.lock().expect("poisoned lock") = Some(err);
    }

    fn take_injected_failure(&self) -> StoreResult<()> {
        match self.fail_next.lock().expect("poisoned lock").take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_seq(&self) -> u64 {
        let mut seq = self.next_seq.lock().expect("poisoned lock");
        *seq += 1;
        *seq
    }
}

impl DocumentStore for MemoryStore {
    fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Document>> {
        self.take_injected_failure()?;

        let collections = self.collections.read().expect("poisoned lock");
        let insertion = self.insertion_order.read().expect("poisoned lock");

        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|col| {
                col.iter()
                    .filter(|(_, fields)| filters.iter().all(|f| f.matches(fields)))
                    .map(|(id, fields)| Document {
                        id: *id,
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Base order = insertion order; an explicit OrderBy re-sorts stably
        docs.sort_by_key(|d| insertion.get(&d.id).copied().unwrap_or(u64::MAX));
        if let Some(order) = order {
            sort_documents(&mut docs, order);
        }

        Ok(docs)
    }

    fn create(&self, collection: &str, fields: Fields) -> StoreResult<Uuid> {
        self.take_injected_failure()?;

        let id = Uuid::new_v4();
        let seq = self.next_seq();

        let mut collections = self.collections.write().expect("poisoned lock");
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, fields);
        self.insertion_order
            .write()
            .expect("poisoned lock")
            .insert(id, seq);

        Ok(id)
    }

    fn update(&self, collection: &str, id: Uuid, fields: Fields) -> StoreResult<()> {
        self.take_injected_failure()?;

        let mut collections = self.collections.write().expect("poisoned lock");
        let col = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound(id))?;
        let doc = col.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        for (key, value) in fields {
            doc.insert(key, value);
        }

        Ok(())
    }

    fn delete(&self, collection: &str, id: Uuid) -> StoreResult<()> {
        self.take_injected_failure()?;

        let mut collections = self.collections.write().expect("poisoned lock");
        let col = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound(id))?;
        if col.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.insertion_order
            .write()
            .expect("poisoned lock")
            .remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_fields(description: &str, date: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("description".to_string(), json!(description));
        fields.insert("date".to_string(), json!(date));
        fields
    }

    #[test]
    fn test_create_and_list() {
        let store = MemoryStore::new();
        let id = store
            .create("movements", doc_fields("first", "2025-03-01"))
            .unwrap();

        let docs = store.list("movements", &[], None).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].fields["description"], json!("first"));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create("movements", doc_fields(&format!("m{}", i), "2025-03-01"))
                .unwrap();
        }

        let docs = store.list("movements", &[], None).unwrap();
        let names: Vec<String> = docs
            .iter()
            .map(|d| d.fields["description"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["m0", "m1", "m2", "m3", "m4"]);
    }

    #[test]
    fn test_filters_and_order() {
        let store = MemoryStore::new();
        store
            .create("movements", doc_fields("late", "2025-03-20"))
            .unwrap();
        store
            .create("movements", doc_fields("early", "2025-03-05"))
            .unwrap();
        store
            .create("movements", doc_fields("outside", "2025-04-01"))
            .unwrap();

        let day = |m: u32, d: u32| chrono::NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let filters = [
            Filter::DateAtLeast {
                field: "date",
                value: day(3, 1),
            },
            Filter::DateAtMost {
                field: "date",
                value: day(3, 31),
            },
        ];

        let docs = store
            .list("movements", &filters, Some(&OrderBy::asc("date")))
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].fields["description"], json!("early"));
        assert_eq!(docs[1].fields["description"], json!("late"));
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .create("movements", doc_fields("original", "2025-03-01"))
            .unwrap();

        let mut patch = Fields::new();
        patch.insert("description".to_string(), json!("renamed"));
        store.update("movements", id, patch).unwrap();

        let docs = store.list("movements", &[], None).unwrap();
        assert_eq!(docs[0].fields["description"], json!("renamed"));
        // Untouched fields survive a partial update
        assert_eq!(docs[0].fields["date"], json!("2025-03-01"));
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let id = store
            .create("movements", doc_fields("gone", "2025-03-01"))
            .unwrap();

        store.delete("movements", id).unwrap();
        assert!(store.list("movements", &[], None).unwrap().is_empty());

        let err = store.delete("movements", id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_injected_failure_fires_once() {
        let store = MemoryStore::new();
        store.fail_next(StoreError::Unavailable("injected".into()));

        let err = store.list("movements", &[], None).unwrap_err();
        assert!(err.is_transient());

        // Next call succeeds again
        assert!(store.list("movements", &[], None).is_ok());
    }
}
