//! JSON-file-backed document store
//!
//! One JSON file per collection under the data directory, loaded into an
//! in-memory cache on first access and written back atomically after every
//! mutation. Matches the rest of the application's single-process model.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::file_io::{read_json, write_json_atomic};
use super::{sort_documents, Document, DocumentStore, Fields, Filter, OrderBy, StoreError,
            StoreResult};

/// On-disk shape of one collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CollectionData {
    /// Documents in insertion order; the position is the stable base order
    /// for unordered listings.
    documents: Vec<StoredDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    id: Uuid,
    fields: Fields,
}

/// Document store persisting each collection to `<dir>/<collection>.json`
pub struct FileStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Load a collection into the cache if it isn't there yet
    fn ensure_loaded(&self, collection: &str) -> StoreResult<()> {
        {
            let cache = self.cache.read().expect("poisoned lock");
            if cache.contains_key(collection) {
                return Ok(());
            }
        }

        let data: CollectionData = read_json(self.collection_path(collection))?;
        let mut cache = self.cache.write().expect("poisoned lock");
        cache.entry(collection.to_string()).or_insert(data.documents);
        Ok(())
    }

    /// Write a collection's current cache state back to disk
    fn persist(&self, collection: &str, documents: &[StoredDocument]) -> StoreResult<()> {
        let data = CollectionData {
            documents: documents.to_vec(),
        };
        write_json_atomic(self.collection_path(collection), &data)
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for FileStore {
    fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Document>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().expect("poisoned lock");
        let mut docs: Vec<Document> = cache
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| filters.iter().all(|f| f.matches(&doc.fields)))
                    .map(|doc| Document {
                        id: doc.id,
                        fields: doc.fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            sort_documents(&mut docs, order);
        }

        Ok(docs)
    }

    fn create(&self, collection: &str, fields: Fields) -> StoreResult<Uuid> {
        self.ensure_loaded(collection)?;

        let id = Uuid::new_v4();
        let mut cache = self.cache.write().expect("poisoned lock");
        let documents = cache.entry(collection.to_string()).or_default();
        documents.push(StoredDocument { id, fields });
        self.persist(collection, documents)?;

        Ok(id)
    }

    fn update(&self, collection: &str, id: Uuid, fields: Fields) -> StoreResult<()> {
        self.ensure_loaded(collection)?;

        let mut cache = self.cache.write().expect("poisoned lock");
        let documents = cache
            .get_mut(collection)
            .ok_or(StoreError::NotFound(id))?;
        let doc = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;

        for (key, value) in fields {
            doc.fields.insert(key, value);
        }

        self.persist(collection, documents)
    }

    fn delete(&self, collection: &str, id: Uuid) -> StoreResult<()> {
        self.ensure_loaded(collection)?;

        let mut cache = self.cache.write().expect("poisoned lock");
        let documents = cache
            .get_mut(collection)
            .ok_or(StoreError::NotFound(id))?;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound(id));
        }

        self.persist(collection, documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc_fields(description: &str, date: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("description".to_string(), json!(description));
        fields.insert("date".to_string(), json!(date));
        fields
    }

    #[test]
    fn test_create_persists_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        let id = store
            .create("movements", doc_fields("persisted", "2025-03-01"))
            .unwrap();
        assert!(temp_dir.path().join("movements.json").exists());

        // A fresh store instance reads the same data back
        let reopened = FileStore::new(temp_dir.path());
        let docs = reopened.list("movements", &[], None).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
    }

    #[test]
    fn test_update_and_delete_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        let id = store
            .create("movements", doc_fields("original", "2025-03-01"))
            .unwrap();

        let mut patch = Fields::new();
        patch.insert("description".to_string(), json!("edited"));
        store.update("movements", id, patch).unwrap();

        let reopened = FileStore::new(temp_dir.path());
        let docs = reopened.list("movements", &[], None).unwrap();
        assert_eq!(docs[0].fields["description"], json!("edited"));

        store.delete("movements", id).unwrap();
        let reopened = FileStore::new(temp_dir.path());
        assert!(reopened.list("movements", &[], None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        store
            .create("movements", doc_fields("only", "2025-03-01"))
            .unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            store.update("movements", missing, Fields::new()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("movements", missing),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_with_filter_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store
            .create("movements", doc_fields("b", "2025-03-20"))
            .unwrap();
        store
            .create("movements", doc_fields("a", "2025-03-05"))
            .unwrap();

        let docs = store
            .list("movements", &[], Some(&OrderBy::asc("date")))
            .unwrap();
        assert_eq!(docs[0].fields["description"], json!("a"));
        assert_eq!(docs[1].fields["description"], json!("b"));
    }

}
