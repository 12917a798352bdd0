use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use crate::kv::KvBackend;
use crate::model::{DocId, DocumentRecord};

pub const DEFAULT_NAMESPACE: &str = "doc:";

/// Document store accessor.
///
/// Owns key namespacing and JSON (de)serialization over a [`KvBackend`],
/// nothing else. Callers always pull the complete document set and filter in
/// memory; the data volume is assumed to be a personal note collection.
pub struct DocumentStore {
    backend: Arc<dyn KvBackend>,
    namespace: String,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(backend: Arc<dyn KvBackend>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Mint an id for a document about to be saved for the first time.
    pub fn fresh_id(&self) -> DocId {
        DocId(format!("{}{}", self.namespace, crate::utils::generate_id()))
    }

    /// Enumerate every persisted document.
    ///
    /// Records that fail to deserialize are skipped with a warning; a single
    /// corrupt entry never aborts the listing.
    pub fn list_all(&self) -> HashMap<DocId, DocumentRecord> {
        let mut docs = HashMap::new();

        for key in self.backend.keys() {
            if !key.starts_with(&self.namespace) {
                continue;
            }
            let Ok(raw) = self.backend.read(&key) else {
                continue;
            };
            match serde_json::from_str::<DocumentRecord>(&raw) {
                Ok(record) => {
                    docs.insert(DocId(key), record);
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping undecodable document record");
                }
            }
        }

        docs
    }

    pub fn get(&self, id: &DocId) -> Option<DocumentRecord> {
        let raw = self.backend.read(&id.0).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Upsert: overwrites the whole record.
    pub fn put(&self, id: &DocId, record: &DocumentRecord) -> io::Result<()> {
        let raw = serde_json::to_string(record)?;
        self.backend.write(&id.0, &raw)
    }

    /// Remove a record. Deleting an absent id is not an error.
    pub fn delete(&self, id: &DocId) -> io::Result<()> {
        self.backend.remove(&id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryBackend;

    fn store() -> (Arc<MemoryBackend>, DocumentStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = DocumentStore::new(backend.clone());
        (backend, store)
    }

    fn record(filename: &str, content: &str) -> DocumentRecord {
        DocumentRecord {
            filename: filename.to_string(),
            content: content.to_string(),
            last_modified: 1,
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let (_, store) = store();
        let id = store.fresh_id();
        store.put(&id, &record("a.md", "hello")).unwrap();

        assert_eq!(store.get(&id), Some(record("a.md", "hello")));
    }

    #[test]
    fn fresh_ids_are_namespaced_and_unique() {
        let (_, store) = store();
        let a = store.fresh_id();
        let b = store.fresh_id();

        assert!(a.0.starts_with(DEFAULT_NAMESPACE));
        assert_ne!(a, b);
    }

    #[test]
    fn get_absent_is_none() {
        let (_, store) = store();
        assert_eq!(store.get(&DocId("doc:missing".to_string())), None);
    }

    #[test]
    fn delete_absent_is_ok() {
        let (_, store) = store();
        store.delete(&DocId("doc:missing".to_string())).unwrap();
    }

    #[test]
    fn list_all_skips_undecodable_records() {
        let (backend, store) = store();
        let id = store.fresh_id();
        store.put(&id, &record("a.md", "hello")).unwrap();
        backend.write("doc:corrupt", "not json at all").unwrap();

        let docs = store.list_all();
        assert_eq!(docs.len(), 1);
        assert!(docs.contains_key(&id));
    }

    #[test]
    fn list_all_ignores_foreign_namespaces() {
        let (backend, store) = store();
        backend
            .write("githubToken", "should never be listed")
            .unwrap();
        let id = store.fresh_id();
        store.put(&id, &record("a.md", "")).unwrap();

        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn record_uses_camel_case_wire_shape() {
        let raw = serde_json::to_string(&record("a.md", "x")).unwrap();
        assert!(raw.contains("\"lastModified\""));

        let parsed: DocumentRecord =
            serde_json::from_str(r#"{"filename":"b.md","content":"y","lastModified":42}"#).unwrap();
        assert_eq!(parsed.last_modified, 42);
    }
}
