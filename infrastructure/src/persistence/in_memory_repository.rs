// ./infrastructure/src/persistence/in_memory_repository.rs
use application::{ApplicationError, DocumentRepository};
use dashmap::DashMap;
use domain::{Document, DocumentId};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    store: Arc<DashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, document: &Document) -> Result<(), ApplicationError> {
        debug!(doc_id = %document.id().as_str(), "Saving document to in-memory store");
        self.store.insert(document.id().clone(), document.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id.as_str(), "Getting document from in-memory store");
        // Get returns a Ref guarding the shard, so clone the Document out
        let doc = self.store.get(id).map(|doc_ref| doc_ref.value().clone());
        Ok(doc)
    }

    #[instrument(skip(self))]
    fn list(&self) -> Result<Vec<Document>, ApplicationError> {
        debug!("Listing all documents from in-memory store");
        let documents = self
            .store
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Ok(documents)
    }

    fn len(&self) -> Result<usize, ApplicationError> {
        Ok(self.store.len())
    }

    fn contains(&self, id: &DocumentId) -> Result<bool, ApplicationError> {
        Ok(self.store.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Author;

    #[test]
    fn save_replaces_previous_value() {
        let repo = InMemoryDocumentRepository::new();
        let first = Document::new("first", "body", Author::new("1", "Tom")).with_id("1");
        let second = Document::new("second", "body", Author::new("1", "Tom")).with_id("1");

        repo.save(&first).unwrap();
        repo.save(&second).unwrap();

        assert_eq!(repo.len().unwrap(), 1);
        assert_eq!(repo.get(&DocumentId::from("1")).unwrap(), Some(second));
    }

    #[test]
    fn get_and_contains_on_missing_id() {
        let repo = InMemoryDocumentRepository::new();
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.get(&DocumentId::from("nope")).unwrap(), None);
        assert!(!repo.contains(&DocumentId::from("nope")).unwrap());
    }

    #[test]
    fn list_returns_copies() {
        let repo = InMemoryDocumentRepository::new();
        repo.save(&Document::new("a", "a", Author::new("1", "Tom")).with_id("a"))
            .unwrap();
        repo.save(&Document::new("b", "b", Author::new("2", "Jack")).with_id("b"))
            .unwrap();

        let mut listed = repo.list().unwrap();
        listed.sort_by(|x, y| x.id().as_str().cmp(y.id().as_str()));
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id().as_str(), "a");
        assert_eq!(listed[1].id().as_str(), "b");

        listed[0].title = Some("mutated".to_string());
        let stored = repo.get(&DocumentId::from("a")).unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some("a"));
    }

    #[test]
    fn clones_share_storage() {
        let repo = InMemoryDocumentRepository::new();
        let handle = repo.clone();
        handle
            .save(&Document::new("a", "a", Author::new("1", "Tom")).with_id("a"))
            .unwrap();
        assert!(repo.contains(&DocumentId::from("a")).unwrap());
    }
}
