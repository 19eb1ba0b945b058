// Module declarations
pub mod identity;
pub mod persistence;

// Re-export all implementations
pub use identity::UuidIdGenerator;
pub use persistence::InMemoryDocumentRepository;

use application::DocumentStore;
use std::sync::Arc;

/// Builds a document store over a fresh in-memory repository with UUID ids.
pub fn in_memory_document_store() -> DocumentStore {
    DocumentStore::new(
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(UuidIdGenerator::new()),
    )
}
