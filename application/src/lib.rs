use chrono::Utc;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument, warn};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing and retrieving documents by id.
pub trait DocumentRepository: Send + Sync {
    /// Stores a document under its id, replacing any previous value.
    fn save(&self, document: &Document) -> Result<(), ApplicationError>;
    /// Retrieves a document by its ID.
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns a copy of every stored document, in no particular order.
    fn list(&self) -> Result<Vec<Document>, ApplicationError>;
    /// Number of stored documents.
    fn len(&self) -> Result<usize, ApplicationError>;

    fn contains(&self, id: &DocumentId) -> Result<bool, ApplicationError> {
        Ok(self.get(id)?.is_some())
    }

    fn is_empty(&self) -> Result<bool, ApplicationError> {
        Ok(self.len()? == 0)
    }
}

/// Source of fresh document identifiers.
///
/// Implementations need not guarantee uniqueness; the store checks every
/// candidate against the ids it already holds.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> DocumentId;
}

// --- Application Services ---

/// Upsert, search and lookup over a document repository.
///
/// `save` reads, merges and writes in separate repository calls. Callers that
/// share one store between threads must serialize `save` themselves.
pub struct DocumentStore {
    doc_repo: Arc<dyn DocumentRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentStore {
    pub fn new(doc_repo: Arc<dyn DocumentRepository>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            doc_repo,
            id_generator,
        }
    }

    /// Inserts a new document or merges into the stored one with the same id.
    ///
    /// A document without an id gets a freshly generated one. On update the
    /// stored `created` always wins, and an absent `title` or `content` keeps
    /// the stored value. `author` is taken from the incoming document as is,
    /// even when absent. A new document without `created` is stamped with the
    /// current time.
    #[instrument(skip(self, document), fields(doc_id = field::Empty))]
    pub fn save(&self, mut document: Document) -> Result<Document, ApplicationError> {
        if document.id().is_empty() {
            document.id = self.generate_unique_id()?;
            debug!(doc_id = %document.id().as_str(), "Assigned generated id to document");
        }
        Span::current().record("doc_id", document.id().as_str());

        match self.doc_repo.get(document.id())? {
            Some(existing) => {
                document.created = existing.created;
                if document.title.is_none() {
                    document.title = existing.title;
                }
                if document.content.is_none() {
                    document.content = existing.content;
                }
                info!(doc_id = %document.id().as_str(), "Merging document into existing record");
            }
            None => {
                if document.created.is_none() {
                    document.created = Some(Utc::now());
                }
                info!(doc_id = %document.id().as_str(), "Creating new document");
            }
        }

        self.doc_repo.save(&document)?;
        Ok(document)
    }

    /// Returns every stored document matching the request.
    ///
    /// An absent request, or one with all five criteria absent, returns the
    /// whole store. Output order is unspecified.
    #[instrument(skip(self, request))]
    pub fn search<'a>(
        &self,
        request: impl Into<Option<&'a SearchRequest>>,
    ) -> Result<Vec<Document>, ApplicationError> {
        let documents = self.doc_repo.list()?;
        let request = match request.into() {
            Some(request) if !request.is_unconstrained() => request,
            _ => {
                debug!(count = documents.len(), "Unconstrained search, returning all documents");
                return Ok(documents);
            }
        };

        let total = documents.len();
        let hits: Vec<Document> = documents
            .into_iter()
            .filter(|document| request.matches(document))
            .collect();
        info!(scanned = total, hits = hits.len(), "Search completed");
        Ok(hits)
    }

    /// Looks up a document by exact id. Absent, empty and unknown ids yield `None`.
    #[instrument(skip(self, id))]
    pub fn find_by_id<'a>(
        &self,
        id: impl Into<Option<&'a str>>,
    ) -> Result<Option<Document>, ApplicationError> {
        let Some(id) = id.into().filter(|id| !id.is_empty()) else {
            debug!("Lookup with absent or empty id");
            return Ok(None);
        };
        let document = self.doc_repo.get(&DocumentId::from(id))?;
        debug!(doc_id = %id, found = document.is_some(), "Lookup by id");
        Ok(document)
    }

    pub fn len(&self) -> Result<usize, ApplicationError> {
        self.doc_repo.len()
    }

    pub fn is_empty(&self) -> Result<bool, ApplicationError> {
        self.doc_repo.is_empty()
    }

    /// Draws ids until one is not already stored.
    fn generate_unique_id(&self) -> Result<DocumentId, ApplicationError> {
        loop {
            let candidate = self.id_generator.next_id();
            if candidate.is_empty() {
                warn!("Id generator produced an empty id, retrying");
                continue;
            }
            if !self.doc_repo.contains(&candidate)? {
                return Ok(candidate);
            }
            warn!(
                doc_id = %candidate.as_str(),
                "Generated id collides with stored document, retrying"
            );
        }
    }
}
