use application::IdGenerator;
use domain::DocumentId;
use uuid::Uuid;

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> DocumentId {
        DocumentId::new(Uuid::new_v4().to_string())
    }
}
