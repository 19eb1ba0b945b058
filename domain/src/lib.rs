use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Document ID ---
/// A JSON `null` id deserializes to the unassigned (empty) id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// An empty id means "not assigned yet".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
impl From<Option<String>> for DocumentId {
    fn from(id: Option<String>) -> Self {
        Self::new(id.unwrap_or_default())
    }
}
impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}
impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

// --- Author ---

/// Author attached to a document. Has no lifecycle of its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// The stored record unit.
///
/// Every field except `id` may be absent on input. `save` fills `id` and
/// `created`, so a document handed back by the store always carries both.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: DocumentId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates an unsaved document with no id and no creation time.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            id: DocumentId::default(),
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author),
            created: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Id of the attached author, if there is one.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(|author| author.id.as_str())
    }
}

// --- Search Request ---

/// Conjunctive filter over stored documents.
///
/// Values inside one list criterion are OR-ed together, while the five
/// criteria are AND-ed. An absent or empty list imposes no constraint.
/// Both bounds of the creation range are inclusive.
///
/// A document whose filtered field is absent never matches a non-empty
/// criterion on that field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub title_prefixes: Option<Vec<String>>,
    pub contains_contents: Option<Vec<String>>,
    pub author_ids: Option<Vec<String>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_contains_contents<I, S>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_contents = Some(contents.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_author_ids<I, S>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_ids = Some(author_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn with_created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// True when none of the five criteria is present.
    pub fn is_unconstrained(&self) -> bool {
        self.title_prefixes.is_none()
            && self.contains_contents.is_none()
            && self.author_ids.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }

    /// Checks every criterion against a single document.
    pub fn matches(&self, document: &Document) -> bool {
        self.matches_title(document)
            && self.matches_content(document)
            && self.matches_author(document)
            && self.matches_created(document)
    }

    fn matches_title(&self, document: &Document) -> bool {
        match self.title_prefixes.as_deref() {
            None | Some([]) => true,
            Some(prefixes) => document.title.as_deref().is_some_and(|title| {
                prefixes
                    .iter()
                    .any(|prefix| title.starts_with(prefix.as_str()))
            }),
        }
    }

    fn matches_content(&self, document: &Document) -> bool {
        match self.contains_contents.as_deref() {
            None | Some([]) => true,
            Some(needles) => document.content.as_deref().is_some_and(|content| {
                needles
                    .iter()
                    .any(|needle| content.contains(needle.as_str()))
            }),
        }
    }

    fn matches_author(&self, document: &Document) -> bool {
        match self.author_ids.as_deref() {
            None | Some([]) => true,
            Some(author_ids) => document
                .author_id()
                .is_some_and(|id| author_ids.iter().any(|wanted| wanted == id)),
        }
    }

    fn matches_created(&self, document: &Document) -> bool {
        if self.created_from.is_none() && self.created_to.is_none() {
            return true;
        }
        let Some(created) = document.created else {
            return false;
        };
        self.created_from.is_none_or(|from| created >= from)
            && self.created_to.is_none_or(|to| created <= to)
    }
}
