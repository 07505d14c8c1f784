use crate::error::SearchError;

/// The indexable text of a library resource.
///
/// Title, description and tags are the fields students actually search;
/// everything else (category, difficulty) is an exact-match filter handled
/// by the library service, not the index.
#[derive(Debug, Clone, Default)]
pub struct SearchableDoc {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// A single search hit, ordered by relevance score (highest first).
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
}

/// Full-text search over the resource library.
///
/// The library service keeps this index in sync with the document store:
/// every resource create/update re-indexes, every delete removes.
pub trait SearchIndex: Send + Sync {
    /// Index a resource. Replaces any previous entry with the same id.
    fn index(&self, id: &str, doc: &SearchableDoc) -> Result<(), SearchError>;

    /// Remove a resource from the index.
    fn delete(&self, id: &str) -> Result<(), SearchError>;

    /// Search the index. Returns up to `limit` hits by descending score.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}
