use std::path::Path;
use std::sync::RwLock;

use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Value as TantivyValue;
use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};

use crate::error::SearchError;
use crate::traits::{SearchHit, SearchIndex, SearchableDoc};

/// TantivyIndex is a SearchIndex implementation backed by Tantivy.
///
/// One index directory holds the whole resource library. Documents carry:
/// - `_id` (STRING | STORED): exact-match resource id, untokenized
/// - `title`, `description`, `tags` (TEXT): tokenized full-text fields
pub struct TantivyIndex {
    index: Index,
    reader: IndexReader,
    writer: RwLock<IndexWriter>,
    id_field: Field,
    title_field: Field,
    description_field: Field,
    tags_field: Field,
}

impl TantivyIndex {
    /// Open or create the index under `dir`.
    pub fn open(dir: &Path) -> Result<Self, SearchError> {
        std::fs::create_dir_all(dir).map_err(|e| SearchError::Index(e.to_string()))?;

        let mut schema_builder = Schema::builder();
        let id_field = schema_builder.add_text_field("_id", STRING | STORED);
        let title_field = schema_builder.add_text_field("title", TEXT);
        let description_field = schema_builder.add_text_field("description", TEXT);
        let tags_field = schema_builder.add_text_field("tags", TEXT);
        let schema = schema_builder.build();

        let mmap = tantivy::directory::MmapDirectory::open(dir)
            .map_err(|e| SearchError::Index(e.to_string()))?;
        let index = Index::open_or_create(mmap, schema)
            .map_err(|e| SearchError::Index(e.to_string()))?;

        let writer = index
            .writer(15_000_000) // 15 MB heap
            .map_err(|e| SearchError::Index(e.to_string()))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e: tantivy::TantivyError| SearchError::Index(e.to_string()))?;

        Ok(Self {
            index,
            reader,
            writer: RwLock::new(writer),
            id_field,
            title_field,
            description_field,
            tags_field,
        })
    }
}

impl SearchIndex for TantivyIndex {
    fn index(&self, id: &str, resource: &SearchableDoc) -> Result<(), SearchError> {
        let mut writer = self.writer.write().unwrap();

        // Delete any existing document with the same id (upsert).
        let term = tantivy::Term::from_field_text(self.id_field, id);
        writer.delete_term(term);

        writer
            .add_document(doc!(
                self.id_field => id,
                self.title_field => resource.title.as_str(),
                self.description_field => resource.description.as_str(),
                self.tags_field => resource.tags.join(" "),
            ))
            .map_err(|e| SearchError::Index(e.to_string()))?;

        writer
            .commit()
            .map_err(|e| SearchError::Index(e.to_string()))?;

        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), SearchError> {
        let mut writer = self.writer.write().unwrap();
        let term = tantivy::Term::from_field_text(self.id_field, id);
        writer.delete_term(term);
        writer
            .commit()
            .map_err(|e| SearchError::Index(e.to_string()))?;
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        // Reload the reader to pick up latest commits.
        self.reader
            .reload()
            .map_err(|e| SearchError::Query(e.to_string()))?;

        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(
            &self.index,
            vec![self.title_field, self.description_field, self.tags_field],
        );

        let parsed = query_parser
            .parse_query(query)
            .map_err(|e| SearchError::Query(e.to_string()))?;

        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| SearchError::Query(e.to_string()))?;

        let mut hits = Vec::new();
        for (score, doc_addr) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_addr)
                .map_err(|e| SearchError::Query(e.to_string()))?;

            let id = doc
                .get_first(self.id_field)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            hits.push(SearchHit { id, score });
        }

        Ok(hits)
    }
}
