use std::sync::Arc;

use tracing::warn;

use careerdost_core::{merge_patch, new_id, now_rfc3339, ServiceError};
use careerdost_kv::KVStore;
use careerdost_search::{SearchIndex, SearchableDoc};
use careerdost_store::{Collection, StoreError};

use crate::model::{CreateResource, Rating, Resource, ResourceComment, ResourceQuery};

fn store_err(e: StoreError) -> ServiceError {
    match e {
        StoreError::NotFound(m) => ServiceError::NotFound(m),
        StoreError::Conflict(m) => ServiceError::Conflict(m),
        other => ServiceError::Storage(other.to_string()),
    }
}

pub struct LibraryService {
    resources: Collection<Resource>,
    search: Arc<dyn SearchIndex>,
}

impl LibraryService {
    pub fn new(kv: Arc<dyn KVStore>, search: Arc<dyn SearchIndex>) -> Arc<Self> {
        Arc::new(Self {
            resources: Collection::new(kv),
            search,
        })
    }

    /// Submit a resource. Auto-approved for now; the `approved` flag stays
    /// in the document so a moderation pass can flip it later.
    pub fn create_resource(
        &self,
        user: &str,
        input: CreateResource,
    ) -> Result<Resource, ServiceError> {
        if input.title.trim().is_empty() || input.url.trim().is_empty() {
            return Err(ServiceError::Validation("title and url are required".into()));
        }

        let now = now_rfc3339();
        let resource = Resource {
            id: new_id(),
            title: input.title.trim().to_string(),
            url: input.url.trim().to_string(),
            description: input.description,
            category: input.category,
            resource_type: input.resource_type,
            difficulty: input.difficulty,
            tags: input.tags,
            ratings: Vec::new(),
            comments: Vec::new(),
            bookmarked_by: Vec::new(),
            submitted_by: Some(user.to_string()),
            approved: true,
            created_at: now.clone(),
            updated_at: now,
        };

        self.resources.insert(&resource).map_err(store_err)?;
        self.index_resource(&resource);
        Ok(resource)
    }

    /// Browse approved resources with exact-match filters and optional
    /// full-text search. With a search term, results come back in
    /// relevance order; otherwise newest first.
    pub fn list_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, ServiceError> {
        let matches_filters = |r: &Resource| {
            r.approved
                && query
                    .category
                    .as_ref()
                    .is_none_or(|c| r.category.as_deref() == Some(c.as_str()))
                && query
                    .resource_type
                    .as_ref()
                    .is_none_or(|t| r.resource_type.as_deref() == Some(t.as_str()))
                && query
                    .difficulty
                    .as_ref()
                    .is_none_or(|d| r.difficulty.as_deref() == Some(d.as_str()))
        };

        match query.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let hits = self
                    .search
                    .search(term, 100)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                let mut results = Vec::new();
                for hit in hits {
                    if let Some(resource) = self.resources.get(&hit.id).map_err(store_err)? {
                        if matches_filters(&resource) {
                            results.push(resource);
                        }
                    }
                }
                Ok(results)
            }
            _ => {
                let mut results = self.resources.find(matches_filters).map_err(store_err)?;
                results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(results)
            }
        }
    }

    pub fn get_resource(&self, id: &str) -> Result<Resource, ServiceError> {
        self.resources.require(id).map_err(store_err)
    }

    /// Update a resource with JSON merge-patch semantics and re-index it.
    pub fn update_resource(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Resource, ServiceError> {
        let current = self.get_resource(id)?;

        let mut base =
            serde_json::to_value(&current).map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["id"] = serde_json::json!(current.id);
        base["createdAt"] = serde_json::json!(current.created_at);
        base["updatedAt"] = serde_json::json!(now_rfc3339());

        let updated: Resource =
            serde_json::from_value(base).map_err(|e| ServiceError::Validation(e.to_string()))?;
        self.resources.replace(&updated).map_err(store_err)?;
        self.index_resource(&updated);
        Ok(updated)
    }

    pub fn delete_resource(&self, id: &str) -> Result<(), ServiceError> {
        self.get_resource(id)?;
        self.resources.delete(id).map_err(store_err)?;
        if let Err(e) = self.search.delete(id) {
            warn!(resource = id, "failed to remove from search index: {}", e);
        }
        Ok(())
    }

    /// Rate a resource 1–5. A user's repeat rating replaces their old one.
    pub fn rate(&self, user: &str, id: &str, rating: u8) -> Result<Resource, ServiceError> {
        if !(1..=5).contains(&rating) {
            return Err(ServiceError::Validation("rating must be 1-5".into()));
        }

        let mut resource = self.get_resource(id)?;
        resource.ratings.retain(|r| r.user != user);
        resource.ratings.push(Rating {
            user: user.to_string(),
            rating,
        });
        resource.updated_at = now_rfc3339();
        self.resources.replace(&resource).map_err(store_err)?;
        Ok(resource)
    }

    /// Leave a comment on a resource.
    pub fn comment(&self, user: &str, id: &str, text: &str) -> Result<Resource, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("comment text is required".into()));
        }

        let mut resource = self.get_resource(id)?;
        resource.comments.push(ResourceComment {
            user: user.to_string(),
            text: text.trim().to_string(),
            created_at: now_rfc3339(),
        });
        resource.updated_at = now_rfc3339();
        self.resources.replace(&resource).map_err(store_err)?;
        Ok(resource)
    }

    /// Toggle a bookmark. Returns the resource and whether it is now
    /// bookmarked by the user.
    pub fn toggle_bookmark(&self, user: &str, id: &str) -> Result<(Resource, bool), ServiceError> {
        let mut resource = self.get_resource(id)?;
        let bookmarked = if resource.bookmarked_by.iter().any(|u| u == user) {
            resource.bookmarked_by.retain(|u| u != user);
            false
        } else {
            resource.bookmarked_by.push(user.to_string());
            true
        };
        resource.updated_at = now_rfc3339();
        self.resources.replace(&resource).map_err(store_err)?;
        Ok((resource, bookmarked))
    }

    /// How many resources a user has bookmarked (for dashboard stats).
    pub fn count_bookmarks(&self, user: &str) -> Result<usize, ServiceError> {
        Ok(self
            .resources
            .find(|r| r.bookmarked_by.iter().any(|u| u == user))
            .map_err(store_err)?
            .len())
    }

    fn index_resource(&self, resource: &Resource) {
        let doc = SearchableDoc {
            title: resource.title.clone(),
            description: resource.description.clone().unwrap_or_default(),
            tags: resource.tags.clone(),
        };
        // Search is best-effort: a failed index never fails the write.
        if let Err(e) = self.search.index(&resource.id, &doc) {
            warn!(resource = %resource.id, "failed to index resource: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerdost_kv::RedbStore;
    use careerdost_search::TantivyIndex;

    fn test_service() -> (Arc<LibraryService>, tempfile::NamedTempFile, tempfile::TempDir) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let search_dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(tmp.path()).unwrap());
        let search: Arc<dyn SearchIndex> =
            Arc::new(TantivyIndex::open(search_dir.path()).unwrap());
        (LibraryService::new(kv, search), tmp, search_dir)
    }

    fn input(title: &str, category: &str, tags: &[&str]) -> CreateResource {
        CreateResource {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            description: Some("notes".to_string()),
            category: Some(category.to_string()),
            resource_type: Some("article".to_string()),
            difficulty: Some("Intermediate".to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_and_filter() {
        let (svc, _tmp, _dir) = test_service();
        svc.create_resource("u1", input("Graph Algorithms", "DSA", &["graphs"])).unwrap();
        svc.create_resource("u1", input("Resume Tips", "Placements", &[])).unwrap();

        let all = svc.list_resources(&ResourceQuery::default()).unwrap();
        assert_eq!(all.len(), 2);

        let dsa = svc
            .list_resources(&ResourceQuery {
                category: Some("DSA".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(dsa.len(), 1);
        assert_eq!(dsa[0].title, "Graph Algorithms");
    }

    #[test]
    fn test_full_text_search() {
        let (svc, _tmp, _dir) = test_service();
        svc.create_resource("u1", input("Graph Algorithms", "DSA", &["bfs", "dfs"])).unwrap();
        svc.create_resource("u1", input("Resume Tips", "Placements", &[])).unwrap();

        let hits = svc
            .list_resources(&ResourceQuery {
                search: Some("graph".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Graph Algorithms");

        // Tag text is searchable too.
        let by_tag = svc
            .list_resources(&ResourceQuery {
                search: Some("dfs".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_tag.len(), 1);
    }

    #[test]
    fn test_search_respects_filters() {
        let (svc, _tmp, _dir) = test_service();
        svc.create_resource("u1", input("Graph Algorithms", "DSA", &[])).unwrap();
        svc.create_resource("u1", input("Graph Databases", "Projects", &[])).unwrap();

        let hits = svc
            .list_resources(&ResourceQuery {
                search: Some("graph".to_string()),
                category: Some("DSA".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category.as_deref(), Some("DSA"));
    }

    #[test]
    fn test_rating_replaces_previous() {
        let (svc, _tmp, _dir) = test_service();
        let r = svc.create_resource("u1", input("Graph Algorithms", "DSA", &[])).unwrap();

        svc.rate("u2", &r.id, 3).unwrap();
        let rated = svc.rate("u2", &r.id, 5).unwrap();
        assert_eq!(rated.ratings.len(), 1);
        assert_eq!(rated.ratings[0].rating, 5);
        assert_eq!(rated.average_rating(), Some(5.0));

        assert!(matches!(
            svc.rate("u2", &r.id, 0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.rate("u2", &r.id, 6),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_bookmark_toggle_and_count() {
        let (svc, _tmp, _dir) = test_service();
        let r = svc.create_resource("u1", input("Graph Algorithms", "DSA", &[])).unwrap();

        let (_, on) = svc.toggle_bookmark("u2", &r.id).unwrap();
        assert!(on);
        assert_eq!(svc.count_bookmarks("u2").unwrap(), 1);

        let (_, off) = svc.toggle_bookmark("u2", &r.id).unwrap();
        assert!(!off);
        assert_eq!(svc.count_bookmarks("u2").unwrap(), 0);
    }

    #[test]
    fn test_comment() {
        let (svc, _tmp, _dir) = test_service();
        let r = svc.create_resource("u1", input("Graph Algorithms", "DSA", &[])).unwrap();

        let commented = svc.comment("u2", &r.id, "great writeup").unwrap();
        assert_eq!(commented.comments.len(), 1);
        assert_eq!(commented.comments[0].text, "great writeup");

        assert!(matches!(
            svc.comment("u2", &r.id, "  "),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_removes_from_search() {
        let (svc, _tmp, _dir) = test_service();
        let r = svc.create_resource("u1", input("Graph Algorithms", "DSA", &[])).unwrap();

        svc.delete_resource(&r.id).unwrap();
        let hits = svc
            .list_resources(&ResourceQuery {
                search: Some("graph".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(hits.is_empty());
    }
}
