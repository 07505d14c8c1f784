use std::sync::Arc;

use careerdost_core::{merge_patch, new_id, now_rfc3339, ServiceError};
use careerdost_kv::KVStore;
use careerdost_store::{Collection, StoreError};

use crate::model::{CareerPath, CloneTemplate, CreateCareerPath};
use crate::progress::milestone_progress;

fn store_err(e: StoreError) -> ServiceError {
    match e {
        StoreError::NotFound(m) => ServiceError::NotFound(m),
        StoreError::Conflict(m) => ServiceError::Conflict(m),
        other => ServiceError::Storage(other.to_string()),
    }
}

pub struct RoadmapService {
    paths: Collection<CareerPath>,
}

impl RoadmapService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            paths: Collection::new(kv),
        })
    }

    /// Create a career path for a user. The stored progress reflects the
    /// provided milestones from the start.
    pub fn create_path(
        &self,
        user: &str,
        input: CreateCareerPath,
    ) -> Result<CareerPath, ServiceError> {
        for (field, value) in [
            ("name", &input.name),
            ("description", &input.description),
            ("icon", &input.icon),
            ("difficulty", &input.difficulty),
            ("estimatedDuration", &input.estimated_duration),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::Validation(format!("{} is required", field)));
            }
        }

        let now = now_rfc3339();
        let path = CareerPath {
            id: new_id(),
            name: input.name,
            description: Some(input.description),
            icon: Some(input.icon),
            difficulty: Some(input.difficulty),
            estimated_duration: Some(input.estimated_duration),
            progress: milestone_progress(&input.milestones),
            milestones: input.milestones,
            user: Some(user.to_string()),
            created_at: now.clone(),
            updated_at: now,
        };
        self.paths.insert(&path).map_err(store_err)?;
        Ok(path)
    }

    /// All paths owned by `user`, newest first.
    pub fn list_paths(&self, user: &str) -> Result<Vec<CareerPath>, ServiceError> {
        let mut paths = self
            .paths
            .find(|p| p.user.as_deref() == Some(user))
            .map_err(store_err)?;
        paths.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paths)
    }

    pub fn get_path(&self, user: &str, id: &str) -> Result<CareerPath, ServiceError> {
        let path = self.paths.require(id).map_err(store_err)?;
        if path.user.as_deref() != Some(user) {
            return Err(ServiceError::NotFound(format!("career_path/{}", id)));
        }
        Ok(path)
    }

    /// Update a path with JSON merge-patch semantics.
    ///
    /// Progress is recomputed from the resulting milestones on every
    /// update — a patched `progress` value is overwritten, so the stored
    /// percentage can never drift from the checklist.
    pub fn update_path(
        &self,
        user: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<CareerPath, ServiceError> {
        let current = self.get_path(user, id)?;

        let mut base =
            serde_json::to_value(&current).map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["id"] = serde_json::json!(current.id);
        base["user"] = serde_json::json!(user);
        base["createdAt"] = serde_json::json!(current.created_at);
        base["updatedAt"] = serde_json::json!(now_rfc3339());

        let mut updated: CareerPath =
            serde_json::from_value(base).map_err(|e| ServiceError::Validation(e.to_string()))?;
        updated.progress = milestone_progress(&updated.milestones);

        self.paths.replace(&updated).map_err(store_err)?;
        Ok(updated)
    }

    /// Toggle one milestone's completed flag; progress is recomputed and
    /// persisted in the same write as the flag.
    pub fn toggle_milestone(
        &self,
        user: &str,
        id: &str,
        index: usize,
    ) -> Result<CareerPath, ServiceError> {
        let mut path = self.get_path(user, id)?;

        let milestone = path.milestones.get_mut(index).ok_or_else(|| {
            ServiceError::NotFound(format!("career_path/{}/milestones/{}", id, index))
        })?;
        milestone.completed = !milestone.completed;

        path.progress = milestone_progress(&path.milestones);
        path.updated_at = now_rfc3339();

        self.paths.replace(&path).map_err(store_err)?;
        Ok(path)
    }

    pub fn delete_path(&self, user: &str, id: &str) -> Result<(), ServiceError> {
        self.get_path(user, id)?;
        self.paths.delete(id).map_err(store_err)?;
        Ok(())
    }

    /// Ownerless paths are templates available to every new user,
    /// alphabetical by name.
    pub fn list_templates(&self) -> Result<Vec<CareerPath>, ServiceError> {
        let mut templates = self.paths.find(|p| p.user.is_none()).map_err(store_err)?;
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Clone a template for a user. The copy starts from the template's
    /// milestones with progress recomputed, not inherited.
    pub fn clone_template(
        &self,
        user: &str,
        input: CloneTemplate,
    ) -> Result<CareerPath, ServiceError> {
        let template = self.paths.require(&input.template_id).map_err(store_err)?;
        if template.user.is_some() {
            return Err(ServiceError::NotFound(format!(
                "career_path/{}",
                input.template_id
            )));
        }

        let now = now_rfc3339();
        let path = CareerPath {
            id: new_id(),
            name: template.name.clone(),
            description: template.description.clone(),
            icon: template.icon.clone(),
            difficulty: template.difficulty.clone(),
            estimated_duration: template.estimated_duration.clone(),
            progress: milestone_progress(&template.milestones),
            milestones: template.milestones.clone(),
            user: Some(user.to_string()),
            created_at: now.clone(),
            updated_at: now,
        };
        self.paths.insert(&path).map_err(store_err)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Milestone;
    use careerdost_kv::RedbStore;

    fn test_service() -> (Arc<RoadmapService>, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(tmp.path()).unwrap());
        (RoadmapService::new(kv), tmp)
    }

    fn milestone(title: &str, completed: bool) -> Milestone {
        Milestone {
            title: title.to_string(),
            description: None,
            completed,
            due_date: None,
            skills: Vec::new(),
        }
    }

    fn create_input(milestones: Vec<Milestone>) -> CreateCareerPath {
        CreateCareerPath {
            name: "Backend Engineer".to_string(),
            description: "server-side track".to_string(),
            icon: "server".to_string(),
            difficulty: "Intermediate".to_string(),
            estimated_duration: "6 months".to_string(),
            milestones,
        }
    }

    #[test]
    fn test_create_computes_progress() {
        let (svc, _tmp) = test_service();
        let path = svc
            .create_path(
                "u1",
                create_input(vec![
                    milestone("learn sql", true),
                    milestone("build an api", false),
                ]),
            )
            .unwrap();
        assert_eq!(path.progress, 50);
    }

    #[test]
    fn test_create_requires_fields() {
        let (svc, _tmp) = test_service();
        let mut input = create_input(vec![]);
        input.icon = "  ".to_string();
        assert!(matches!(
            svc.create_path("u1", input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_update_recomputes_progress_and_ignores_patched_value() {
        let (svc, _tmp) = test_service();
        let path = svc
            .create_path("u1", create_input(vec![milestone("a", false), milestone("b", false)]))
            .unwrap();

        // Replace milestones wholesale; also try to sneak in a bogus progress.
        let updated = svc
            .update_path(
                "u1",
                &path.id,
                serde_json::json!({
                    "progress": 99,
                    "milestones": [
                        {"title": "a", "completed": true},
                        {"title": "b", "completed": true},
                        {"title": "c", "completed": false},
                    ],
                }),
            )
            .unwrap();
        assert_eq!(updated.progress, 67);
        assert_eq!(updated.milestones.len(), 3);
    }

    #[test]
    fn test_toggle_milestone_updates_progress_in_same_doc() {
        let (svc, _tmp) = test_service();
        let path = svc
            .create_path("u1", create_input(vec![milestone("a", false), milestone("b", false)]))
            .unwrap();

        let toggled = svc.toggle_milestone("u1", &path.id, 0).unwrap();
        assert!(toggled.milestones[0].completed);
        assert_eq!(toggled.progress, 50);

        // Toggling back recomputes down again.
        let untoggled = svc.toggle_milestone("u1", &path.id, 0).unwrap();
        assert_eq!(untoggled.progress, 0);

        // Stored document agrees with the returned one.
        let stored = svc.get_path("u1", &path.id).unwrap();
        assert_eq!(stored.progress, 0);

        assert!(matches!(
            svc.toggle_milestone("u1", &path.id, 7),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_templates_and_clone() {
        let (svc, _tmp) = test_service();

        // Seed a template directly (no owner).
        let now = now_rfc3339();
        let template = CareerPath {
            id: new_id(),
            name: "Data Scientist".to_string(),
            description: Some("ml track".to_string()),
            icon: Some("chart".to_string()),
            difficulty: Some("Advanced".to_string()),
            estimated_duration: Some("9 months".to_string()),
            milestones: vec![milestone("statistics", false)],
            progress: 0,
            user: None,
            created_at: now.clone(),
            updated_at: now,
        };
        svc.paths.insert(&template).unwrap();

        let templates = svc.list_templates().unwrap();
        assert_eq!(templates.len(), 1);

        let cloned = svc
            .clone_template("u1", CloneTemplate { template_id: template.id.clone() })
            .unwrap();
        assert_eq!(cloned.user.as_deref(), Some("u1"));
        assert_ne!(cloned.id, template.id);
        assert_eq!(cloned.progress, 0);

        // A user-owned path is not cloneable as a template.
        assert!(matches!(
            svc.clone_template("u2", CloneTemplate { template_id: cloned.id }),
            Err(ServiceError::NotFound(_))
        ));

        // Templates don't show up in a user's own list.
        assert_eq!(svc.list_paths("u1").unwrap().len(), 1);
    }

    #[test]
    fn test_owner_scoping() {
        let (svc, _tmp) = test_service();
        let path = svc.create_path("u1", create_input(vec![])).unwrap();

        assert!(matches!(
            svc.get_path("u2", &path.id),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_path("u2", &path.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}
