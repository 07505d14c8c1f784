use std::sync::Arc;

use careerdost_core::{merge_patch, new_id, now_rfc3339, ServiceError};
use careerdost_kv::KVStore;
use careerdost_store::{Collection, StoreError};

use crate::model::{CreateGoal, CreateTask, Goal, Task};

fn store_err(e: StoreError) -> ServiceError {
    match e {
        StoreError::NotFound(m) => ServiceError::NotFound(m),
        StoreError::Conflict(m) => ServiceError::Conflict(m),
        other => ServiceError::Storage(other.to_string()),
    }
}

pub struct PlannerService {
    tasks: Collection<Task>,
    goals: Collection<Goal>,
}

impl PlannerService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            tasks: Collection::new(Arc::clone(&kv)),
            goals: Collection::new(kv),
        })
    }

    // ── Tasks ──

    pub fn create_task(&self, user: &str, input: CreateTask) -> Result<Task, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::Validation("task title is required".into()));
        }

        let now = now_rfc3339();
        let task = Task {
            id: new_id(),
            title: input.title.trim().to_string(),
            category: input.category,
            priority: input.priority,
            completed: false,
            due_date: input.due_date,
            user: user.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.tasks.insert(&task).map_err(store_err)?;
        Ok(task)
    }

    /// All tasks owned by `user`, newest first.
    pub fn list_tasks(&self, user: &str) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self.tasks.find(|t| t.user == user).map_err(store_err)?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    /// Update a task with JSON merge-patch semantics. Ownership and
    /// identity fields cannot be patched away.
    pub fn update_task(
        &self,
        user: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Task, ServiceError> {
        let current = self.get_owned_task(user, id)?;
        let updated: Task = apply_patch(&current, patch, user, &current.created_at)?;
        self.tasks.replace(&updated).map_err(store_err)?;
        Ok(updated)
    }

    pub fn delete_task(&self, user: &str, id: &str) -> Result<(), ServiceError> {
        self.get_owned_task(user, id)?;
        self.tasks.delete(id).map_err(store_err)?;
        Ok(())
    }

    fn get_owned_task(&self, user: &str, id: &str) -> Result<Task, ServiceError> {
        let task = self.tasks.require(id).map_err(store_err)?;
        if task.user != user {
            // Foreign ids look like missing ones.
            return Err(ServiceError::NotFound(format!("task/{}", id)));
        }
        Ok(task)
    }

    // ── Goals ──

    pub fn create_goal(&self, user: &str, input: CreateGoal) -> Result<Goal, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::Validation("goal title is required".into()));
        }
        if input.progress > 100 {
            return Err(ServiceError::Validation("progress must be 0-100".into()));
        }

        let now = now_rfc3339();
        let goal = Goal {
            id: new_id(),
            title: input.title.trim().to_string(),
            description: input.description,
            deadline: input.deadline,
            status: input.status,
            progress: input.progress,
            category: input.category,
            user: user.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.goals.insert(&goal).map_err(store_err)?;
        Ok(goal)
    }

    pub fn list_goals(&self, user: &str) -> Result<Vec<Goal>, ServiceError> {
        let mut goals = self.goals.find(|g| g.user == user).map_err(store_err)?;
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    pub fn update_goal(
        &self,
        user: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Goal, ServiceError> {
        let current = self.get_owned_goal(user, id)?;
        let updated: Goal = apply_patch(&current, patch, user, &current.created_at)?;
        if updated.progress > 100 {
            return Err(ServiceError::Validation("progress must be 0-100".into()));
        }
        self.goals.replace(&updated).map_err(store_err)?;
        Ok(updated)
    }

    pub fn delete_goal(&self, user: &str, id: &str) -> Result<(), ServiceError> {
        self.get_owned_goal(user, id)?;
        self.goals.delete(id).map_err(store_err)?;
        Ok(())
    }

    fn get_owned_goal(&self, user: &str, id: &str) -> Result<Goal, ServiceError> {
        let goal = self.goals.require(id).map_err(store_err)?;
        if goal.user != user {
            return Err(ServiceError::NotFound(format!("goal/{}", id)));
        }
        Ok(goal)
    }
}

/// Merge-patch a document, pinning id/user/created_at and stamping
/// updated_at.
fn apply_patch<T: serde::Serialize + serde::de::DeserializeOwned>(
    current: &T,
    patch: serde_json::Value,
    user: &str,
    created_at: &str,
) -> Result<T, ServiceError> {
    let mut base =
        serde_json::to_value(current).map_err(|e| ServiceError::Internal(e.to_string()))?;
    let id = base["id"].clone();
    merge_patch(&mut base, &patch);
    base["id"] = id;
    base["user"] = serde_json::json!(user);
    base["createdAt"] = serde_json::json!(created_at);
    base["updatedAt"] = serde_json::json!(now_rfc3339());

    serde_json::from_value(base).map_err(|e| ServiceError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoalStatus, TaskCategory, TaskPriority};
    use careerdost_kv::RedbStore;

    fn test_service() -> (Arc<PlannerService>, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(tmp.path()).unwrap());
        (PlannerService::new(kv), tmp)
    }

    fn task_input(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            category: TaskCategory::Dsa,
            priority: TaskPriority::default(),
            due_date: None,
        }
    }

    #[test]
    fn test_task_crud() {
        let (svc, _tmp) = test_service();

        let task = svc.create_task("u1", task_input("solve two-sum")).unwrap();
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::Medium);

        let updated = svc
            .update_task("u1", &task.id, serde_json::json!({"completed": true, "priority": "High"}))
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.priority, TaskPriority::High);

        assert_eq!(svc.list_tasks("u1").unwrap().len(), 1);
        svc.delete_task("u1", &task.id).unwrap();
        assert!(svc.list_tasks("u1").unwrap().is_empty());
    }

    #[test]
    fn test_task_owner_scoping() {
        let (svc, _tmp) = test_service();
        let task = svc.create_task("u1", task_input("mine")).unwrap();

        // Another user cannot see, update or delete it.
        assert!(svc.list_tasks("u2").unwrap().is_empty());
        assert!(matches!(
            svc.update_task("u2", &task.id, serde_json::json!({"completed": true})),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_task("u2", &task.id),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_patch_cannot_steal_ownership() {
        let (svc, _tmp) = test_service();
        let task = svc.create_task("u1", task_input("mine")).unwrap();

        let updated = svc
            .update_task("u1", &task.id, serde_json::json!({"user": "u2", "id": "hacked"}))
            .unwrap();
        assert_eq!(updated.user, "u1");
        assert_eq!(updated.id, task.id);
    }

    #[test]
    fn test_goal_crud_and_progress_bounds() {
        let (svc, _tmp) = test_service();

        let goal = svc
            .create_goal(
                "u1",
                CreateGoal {
                    title: "crack placements".to_string(),
                    description: None,
                    deadline: "2026-12-31T00:00:00Z".to_string(),
                    status: GoalStatus::default(),
                    progress: 0,
                    category: Default::default(),
                },
            )
            .unwrap();

        let updated = svc
            .update_goal("u1", &goal.id, serde_json::json!({"progress": 40, "status": "in_progress"}))
            .unwrap();
        assert_eq!(updated.progress, 40);
        assert_eq!(updated.status, GoalStatus::InProgress);

        assert!(matches!(
            svc.update_goal("u1", &goal.id, serde_json::json!({"progress": 150})),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_list_newest_first() {
        let (svc, _tmp) = test_service();
        let a = svc.create_task("u1", task_input("a")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = svc.create_task("u1", task_input("b")).unwrap();

        let listed = svc.list_tasks("u1").unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }
}
