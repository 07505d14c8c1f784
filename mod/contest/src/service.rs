use std::sync::Arc;

use careerdost_core::{merge_patch, new_id, now_rfc3339, ServiceError};
use careerdost_kv::KVStore;
use careerdost_store::{Collection, StoreError};
use platform::{CodeforcesClient, UpcomingContest};

use crate::model::{Contest, CreateContest};

fn store_err(e: StoreError) -> ServiceError {
    match e {
        StoreError::NotFound(m) => ServiceError::NotFound(m),
        StoreError::Conflict(m) => ServiceError::Conflict(m),
        other => ServiceError::Storage(other.to_string()),
    }
}

pub struct ContestService {
    contests: Collection<Contest>,
    codeforces: Arc<CodeforcesClient>,
}

impl ContestService {
    pub fn new(kv: Arc<dyn KVStore>, codeforces: Arc<CodeforcesClient>) -> Arc<Self> {
        Arc::new(Self {
            contests: Collection::new(kv),
            codeforces,
        })
    }

    pub fn create_contest(
        &self,
        user: &str,
        input: CreateContest,
    ) -> Result<Contest, ServiceError> {
        if input.name.trim().is_empty() || input.platform.trim().is_empty() {
            return Err(ServiceError::Validation(
                "contest name and platform are required".into(),
            ));
        }

        let contest = Contest {
            id: new_id(),
            slug: None,
            name: input.name.trim().to_string(),
            platform: input.platform.trim().to_string(),
            start_time: input.start_time,
            end_time: input.end_time,
            url: input.url,
            difficulty: input.difficulty,
            participants: 0,
            reminder_set: input.reminder_set,
            user: user.to_string(),
            created_at: now_rfc3339(),
        };
        self.contests.insert(&contest).map_err(store_err)?;
        Ok(contest)
    }

    /// All contests on a user's calendar, soonest start first.
    pub fn list_contests(&self, user: &str) -> Result<Vec<Contest>, ServiceError> {
        let mut contests = self.contests.find(|c| c.user == user).map_err(store_err)?;
        contests.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(contests)
    }

    pub fn update_contest(
        &self,
        user: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Contest, ServiceError> {
        let current = self.get_owned(user, id)?;

        let mut base =
            serde_json::to_value(&current).map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["id"] = serde_json::json!(current.id);
        base["user"] = serde_json::json!(user);
        base["createdAt"] = serde_json::json!(current.created_at);

        let updated: Contest =
            serde_json::from_value(base).map_err(|e| ServiceError::Validation(e.to_string()))?;
        self.contests.replace(&updated).map_err(store_err)?;
        Ok(updated)
    }

    /// Flip the reminder flag.
    pub fn toggle_reminder(&self, user: &str, id: &str) -> Result<Contest, ServiceError> {
        let mut contest = self.get_owned(user, id)?;
        contest.reminder_set = !contest.reminder_set;
        self.contests.replace(&contest).map_err(store_err)?;
        Ok(contest)
    }

    pub fn delete_contest(&self, user: &str, id: &str) -> Result<(), ServiceError> {
        self.get_owned(user, id)?;
        self.contests.delete(id).map_err(store_err)?;
        Ok(())
    }

    /// Live upcoming contests from Codeforces. Nothing is persisted.
    pub async fn upcoming(&self) -> Result<Vec<UpcomingContest>, ServiceError> {
        self.codeforces.upcoming_contests().await
    }

    /// Save the current upcoming contests onto a user's calendar,
    /// skipping slugs the user already has. Returns the newly added ones.
    pub async fn sync_upcoming(&self, user: &str) -> Result<Vec<Contest>, ServiceError> {
        let upcoming = self.codeforces.upcoming_contests().await?;

        let existing = self.contests.find(|c| c.user == user).map_err(store_err)?;
        let known: std::collections::HashSet<&str> = existing
            .iter()
            .filter_map(|c| c.slug.as_deref())
            .collect();

        let mut added = Vec::new();
        for entry in upcoming {
            if known.contains(entry.slug.as_str()) {
                continue;
            }
            let contest = Contest {
                id: new_id(),
                slug: Some(entry.slug),
                name: entry.name,
                platform: entry.platform,
                start_time: entry.start_time,
                end_time: entry.end_time,
                url: entry.url,
                difficulty: Default::default(),
                participants: 0,
                reminder_set: false,
                user: user.to_string(),
                created_at: now_rfc3339(),
            };
            self.contests.insert(&contest).map_err(store_err)?;
            added.push(contest);
        }
        Ok(added)
    }

    fn get_owned(&self, user: &str, id: &str) -> Result<Contest, ServiceError> {
        let contest = self.contests.require(id).map_err(store_err)?;
        if contest.user != user {
            return Err(ServiceError::NotFound(format!("contest/{}", id)));
        }
        Ok(contest)
    }
}
