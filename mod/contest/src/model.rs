use serde::{Deserialize, Serialize};

use careerdost_store::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestDifficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// A saved contest on a user's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: String,
    /// Platform slug (`codeforces-1934`) for contests imported via sync;
    /// manual entries have none. Sync dedups per user on this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub platform: String,
    /// RFC 3339 start time.
    pub start_time: String,
    /// RFC 3339 end time.
    pub end_time: String,
    pub url: String,
    #[serde(default)]
    pub difficulty: ContestDifficulty,
    #[serde(default)]
    pub participants: u64,
    #[serde(default)]
    pub reminder_set: bool,
    /// Owning user id.
    pub user: String,
    pub created_at: String,
}

impl Document for Contest {
    const COLLECTION: &'static str = "contest";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for manually adding a contest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContest {
    pub name: String,
    pub platform: String,
    pub start_time: String,
    pub end_time: String,
    pub url: String,
    #[serde(default)]
    pub difficulty: ContestDifficulty,
    #[serde(default)]
    pub reminder_set: bool,
}
