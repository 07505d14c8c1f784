use serde::{Deserialize, Serialize};

use careerdost_store::Document;

/// Task bucket shown as a tab in the daily tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "DSA")]
    Dsa,
    Projects,
    Placements,
    Learning,
    Academic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A tracked task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    /// RFC 3339 due date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Owning user id.
    pub user: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Document for Task {
    const COLLECTION: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalCategory {
    Learning,
    Project,
    Placement,
    Personal,
    #[default]
    Other,
}

/// A longer-horizon goal with a deadline and self-reported progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 deadline.
    pub deadline: String,
    #[serde(default)]
    pub status: GoalStatus,
    /// Self-reported percent complete, 0–100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub category: GoalCategory,
    /// Owning user id.
    pub user: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Document for Goal {
    const COLLECTION: &'static str = "goal";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a goal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deadline: String,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub category: GoalCategory,
}
