use serde::{Deserialize, Serialize};

use careerdost_store::Document;

/// One step on a career path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Skills this milestone develops; feeds the analytics skill radar.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A career path — either a user's copy or an ownerless template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Precomputed completion percentage; kept in sync by every mutation
    /// path, never derived on read.
    #[serde(default)]
    pub progress: u8,
    /// Owning user id; templates have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Document for CareerPath {
    const COLLECTION: &'static str = "career_path";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a career path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareerPath {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub difficulty: String,
    pub estimated_duration: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Input for cloning a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneTemplate {
    pub template_id: String,
}
