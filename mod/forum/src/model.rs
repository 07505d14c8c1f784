use serde::{Deserialize, Serialize};

use careerdost_store::Document;

/// A reply under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Author user id.
    pub user: String,
    /// Author display name, denormalized for rendering.
    pub user_name: String,
    pub text: String,
    pub created_at: String,
}

/// A community forum post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author user id.
    pub user: String,
    /// Author display name, denormalized for rendering.
    pub user_name: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// User ids who upvoted; voting again removes the vote.
    #[serde(default)]
    pub upvotes: Vec<String>,
    pub created_at: String,
}

impl Document for ForumPost {
    const COLLECTION: &'static str = "forum_post";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for replying to a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReply {
    pub text: String,
}
