use std::sync::Arc;

use careerdost_core::{new_id, now_rfc3339, ServiceError};
use careerdost_kv::KVStore;
use careerdost_store::{Collection, StoreError};

use crate::model::{CreatePost, CreateReply, ForumPost, Reply};

fn store_err(e: StoreError) -> ServiceError {
    match e {
        StoreError::NotFound(m) => ServiceError::NotFound(m),
        StoreError::Conflict(m) => ServiceError::Conflict(m),
        other => ServiceError::Storage(other.to_string()),
    }
}

pub struct ForumService {
    posts: Collection<ForumPost>,
}

impl ForumService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            posts: Collection::new(kv),
        })
    }

    pub fn create_post(
        &self,
        user: &str,
        user_name: &str,
        input: CreatePost,
    ) -> Result<ForumPost, ServiceError> {
        if input.title.trim().is_empty() || input.body.trim().is_empty() {
            return Err(ServiceError::Validation("title and body are required".into()));
        }

        let post = ForumPost {
            id: new_id(),
            title: input.title.trim().to_string(),
            body: input.body.trim().to_string(),
            tags: input.tags,
            user: user.to_string(),
            user_name: user_name.to_string(),
            replies: Vec::new(),
            upvotes: Vec::new(),
            created_at: now_rfc3339(),
        };
        self.posts.insert(&post).map_err(store_err)?;
        Ok(post)
    }

    /// All posts, newest first. The forum is shared — no owner filter.
    pub fn list_posts(&self) -> Result<Vec<ForumPost>, ServiceError> {
        let mut posts = self.posts.list().map_err(store_err)?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub fn get_post(&self, id: &str) -> Result<ForumPost, ServiceError> {
        self.posts.require(id).map_err(store_err)
    }

    pub fn add_reply(
        &self,
        user: &str,
        user_name: &str,
        post_id: &str,
        input: CreateReply,
    ) -> Result<ForumPost, ServiceError> {
        if input.text.trim().is_empty() {
            return Err(ServiceError::Validation("reply text is required".into()));
        }

        let mut post = self.get_post(post_id)?;
        post.replies.push(Reply {
            user: user.to_string(),
            user_name: user_name.to_string(),
            text: input.text.trim().to_string(),
            created_at: now_rfc3339(),
        });
        self.posts.replace(&post).map_err(store_err)?;
        Ok(post)
    }

    /// Toggle an upvote. Returns the post and whether the user's vote is
    /// now present.
    pub fn toggle_upvote(&self, user: &str, post_id: &str) -> Result<(ForumPost, bool), ServiceError> {
        let mut post = self.get_post(post_id)?;
        let upvoted = if post.upvotes.iter().any(|u| u == user) {
            post.upvotes.retain(|u| u != user);
            false
        } else {
            post.upvotes.push(user.to_string());
            true
        };
        self.posts.replace(&post).map_err(store_err)?;
        Ok((post, upvoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerdost_kv::RedbStore;

    fn test_service() -> (Arc<ForumService>, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(tmp.path()).unwrap());
        (ForumService::new(kv), tmp)
    }

    fn post_input(title: &str) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            body: "anyone solved this?".to_string(),
            tags: vec!["dsa".to_string()],
        }
    }

    #[test]
    fn test_create_and_list() {
        let (svc, _tmp) = test_service();
        svc.create_post("u1", "Asha", post_input("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        svc.create_post("u2", "Vikram", post_input("second")).unwrap();

        let posts = svc.list_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "second");
        assert_eq!(posts[1].user_name, "Asha");
    }

    #[test]
    fn test_validation() {
        let (svc, _tmp) = test_service();
        let err = svc
            .create_post(
                "u1",
                "Asha",
                CreatePost {
                    title: " ".to_string(),
                    body: "x".to_string(),
                    tags: vec![],
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_replies() {
        let (svc, _tmp) = test_service();
        let post = svc.create_post("u1", "Asha", post_input("help")).unwrap();

        let replied = svc
            .add_reply("u2", "Vikram", &post.id, CreateReply { text: "try dp".to_string() })
            .unwrap();
        assert_eq!(replied.replies.len(), 1);
        assert_eq!(replied.replies[0].user_name, "Vikram");

        assert!(matches!(
            svc.add_reply("u2", "Vikram", "missing", CreateReply { text: "x".to_string() }),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_upvote_toggles() {
        let (svc, _tmp) = test_service();
        let post = svc.create_post("u1", "Asha", post_input("help")).unwrap();

        let (p, upvoted) = svc.toggle_upvote("u2", &post.id).unwrap();
        assert!(upvoted);
        assert_eq!(p.upvotes, vec!["u2"]);

        let (p, upvoted) = svc.toggle_upvote("u2", &post.id).unwrap();
        assert!(!upvoted);
        assert!(p.upvotes.is_empty());
    }
}
