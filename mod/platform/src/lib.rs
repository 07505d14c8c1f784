//! Platform module — proxies to competitive-programming site APIs.
//!
//! Thin clients for Codeforces (REST) and LeetCode (GraphQL) plus the
//! proxy endpoints the frontend calls to show a student's handles. The
//! contest module reuses [`CodeforcesClient`] to pull the upcoming
//! contest list.

pub mod api;
pub mod codeforces;
pub mod leetcode;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

pub use codeforces::{CodeforcesClient, UpcomingContest};
pub use leetcode::LeetCodeClient;

pub struct PlatformModule {
    codeforces: Arc<CodeforcesClient>,
    leetcode: Arc<LeetCodeClient>,
}

impl PlatformModule {
    pub fn new() -> Self {
        Self {
            codeforces: Arc::new(CodeforcesClient::new()),
            leetcode: Arc::new(LeetCodeClient::new()),
        }
    }

    /// The Codeforces client, shared with the contest module.
    pub fn codeforces(&self) -> Arc<CodeforcesClient> {
        Arc::clone(&self.codeforces)
    }
}

impl Default for PlatformModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for PlatformModule {
    fn name(&self) -> &str {
        "platform"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.codeforces), Arc::clone(&self.leetcode))
    }
}
