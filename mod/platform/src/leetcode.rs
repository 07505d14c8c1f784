use careerdost_core::ServiceError;

const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile { ranking reputation userAvatar }
    submitStatsGlobal {
      acSubmissionNum { difficulty count }
    }
  }
}"#;

const SUBMISSIONS_QUERY: &str = r#"
query recentSubmissions($username: String!, $limit: Int!) {
  recentSubmissionList(username: $username, limit: $limit) {
    title
    titleSlug
    timestamp
    statusDisplay
    lang
  }
}"#;

/// Client for LeetCode's unofficial GraphQL API.
pub struct LeetCodeClient {
    http: reqwest::Client,
    graphql_url: String,
}

impl LeetCodeClient {
    pub fn new() -> Self {
        Self::with_graphql_url(DEFAULT_GRAPHQL_URL)
    }

    /// Point the client at a different GraphQL endpoint (used by tests).
    pub fn with_graphql_url(graphql_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            graphql_url: graphql_url.to_string(),
        }
    }

    async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ServiceError> {
        let resp = self
            .http
            .post(&self.graphql_url)
            .json(&serde_json::json!({"query": query, "variables": variables}))
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("leetcode request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "leetcode returned {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("leetcode response parse failed: {}", e)))?;

        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            let message = errors
                .first()
                .and_then(|e| e["message"].as_str())
                .unwrap_or("unknown error");
            return Err(ServiceError::Upstream(format!(
                "leetcode rejected the query: {}",
                message
            )));
        }

        Ok(body["data"].clone())
    }

    /// Fetch a user's public profile and solve counts.
    pub async fn user_profile(&self, username: &str) -> Result<serde_json::Value, ServiceError> {
        if username.trim().is_empty() {
            return Err(ServiceError::Validation("username is required".into()));
        }
        let data = self
            .query(PROFILE_QUERY, serde_json::json!({"username": username}))
            .await?;

        let matched = &data["matchedUser"];
        if matched.is_null() {
            return Err(ServiceError::NotFound(format!(
                "leetcode user '{}'",
                username
            )));
        }
        Ok(matched.clone())
    }

    /// Fetch a user's recent submissions.
    pub async fn recent_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<serde_json::Value, ServiceError> {
        if username.trim().is_empty() {
            return Err(ServiceError::Validation("username is required".into()));
        }
        let data = self
            .query(
                SUBMISSIONS_QUERY,
                serde_json::json!({"username": username, "limit": limit}),
            )
            .await?;
        Ok(data["recentSubmissionList"].clone())
    }
}

impl Default for LeetCodeClient {
    fn default() -> Self {
        Self::new()
    }
}
