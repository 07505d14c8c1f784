use chrono::{TimeZone, Utc};
use serde::Serialize;

use careerdost_core::ServiceError;

const DEFAULT_BASE_URL: &str = "https://codeforces.com/api";

/// An upcoming contest as fetched from a platform, before a user saves it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingContest {
    /// Stable slug, e.g. `codeforces-1934`.
    pub slug: String,
    pub name: String,
    pub platform: String,
    /// RFC 3339 start time.
    pub start_time: String,
    /// RFC 3339 end time.
    pub end_time: String,
    pub url: String,
}

/// Client for the Codeforces public API.
///
/// Codeforces wraps every response in `{"status": "OK"|"FAILED",
/// "result": ..., "comment": ...}`; a FAILED status arrives with
/// HTTP 200, so both layers are checked.
pub struct CodeforcesClient {
    http: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call(&self, path: &str) -> Result<serde_json::Value, ServiceError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("codeforces request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "codeforces returned {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("codeforces response parse failed: {}", e)))?;

        if body["status"] != "OK" {
            let comment = body["comment"].as_str().unwrap_or("unknown error");
            return Err(ServiceError::Upstream(format!(
                "codeforces rejected the request: {}",
                comment
            )));
        }

        Ok(body["result"].clone())
    }

    /// Fetch public profile info for a handle.
    pub async fn user_info(&self, handle: &str) -> Result<serde_json::Value, ServiceError> {
        if handle.trim().is_empty() {
            return Err(ServiceError::Validation("handle is required".into()));
        }
        let result = self.call(&format!("user.info?handles={}", handle)).await?;
        result
            .as_array()
            .and_then(|arr| arr.first())
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("codeforces user '{}'", handle)))
    }

    /// Fetch contests that have not started yet, soonest first.
    pub async fn upcoming_contests(&self) -> Result<Vec<UpcomingContest>, ServiceError> {
        let result = self.call("contest.list?gym=false").await?;
        parse_upcoming(&result)
    }
}

impl Default for CodeforcesClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a `contest.list` result to upcoming contests (phase BEFORE),
/// soonest first. Entries missing required fields are skipped.
fn parse_upcoming(result: &serde_json::Value) -> Result<Vec<UpcomingContest>, ServiceError> {
    let entries = result
        .as_array()
        .ok_or_else(|| ServiceError::Upstream("unexpected contest.list shape".into()))?;

    let mut contests = Vec::new();
    for entry in entries {
        if entry["phase"] != "BEFORE" {
            continue;
        }
        let (Some(id), Some(name), Some(start), Some(duration)) = (
            entry["id"].as_i64(),
            entry["name"].as_str(),
            entry["startTimeSeconds"].as_i64(),
            entry["durationSeconds"].as_i64(),
        ) else {
            continue;
        };

        let Some(start_time) = Utc.timestamp_opt(start, 0).single() else {
            continue;
        };
        let end_time = start_time + chrono::Duration::seconds(duration);

        contests.push(UpcomingContest {
            slug: format!("codeforces-{}", id),
            name: name.to_string(),
            platform: "Codeforces".to_string(),
            start_time: start_time.to_rfc3339(),
            end_time: end_time.to_rfc3339(),
            url: format!("https://codeforces.com/contest/{}", id),
        });
    }

    contests.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    Ok(contests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upcoming_filters_and_sorts() {
        let result = serde_json::json!([
            {
                "id": 2001, "name": "Round B", "phase": "BEFORE",
                "startTimeSeconds": 1900000000i64, "durationSeconds": 7200
            },
            {
                "id": 1999, "name": "Finished Round", "phase": "FINISHED",
                "startTimeSeconds": 1700000000i64, "durationSeconds": 7200
            },
            {
                "id": 2000, "name": "Round A", "phase": "BEFORE",
                "startTimeSeconds": 1890000000i64, "durationSeconds": 9000
            },
        ]);

        let contests = parse_upcoming(&result).unwrap();
        assert_eq!(contests.len(), 2);
        assert_eq!(contests[0].name, "Round A"); // earlier start first
        assert_eq!(contests[0].slug, "codeforces-2000");
        assert_eq!(contests[1].slug, "codeforces-2001");
        assert!(contests[0].url.ends_with("/contest/2000"));
    }

    #[test]
    fn test_parse_upcoming_skips_malformed_entries() {
        let result = serde_json::json!([
            {"id": 1, "phase": "BEFORE"}, // no name/times
            {"id": 2, "name": "Ok", "phase": "BEFORE",
             "startTimeSeconds": 1890000000i64, "durationSeconds": 3600},
        ]);
        let contests = parse_upcoming(&result).unwrap();
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].name, "Ok");
    }

    #[test]
    fn test_parse_upcoming_rejects_non_array() {
        assert!(parse_upcoming(&serde_json::json!({"nope": true})).is_err());
    }
}
