use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use careerdost_core::ServiceError;

use auth::service::AuthService;
use contest::service::ContestService;
use library::service::LibraryService;
use planner::model::GoalStatus;
use planner::service::PlannerService;
use roadmap::service::RoadmapService;

/// Dashboard headline numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub bookmarked_resources: usize,
    pub contests_participated: usize,
    pub active_goals: usize,
    pub current_streak: u32,
}

/// One cell of the activity heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityDay {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    pub count: usize,
}

/// One spoke of the skill radar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSlice {
    pub subject: String,
    /// Completed milestones touching this skill.
    #[serde(rename = "A")]
    pub a: usize,
    /// All milestones touching this skill.
    pub full_mark: usize,
}

pub struct AnalyticsService {
    auth: Arc<AuthService>,
    planner: Arc<PlannerService>,
    roadmap: Arc<RoadmapService>,
    contest: Arc<ContestService>,
    library: Arc<LibraryService>,
}

impl AnalyticsService {
    pub fn new(
        auth: Arc<AuthService>,
        planner: Arc<PlannerService>,
        roadmap: Arc<RoadmapService>,
        contest: Arc<ContestService>,
        library: Arc<LibraryService>,
    ) -> Arc<Self> {
        Arc::new(Self {
            auth,
            planner,
            roadmap,
            contest,
            library,
        })
    }

    /// Headline dashboard numbers for one user.
    pub fn dashboard_stats(&self, user: &str) -> Result<DashboardStats, ServiceError> {
        let tasks = self.planner.list_tasks(user)?;
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();

        let goals = self.planner.list_goals(user)?;
        let active_goals = goals
            .iter()
            .filter(|g| g.status != GoalStatus::Completed)
            .count();

        let now = Utc::now();
        let contests_participated = self
            .contest
            .list_contests(user)?
            .iter()
            .filter(|c| {
                DateTime::parse_from_rfc3339(&c.end_time)
                    .map(|end| end.with_timezone(&Utc) < now)
                    .unwrap_or(false)
            })
            .count();

        let account = self.auth.get_user(user).map_err(ServiceError::from)?;

        Ok(DashboardStats {
            total_tasks: tasks.len(),
            completed_tasks,
            pending_tasks: tasks.len() - completed_tasks,
            bookmarked_resources: self.library.count_bookmarks(user)?,
            contests_participated,
            active_goals,
            current_streak: account.current_streak,
        })
    }

    /// Daily activity buckets: a login day counts 1, plus one per task
    /// created that day. A light proxy, but enough for the heatmap.
    pub fn activity_heatmap(&self, user: &str) -> Result<Vec<ActivityDay>, ServiceError> {
        let mut buckets: BTreeMap<String, usize> = BTreeMap::new();

        let account = self.auth.get_user(user).map_err(ServiceError::from)?;
        for day in &account.login_dates {
            *buckets.entry(day.clone()).or_default() += 1;
        }

        for task in self.planner.list_tasks(user)? {
            // RFC 3339 timestamps start with the calendar day.
            if let Some(day) = task.created_at.get(..10) {
                *buckets.entry(day.to_string()).or_default() += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(date, count)| ActivityDay { date, count })
            .collect())
    }

    /// Skill radar: for every skill named by the user's career-path
    /// milestones, completed vs. total milestones touching it.
    pub fn skill_distribution(&self, user: &str) -> Result<Vec<SkillSlice>, ServiceError> {
        let mut totals: BTreeMap<String, (usize, usize)> = BTreeMap::new();

        for path in self.roadmap.list_paths(user)? {
            for milestone in &path.milestones {
                for skill in &milestone.skills {
                    let entry = totals.entry(skill.clone()).or_default();
                    entry.1 += 1;
                    if milestone.completed {
                        entry.0 += 1;
                    }
                }
            }
        }

        Ok(totals
            .into_iter()
            .map(|(subject, (done, total))| SkillSlice {
                subject,
                a: done,
                full_mark: total,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::model::{LoginRequest, RegisterRequest};
    use auth::service::AuthConfig;
    use careerdost_kv::{KVStore, RedbStore};
    use chrono::TimeZone;
    use planner::model::{CreateTask, TaskCategory, TaskPriority};
    use roadmap::model::{CreateCareerPath, Milestone};

    struct Fixture {
        analytics: Arc<AnalyticsService>,
        auth: Arc<AuthService>,
        planner: Arc<PlannerService>,
        roadmap: Arc<RoadmapService>,
        _tmp: tempfile::NamedTempFile,
        _search_dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let search_dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(tmp.path()).unwrap());

        let auth = AuthService::new(Arc::clone(&kv), AuthConfig::default());
        let planner = PlannerService::new(Arc::clone(&kv));
        let roadmap = RoadmapService::new(Arc::clone(&kv));
        let contest = ContestService::new(
            Arc::clone(&kv),
            Arc::new(platform::CodeforcesClient::new()),
        );
        let library = LibraryService::new(
            Arc::clone(&kv),
            Arc::new(careerdost_search::TantivyIndex::open(search_dir.path()).unwrap()),
        );

        Fixture {
            analytics: AnalyticsService::new(
                Arc::clone(&auth),
                Arc::clone(&planner),
                Arc::clone(&roadmap),
                contest,
                library,
            ),
            auth,
            planner,
            roadmap,
            _tmp: tmp,
            _search_dir: search_dir,
        }
    }

    fn signed_in_user(fx: &Fixture) -> String {
        fx.auth
            .register(RegisterRequest {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .unwrap();
        let user = fx
            .auth
            .login(
                LoginRequest {
                    email: "asha@example.com".to_string(),
                    password: "secret123".to_string(),
                },
                Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap(),
            )
            .unwrap();
        user.id
    }

    #[test]
    fn test_dashboard_stats() {
        let fx = fixture();
        let user = signed_in_user(&fx);

        let task = fx
            .planner
            .create_task(
                &user,
                CreateTask {
                    title: "solve two-sum".to_string(),
                    category: TaskCategory::Dsa,
                    priority: TaskPriority::default(),
                    due_date: None,
                },
            )
            .unwrap();
        fx.planner
            .update_task(&user, &task.id, serde_json::json!({"completed": true}))
            .unwrap();
        fx.planner
            .create_task(
                &user,
                CreateTask {
                    title: "revise graphs".to_string(),
                    category: TaskCategory::Dsa,
                    priority: TaskPriority::default(),
                    due_date: None,
                },
            )
            .unwrap();

        let stats = fx.analytics.dashboard_stats(&user).unwrap();
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.pending_tasks, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.bookmarked_resources, 0);
    }

    #[test]
    fn test_activity_heatmap_buckets_by_day() {
        let fx = fixture();
        let user = signed_in_user(&fx);

        fx.planner
            .create_task(
                &user,
                CreateTask {
                    title: "a".to_string(),
                    category: TaskCategory::Learning,
                    priority: TaskPriority::default(),
                    due_date: None,
                },
            )
            .unwrap();

        let heatmap = fx.analytics.activity_heatmap(&user).unwrap();
        // One bucket for the login day, one for today's task creation
        // (they may coincide depending on the clock, so just check totals).
        let total: usize = heatmap.iter().map(|d| d.count).sum();
        assert_eq!(total, 2);
        assert!(heatmap.iter().any(|d| d.date == "2026-08-07"));
    }

    #[test]
    fn test_skill_distribution() {
        let fx = fixture();
        let user = signed_in_user(&fx);

        fx.roadmap
            .create_path(
                &user,
                CreateCareerPath {
                    name: "Backend".to_string(),
                    description: "track".to_string(),
                    icon: "server".to_string(),
                    difficulty: "Intermediate".to_string(),
                    estimated_duration: "6 months".to_string(),
                    milestones: vec![
                        Milestone {
                            title: "sql".to_string(),
                            description: None,
                            completed: true,
                            due_date: None,
                            skills: vec!["databases".to_string()],
                        },
                        Milestone {
                            title: "indexes".to_string(),
                            description: None,
                            completed: false,
                            due_date: None,
                            skills: vec!["databases".to_string()],
                        },
                        Milestone {
                            title: "http".to_string(),
                            description: None,
                            completed: false,
                            due_date: None,
                            skills: vec!["networking".to_string()],
                        },
                    ],
                },
            )
            .unwrap();

        let skills = fx.analytics.skill_distribution(&user).unwrap();
        assert_eq!(skills.len(), 2);

        let databases = skills.iter().find(|s| s.subject == "databases").unwrap();
        assert_eq!(databases.a, 1);
        assert_eq!(databases.full_mark, 2);
    }
}
