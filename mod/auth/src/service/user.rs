use chrono::{DateTime, Utc};
use tracing::{error, warn};

use careerdost_core::{new_id, now_rfc3339};

use crate::model::{LoginRequest, PublicUser, RegisterRequest, User};
use crate::service::password::{hash_password, verify_password};
use crate::service::{AuthError, AuthService};
use crate::streak::{format_day, record_login};

impl AuthService {
    /// Register a new account. The email must not be taken.
    ///
    /// Registration does not count as a login — streak history starts with
    /// the first `POST /auth/login`.
    pub fn register(&self, input: RegisterRequest) -> Result<User, AuthError> {
        let name = input.name.trim();
        let email = input.email.trim().to_lowercase();
        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "name, email and password are required".into(),
            ));
        }

        if self.find_by_email(&email)?.is_some() {
            return Err(AuthError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }

        let now = now_rfc3339();
        let user = User {
            id: new_id(),
            name: name.to_string(),
            email,
            password_hash: hash_password(&input.password)?,
            avatar: None,
            login_dates: Vec::new(),
            current_streak: 0,
            max_streak: 0,
            created_at: now.clone(),
            updated_at: now,
        };

        self.users.insert(&user)?;
        Ok(user)
    }

    /// Authenticate with email/password and record the login event.
    ///
    /// After the password check passes, the streak tracker recomputes the
    /// login history and counters, and the user document is replaced in a
    /// single write (history and both counters land together). Streak
    /// trouble is non-fatal: authentication succeeds either way.
    pub fn login(&self, input: LoginRequest, now: DateTime<Utc>) -> Result<User, AuthError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }

        let mut user = self
            .find_by_email(&email)?
            .ok_or_else(|| AuthError::Unauthorized("invalid email or password".into()))?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AuthError::Unauthorized("invalid email or password".into()));
        }

        match record_login(&user.login_dates, now, user.current_streak, user.max_streak) {
            Ok(update) if update.changed => {
                let prior = (
                    std::mem::take(&mut user.login_dates),
                    user.current_streak,
                    user.max_streak,
                );
                user.login_dates = update.login_dates.iter().map(|d| format_day(*d)).collect();
                user.current_streak = update.current_streak;
                user.max_streak = update.max_streak;
                user.updated_at = now_rfc3339();

                if let Err(e) = self.users.replace(&user) {
                    // The write failed, so the stored state is still the
                    // prior one — report that, keep the login itself alive.
                    error!(user = %user.id, "failed to persist streak update: {}", e);
                    (user.login_dates, user.current_streak, user.max_streak) = prior;
                }
            }
            Ok(_) => {} // already logged in today
            Err(e) => {
                warn!(user = %user.id, "streak computation skipped: {}", e);
            }
        }

        Ok(user)
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Result<User, AuthError> {
        Ok(self.users.require(id)?)
    }

    /// Client-facing projection of a user.
    pub fn public_user(&self, id: &str) -> Result<PublicUser, AuthError> {
        Ok(PublicUser::from(&self.get_user(id)?))
    }

    /// Find a user by email (scans the collection).
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .find(|u| u.email == email)?
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_util::test_service;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn register(svc: &AuthService, email: &str) -> User {
        svc.register(RegisterRequest {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        })
        .unwrap()
    }

    fn login(svc: &AuthService, email: &str, now: DateTime<Utc>) -> User {
        svc.login(
            LoginRequest {
                email: email.to_string(),
                password: "secret123".to_string(),
            },
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_duplicate_email() {
        let (svc, _tmp) = test_service();

        let user = register(&svc, "asha@example.com");
        assert_eq!(user.current_streak, 0);
        assert!(user.login_dates.is_empty());

        let err = svc
            .register(RegisterRequest {
                name: "Other".to_string(),
                email: "Asha@Example.com".to_string(), // case-insensitive
                password: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
    }

    #[test]
    fn test_login_wrong_password() {
        let (svc, _tmp) = test_service();
        register(&svc, "asha@example.com");

        let err = svc
            .login(
                LoginRequest {
                    email: "asha@example.com".to_string(),
                    password: "wrong".to_string(),
                },
                at(2024, 1, 1),
            )
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(_)));
    }

    #[test]
    fn test_login_builds_streak_and_persists() {
        let (svc, _tmp) = test_service();
        let user = register(&svc, "asha@example.com");

        let u1 = login(&svc, "asha@example.com", at(2024, 1, 1));
        assert_eq!(u1.current_streak, 1);
        assert_eq!(u1.max_streak, 1);

        let u2 = login(&svc, "asha@example.com", at(2024, 1, 2));
        assert_eq!(u2.current_streak, 2);

        // Second login on the same day changes nothing.
        let u3 = login(&svc, "asha@example.com", at(2024, 1, 2));
        assert_eq!(u3.current_streak, 2);
        assert_eq!(u3.login_dates, vec!["2024-01-01", "2024-01-02"]);

        // Break the streak; max survives.
        let u4 = login(&svc, "asha@example.com", at(2024, 1, 9));
        assert_eq!(u4.current_streak, 1);
        assert_eq!(u4.max_streak, 2);

        // And it all round-trips through the store.
        let stored = svc.get_user(&user.id).unwrap();
        assert_eq!(stored.current_streak, 1);
        assert_eq!(stored.max_streak, 2);
        assert_eq!(stored.login_dates.len(), 3);
    }

    #[test]
    fn test_corrupt_history_does_not_block_login() {
        let (svc, _tmp) = test_service();
        let mut user = register(&svc, "asha@example.com");

        user.login_dates = vec!["garbage".to_string()];
        svc.users.replace(&user).unwrap();

        // Login still succeeds; counters are untouched.
        let logged_in = login(&svc, "asha@example.com", at(2024, 1, 1));
        assert_eq!(logged_in.current_streak, 0);
        assert_eq!(logged_in.login_dates, vec!["garbage"]);
    }

    #[test]
    fn test_public_user_has_no_hash() {
        let (svc, _tmp) = test_service();
        let user = register(&svc, "asha@example.com");

        let public = svc.public_user(&user.id).unwrap();
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "asha@example.com");
    }
}
