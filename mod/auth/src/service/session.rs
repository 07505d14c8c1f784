use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use careerdost_core::new_id;

use crate::model::{Claims, IssuedToken, Session, User};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Issue a signed JWT for a user and record the session.
    pub fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let session_id = new_id();
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::seconds(self.config.token_ttl);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            sid: session_id.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))?;

        let session = Session {
            id: session_id,
            user_id: user.id.clone(),
            issued_at: now.to_rfc3339(),
            expires_at: expires.to_rfc3339(),
            revoked: false,
        };
        self.sessions.insert(&session)?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.token_ttl,
        })
    }

    /// Verify and decode a JWT.
    /// Returns the claims if the signature is valid and the session is not
    /// revoked.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        let claims = token_data.claims;

        if let Ok(Some(session)) = self.sessions.get(&claims.sid) {
            if session.revoked {
                return Err(AuthError::Unauthorized("session has been revoked".into()));
            }
        }

        Ok(claims)
    }

    /// Revoke a session (its token becomes invalid).
    pub fn revoke_session(&self, session_id: &str) -> Result<(), AuthError> {
        let mut session = self.sessions.require(session_id)?;
        session.revoked = true;
        self.sessions.replace(&session)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::RegisterRequest;
    use crate::service::test_util::test_service;

    fn register(svc: &crate::service::AuthService) -> crate::model::User {
        svc.register(RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_token() {
        let (svc, _tmp) = test_service();
        let user = register(&svc);

        let issued = svc.issue_token(&user).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 604800);

        let claims = svc.verify_token(&issued.token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "Asha");
    }

    #[test]
    fn test_revoke_session() {
        let (svc, _tmp) = test_service();
        let user = register(&svc);

        let issued = svc.issue_token(&user).unwrap();
        let claims = svc.verify_token(&issued.token).unwrap();

        svc.revoke_session(&claims.sid).unwrap();
        assert!(svc.verify_token(&issued.token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let (svc, _tmp) = test_service();
        assert!(svc.verify_token("this.is.not.a.valid.jwt").is_err());
    }
}
