use jsonwebtoken::{DecodingKey, Validation};

use crate::authz::{Actor, RoleFlags};
use crate::errors::AppError;

/// Claims the API puts into a staff access token
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub user_id: i64,
    #[serde(default)]
    pub role: RoleFlags,
    #[serde(default)]
    pub office_id: Option<i64>,
    pub exp: usize,
}

/// Authenticated staff session derived from an access token
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    actor: Actor,
}

impl Session {
    /// Read the actor out of `token`.
    ///
    /// The signature is not checked here; the API verifies it on every request.
    /// Expired tokens are rejected.
    pub fn from_token(token: &str) -> Result<Self, AppError> {
        let claims = decode_claims(token)?;

        let mut actor = Actor::new(claims.user_id).with_role(claims.role);
        actor.office_id = claims.office_id;

        tracing::debug!(user_id = actor.user_id, "session restored from token");

        Ok(Self {
            token: token.to_string(),
            actor,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Session for commands that work without one.
///
/// A missing token means no session. An invalid or expired token is dropped with
/// a warning, so the caller carries on as not logged in.
pub fn optional_session(token: Option<&str>) -> Option<Session> {
    let token = token?;
    match Session::from_token(token) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unusable access token");
            None
        }
    }
}

/// Session for commands that act on behalf of the actor; a missing or unusable token is an error.
pub fn required_session(token: Option<&str>) -> Result<Session, AppError> {
    let token = token.ok_or_else(|| AppError::unauthorized("TROIKA_TOKEN not set"))?;
    Session::from_token(token)
}

pub fn decode_claims(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = true;
    validation.leeway = 0;

    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|err| AppError::token(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    fn token_with(exp: i64, role: serde_json::Value) -> String {
        let claims = serde_json::json!({
            "user_id": 42,
            "role": role,
            "office_id": 7,
            "exp": exp,
        });
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    #[test]
    fn restores_actor_from_valid_token() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = token_with(exp, serde_json::json!({"admin": false, "moderator": true, "staff": true}));

        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.actor().user_id, 42);
        assert_eq!(session.actor().office_id, Some(7));
        assert_eq!(session.actor().role, RoleFlags::new(false, true, true));
        assert_eq!(session.token(), token);
    }

    #[test]
    fn partial_role_claim_fails_closed() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = token_with(exp, serde_json::json!({"staff": true}));

        let session = Session::from_token(&token).unwrap();
        assert!(!session.actor().is_admin());
        assert!(!session.actor().is_moderator());
        assert!(session.actor().is_staff());
    }

    #[test]
    fn rejects_expired_token() {
        let exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = token_with(exp, serde_json::json!({"admin": true}));

        let err = Session::from_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Token(_)));
    }

    #[test]
    fn rejects_token_expired_moments_ago() {
        let exp = (Utc::now() - Duration::seconds(30)).timestamp();
        let token = token_with(exp, serde_json::json!({"admin": true}));

        let err = Session::from_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Token(_)), "{err:?}");
    }

    #[test]
    fn optional_session_drops_unusable_tokens() {
        assert!(optional_session(None).is_none());
        assert!(optional_session(Some("garbage")).is_none());

        let expired = token_with((Utc::now() - Duration::seconds(30)).timestamp(), serde_json::json!({"staff": true}));
        assert!(optional_session(Some(&expired)).is_none());

        let valid = token_with((Utc::now() + Duration::hours(1)).timestamp(), serde_json::json!({"staff": true}));
        let session = optional_session(Some(&valid)).unwrap();
        assert_eq!(session.actor().user_id, 42);
    }

    #[test]
    fn unusable_token_means_login_redirect() {
        use crate::authz::routes::{guard, visible_sections, GuardDecision};

        let session = optional_session(Some("garbage"));
        let actor = session.as_ref().map(Session::actor);
        assert_eq!(guard(actor, "/orders"), GuardDecision::RedirectToLogin);
        assert!(visible_sections(actor).is_empty());
    }

    #[test]
    fn required_session_reports_missing_and_bad_tokens() {
        assert!(matches!(required_session(None), Err(AppError::Unauthorized(_))));
        assert!(matches!(required_session(Some("garbage")), Err(AppError::Token(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(Session::from_token("not-a-token"), Err(AppError::Token(_))));
    }
}
