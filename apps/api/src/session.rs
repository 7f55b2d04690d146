//! Per-request session.
//!
//! Authentication is an explicit value, not ambient state: every protected
//! handler takes an [`AuthSession`] argument, extracted from the bearer
//! token. Extraction failing means 401; a session with too low a role for
//! the operation means 403. The two are distinct outcomes.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::AppState;
use stockroom_core::Role;

/// The authenticated caller of one request.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

impl AuthSession {
    /// Checks that the session holds at least `role`.
    ///
    /// Roles are totally ordered (`Staff < Manager < Admin`), so this is a
    /// plain comparison.
    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.role >= role {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Requires {} role or above",
                role
            )))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::unauthorized("Expected a bearer token"))?;

        let claims = state.jwt.validate_token(token)?;

        Ok(AuthSession {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session(role: Role) -> AuthSession {
        AuthSession {
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            role,
        }
    }

    #[test]
    fn test_role_gate() {
        assert!(session(Role::Admin).require(Role::Manager).is_ok());
        assert!(session(Role::Manager).require(Role::Manager).is_ok());

        let err = session(Role::Staff).require(Role::Manager).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
