//! Login.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::error::ApiError;
use crate::AppState;
use stockroom_core::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
}

/// POST /auth/login
///
/// Verifies the credentials and issues a bearer token. Unknown usernames
/// and wrong passwords are indistinguishable to the caller: both are 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.db.users().get_by_username(&req.username).await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            warn!(username = %req.username, "Login rejected");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    let token = state.jwt.issue_token(&user)?;

    info!(user_id = %user.id, username = %user.username, "Login");

    Ok(Json(LoginResponse {
        token,
        user: UserSummary {
            id: user.id,
            username: user.username,
            role: user.role,
        },
    }))
}
