//! User administration. ADMIN only.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::hash_password;
use crate::error::ApiError;
use crate::routes::auth::UserSummary;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::validation::validate_username;
use stockroom_core::{Role, User, ValidationError};
use stockroom_db::NewUser;

/// Password applied when an admin creates a user without one. The user is
/// expected to change it on first login.
const DEFAULT_PASSWORD: &str = "Password@123";

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// GET /users
pub async fn list_users(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    session.require(Role::Admin)?;

    let users = state.db.users().list().await?;
    Ok(Json(users))
}

/// POST /users
///
/// Role defaults to STAFF, the password to a fixed initial value. A
/// duplicate username is a 409.
pub async fn create_user(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    session.require(Role::Admin)?;

    let username = req.username.unwrap_or_default();
    validate_username(&username)?;

    let email = match req.email {
        Some(email) if !email.trim().is_empty() => email.trim().to_string(),
        _ => {
            return Err(ValidationError::Required {
                field: "email".to_string(),
            }
            .into())
        }
    };

    let password = req.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
    let password_hash = hash_password(password)?;

    let user = state
        .db
        .users()
        .create(NewUser {
            username: username.trim().to_string(),
            email,
            password_hash,
            role: req.role.unwrap_or_default(),
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, created_by = %session.username, "User created");

    Ok(Json(UserSummary {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}
