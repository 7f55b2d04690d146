//! Categories. Read for STAFF, write for MANAGER.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::validation::validate_name;
use stockroom_core::{Category, Role};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

/// GET /categories
pub async fn list_categories(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    session.require(Role::Staff)?;

    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

/// POST /categories
///
/// A duplicate name is a 409.
pub async fn create_category(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    session.require(Role::Manager)?;

    let name = req.name.unwrap_or_default();
    validate_name(&name)?;

    let category = state.db.categories().create(&name).await?;

    info!(category_id = %category.id, name = %category.name, "Category created");

    Ok(Json(category))
}
