//! Dashboard overview. MANAGER only.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::error::ApiError;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::analytics::Overview;
use stockroom_core::Role;

/// GET /analytics/overview
///
/// Recomputed from scratch on every call: a zero-filled 30-day
/// sales-by-day series plus the low-stock count.
pub async fn overview(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Overview>, ApiError> {
    session.require(Role::Manager)?;

    let overview = state.db.analytics().overview(Utc::now()).await?;
    Ok(Json(overview))
}
