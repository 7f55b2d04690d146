//! Sales.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::notify::StockEvent;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::{Role, Sale, ValidationError, DEFAULT_SALE_QUANTITY};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleRequest {
    pub item_id: Option<String>,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i64>,
}

/// POST /sales
///
/// Decrements stock and appends the sale ledger entry atomically, tied to
/// the acting user from the session. Selling more than is on hand is a
/// 409 with the item unchanged.
pub async fn record_sale(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<RecordSaleRequest>,
) -> Result<Json<Sale>, ApiError> {
    session.require(Role::Staff)?;

    let item_id = req.item_id.unwrap_or_default();
    if item_id.is_empty() {
        return Err(ValidationError::Required {
            field: "itemId".to_string(),
        }
        .into());
    }

    let quantity = req.quantity.unwrap_or(DEFAULT_SALE_QUANTITY);

    let (sale, item) = state
        .db
        .sales()
        .record_sale(&item_id, quantity, &session.user_id)
        .await?;

    if let Err(e) = state.stock_events.try_send(StockEvent { item_id: item.id }) {
        debug!(error = %e, "Stock event dropped");
    }

    Ok(Json(sale))
}
