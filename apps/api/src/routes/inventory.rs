//! Inventory transactions.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::notify::StockEvent;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::{InventoryTxn, Item, Role, TxnKind, ValidationError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTxnRequest {
    pub item_id: Option<String>,
    /// "IN", "OUT", or "ADJUST".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub quantity: Option<i64>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordTxnResponse {
    pub txn: InventoryTxn,
    pub item: Item,
}

/// POST /inventory/txn
///
/// Records a stock movement. The ledger entry and the item update commit
/// as one atomic unit; the response carries both sides of it.
pub async fn record_transaction(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<RecordTxnRequest>,
) -> Result<Json<RecordTxnResponse>, ApiError> {
    session.require(Role::Staff)?;

    let item_id = req.item_id.unwrap_or_default();
    if item_id.is_empty() {
        return Err(ValidationError::Required {
            field: "itemId".to_string(),
        }
        .into());
    }

    let kind = match req.kind.as_deref() {
        Some("IN") => TxnKind::In,
        Some("OUT") => TxnKind::Out,
        Some("ADJUST") => TxnKind::Adjust,
        _ => {
            return Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec!["IN".to_string(), "OUT".to_string(), "ADJUST".to_string()],
            }
            .into())
        }
    };

    let quantity = req.quantity.ok_or_else(|| ValidationError::Required {
        field: "quantity".to_string(),
    })?;

    let (txn, item) = state
        .db
        .inventory()
        .record_transaction(&item_id, kind, quantity, req.note.as_deref())
        .await?;

    // Post-commit, fire-and-forget: a full channel or a dead notifier must
    // not fail the request.
    if let Err(e) = state.stock_events.try_send(StockEvent {
        item_id: item.id.clone(),
    }) {
        debug!(error = %e, "Stock event dropped");
    }

    Ok(Json(RecordTxnResponse { txn, item }))
}
