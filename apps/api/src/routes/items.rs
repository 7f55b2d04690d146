//! Items: search, creation, and the low-stock listing.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::session::AuthSession;
use crate::AppState;
use stockroom_core::validation::{validate_name, validate_price_cents, validate_sku};
use stockroom_core::{Item, Role, ValidationError};
use stockroom_db::{ItemWithCategory, NewItem};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default)]
    pub purchase_price_cents: i64,
    #[serde(default)]
    pub sale_price_cents: i64,
    pub category_id: Option<String>,
}

/// GET /items?q=
///
/// Case-insensitive substring search over name and SKU; no query lists
/// everything.
pub async fn search_items(
    session: AuthSession,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItemWithCategory>>, ApiError> {
    session.require(Role::Staff)?;

    let items = state.db.items().search(query.q.as_deref()).await?;
    Ok(Json(items))
}

/// POST /items
///
/// A duplicate SKU is a 409; an unknown category reference a 400.
pub async fn create_item(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    session.require(Role::Manager)?;

    let name = req.name.unwrap_or_default();
    validate_name(&name)?;
    let sku = req.sku.unwrap_or_default();
    validate_sku(&sku)?;
    validate_price_cents("purchasePriceCents", req.purchase_price_cents)?;
    validate_price_cents("salePriceCents", req.sale_price_cents)?;
    for (field, value) in [("quantity", req.quantity), ("reorderLevel", req.reorder_level)] {
        if value < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: field.to_string(),
            }
            .into());
        }
    }

    let item = state
        .db
        .items()
        .create(NewItem {
            name: name.trim().to_string(),
            sku: sku.trim().to_string(),
            quantity: req.quantity,
            reorder_level: req.reorder_level,
            purchase_price_cents: req.purchase_price_cents,
            sale_price_cents: req.sale_price_cents,
            category_id: req.category_id,
        })
        .await?;

    info!(item_id = %item.id, sku = %item.sku, "Item created");

    Ok(Json(item))
}

/// GET /items/low-stock
///
/// Exactly the items with `quantity <= reorder_level`.
pub async fn low_stock_items(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Item>>, ApiError> {
    session.require(Role::Staff)?;

    let items = state.db.items().low_stock().await?;
    Ok(Json(items))
}
