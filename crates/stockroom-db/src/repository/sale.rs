//! # Sale Repository
//!
//! The sales ledger. A sale decrements stock and records who sold what for
//! how much, in one SQL transaction. The amount is computed from the sale
//! price current at commit time.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use stockroom_core::validation::validate_quantity;
use stockroom_core::{CoreError, Item, Sale};

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale: decrements the item's stock and appends the sale
    /// ledger entry, atomically.
    ///
    /// Fails with `InsufficientStock` when `quantity` exceeds what is on
    /// hand - no partial sale, no backorder, item unchanged. Unknown
    /// `item_id` fails with NotFound.
    ///
    /// Returns the sale and the item as committed.
    pub async fn record_sale(
        &self,
        item_id: &str,
        quantity: i64,
        user_id: &str,
    ) -> DbResult<(Sale, Item)> {
        validate_quantity(quantity).map_err(CoreError::from)?;

        debug!(item_id = %item_id, quantity = quantity, user_id = %user_id, "Recording sale");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Guarded decrement; see InventoryRepository for the serialization
        // argument.
        let updated = sqlx::query(
            "UPDATE items SET quantity = quantity - ?1, updated_at = ?2 \
             WHERE id = ?3 AND quantity >= ?4",
        )
        .bind(quantity)
        .bind(now)
        .bind(item_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return match fetch_item(&mut tx, item_id).await? {
                None => Err(CoreError::ItemNotFound(item_id.to_string()).into()),
                Some(item) => Err(CoreError::InsufficientStock {
                    sku: item.sku,
                    available: item.quantity,
                    requested: quantity,
                }
                .into()),
            };
        }

        let item = fetch_item(&mut tx, item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            quantity,
            amount_cents: item.sale_price().times(quantity).cents(),
            user_id: user_id.to_string(),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales (id, item_id, quantity, amount_cents, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.item_id)
        .bind(sale.quantity)
        .bind(sale.amount_cents)
        .bind(&sale.user_id)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            item_id = %item_id,
            quantity = quantity,
            amount_cents = sale.amount_cents,
            new_quantity = item.quantity,
            "Sale committed"
        );

        Ok((sale, item))
    }

    /// Lists the sales for one item in commit order.
    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, item_id, quantity, amount_cents, user_id, created_at
            FROM sales
            WHERE item_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

/// Fetches an item inside an open transaction.
async fn fetch_item(tx: &mut Transaction<'_, Sqlite>, item_id: &str) -> DbResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, sku, quantity, reorder_level,
               purchase_price_cents, sale_price_cents, category_id,
               created_at, updated_at
        FROM items
        WHERE id = ?1
        "#,
    )
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::repository::item::NewItem;
    use crate::repository::user::NewUser;
    use stockroom_core::Role;

    async fn setup(quantity: i64) -> (Database, Item, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db
            .users()
            .create(NewUser {
                username: "cashier".to_string(),
                email: "cashier@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Staff,
            })
            .await
            .unwrap();
        let item = db
            .items()
            .create(NewItem {
                name: "Black Tea 250g".to_string(),
                sku: "TEA-001".to_string(),
                quantity,
                reorder_level: 10,
                purchase_price_cents: 200,
                sale_price_cents: 350,
                category_id: None,
            })
            .await
            .unwrap();
        (db, item, user.id)
    }

    #[tokio::test]
    async fn test_sale_decrements_stock_and_computes_amount() {
        let (db, item, user_id) = setup(50).await;

        let (sale, updated) = db.sales().record_sale(&item.id, 3, &user_id).await.unwrap();

        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.amount_cents, 3 * 350);
        assert_eq!(sale.user_id, user_id);
        assert_eq!(updated.quantity, 47);

        let ledger = db.sales().list_for_item(&item.id).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, sale.id);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_item_unchanged() {
        let (db, item, user_id) = setup(2).await;

        let err = db
            .sales()
            .record_sale(&item.id, 3, &user_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            })
        ));

        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 2);
        assert!(db.sales().list_for_item(&item.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_selling_exactly_the_stock_is_allowed() {
        let (db, item, user_id) = setup(3).await;

        let (_, updated) = db.sales().record_sale(&item.id, 3, &user_id).await.unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let (db, _, user_id) = setup(1).await;

        let err = db
            .sales()
            .record_sale("missing", 1, &user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected() {
        let (db, item, user_id) = setup(5).await;

        let err = db
            .sales()
            .record_sale(&item.id, 0, &user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
