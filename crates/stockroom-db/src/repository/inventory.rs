//! # Inventory Transaction Repository
//!
//! The stock movement ledger. `record_transaction` is the only way stock
//! enters, leaves, or is corrected outside of a sale, and it always commits
//! the ledger insert and the item update as one SQL transaction.
//!
//! ## Serialization of concurrent movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Two concurrent OUT(30) movements, item starts at quantity 50   │
//! │                                                                 │
//! │  A: BEGIN                          B: BEGIN                     │
//! │  A: UPDATE items                   B: UPDATE items              │
//! │     SET quantity = quantity - 30      (waits on write lock)     │
//! │     WHERE id = ? AND quantity >= 30                             │
//! │  A: INSERT ledger row                                           │
//! │  A: COMMIT ──────────────────────► B: update runs, guard sees   │
//! │                                       quantity 20 < 30          │
//! │                                    B: InsufficientStock,        │
//! │                                       ROLLBACK                  │
//! │                                                                 │
//! │  The guarded UPDATE is an in-database read-modify-write, so     │
//! │  both movements observing quantity 50 and committing is         │
//! │  impossible: no lost updates.                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use stockroom_core::validation::{validate_note, validate_quantity};
use stockroom_core::{CoreError, InventoryTxn, Item, TxnKind};

/// Repository for the inventory movement ledger.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Records a stock movement and applies it to the item, atomically.
    ///
    /// - `In` adds `quantity`, `Out` subtracts it, `Adjust` replaces the
    ///   stock level outright.
    /// - An `Out` that would drive the quantity negative fails with
    ///   `InsufficientStock` and leaves both the ledger and the item
    ///   untouched.
    /// - Unknown `item_id` fails with NotFound.
    ///
    /// Returns the ledger entry and the item as committed.
    pub async fn record_transaction(
        &self,
        item_id: &str,
        kind: TxnKind,
        quantity: i64,
        note: Option<&str>,
    ) -> DbResult<(InventoryTxn, Item)> {
        validate_quantity(quantity).map_err(CoreError::from)?;
        validate_note(note).map_err(CoreError::from)?;

        debug!(item_id = %item_id, kind = %kind, quantity = quantity, "Recording inventory transaction");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Guarded in-database read-modify-write. Putting the arithmetic in
        // the UPDATE itself (rather than read, compute, write) is what
        // makes concurrent movements against one item serialize.
        let updated = match kind {
            TxnKind::In => {
                sqlx::query(
                    "UPDATE items SET quantity = quantity + ?1, updated_at = ?2 WHERE id = ?3",
                )
                .bind(quantity)
                .bind(now)
                .bind(item_id)
                .execute(&mut *tx)
                .await?
            }
            TxnKind::Out => {
                sqlx::query(
                    "UPDATE items SET quantity = quantity - ?1, updated_at = ?2 \
                     WHERE id = ?3 AND quantity >= ?4",
                )
                .bind(quantity)
                .bind(now)
                .bind(item_id)
                .bind(quantity)
                .execute(&mut *tx)
                .await?
            }
            TxnKind::Adjust => {
                sqlx::query("UPDATE items SET quantity = ?1, updated_at = ?2 WHERE id = ?3")
                    .bind(quantity)
                    .bind(now)
                    .bind(item_id)
                    .execute(&mut *tx)
                    .await?
            }
        };

        if updated.rows_affected() == 0 {
            // Either the item doesn't exist, or the OUT guard refused.
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

        let txn = InventoryTxn {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            kind,
            quantity,
            note: note.map(|n| n.to_string()),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO inventory_txns (id, item_id, kind, quantity, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.item_id)
        .bind(txn.kind)
        .bind(txn.quantity)
        .bind(&txn.note)
        .bind(txn.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            txn_id = %txn.id,
            item_id = %item_id,
            kind = %kind,
            quantity = quantity,
            new_quantity = item.quantity,
            "Inventory transaction committed"
        );

        Ok((txn, item))
    }

    /// Lists the ledger entries for one item in commit order.
    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<InventoryTxn>> {
        let txns = sqlx::query_as::<_, InventoryTxn>(
            r#"
            SELECT id, item_id, kind, quantity, note, created_at
            FROM inventory_txns
            WHERE item_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(txns)
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

    async fn item_with_stock(db: &Database, sku: &str, quantity: i64) -> Item {
        db.items()
            .create(NewItem {
                name: format!("Item {sku}"),
                sku: sku.to_string(),
                quantity,
                reorder_level: 10,
                purchase_price_cents: 200,
                sale_price_cents: 350,
                category_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_in_out_adjust_fold() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = item_with_stock(&db, "TEA-001", 0).await;
        let inv = db.inventory();

        let (_, after) = inv
            .record_transaction(&item.id, TxnKind::In, 50, Some("Initial stock"))
            .await
            .unwrap();
        assert_eq!(after.quantity, 50);

        let (_, after) = inv
            .record_transaction(&item.id, TxnKind::Out, 45, None)
            .await
            .unwrap();
        assert_eq!(after.quantity, 5);

        let (_, after) = inv
            .record_transaction(&item.id, TxnKind::Adjust, 20, Some("Stocktake"))
            .await
            .unwrap();
        assert_eq!(after.quantity, 20);

        // Final quantity equals the ledger folded in commit order.
        let ledger = inv.list_for_item(&item.id).await.unwrap();
        let folded = ledger
            .iter()
            .fold(0, |acc, t| t.kind.apply(acc, t.quantity));
        assert_eq!(folded, 20);

        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, folded);
    }

    #[tokio::test]
    async fn test_out_below_zero_is_refused_and_nothing_committed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = item_with_stock(&db, "TEA-001", 5).await;

        let err = db
            .inventory()
            .record_transaction(&item.id, TxnKind::Out, 6, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            })
        ));

        // No ledger entry, no quantity change.
        assert!(db.inventory().list_for_item(&item.id).await.unwrap().is_empty());
        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 5);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .inventory()
            .record_transaction("missing", TxnKind::In, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected_for_every_kind() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = item_with_stock(&db, "TEA-001", 5).await;
        let inv = db.inventory();

        for kind in [TxnKind::In, TxnKind::Out, TxnKind::Adjust] {
            let err = inv
                .record_transaction(&item.id, kind, 0, None)
                .await
                .unwrap_err();
            assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
        }

        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 5);
        assert!(inv.list_for_item(&item.id).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_out_movements_serialize() {
        // On-disk database so the two tasks use separate connections.
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("stockroom.db")).max_connections(4);
        let db = Database::new(config).await.unwrap();
        let item = item_with_stock(&db, "TEA-001", 50).await;

        let a = {
            let db = db.clone();
            let id = item.id.clone();
            tokio::spawn(
                async move { db.inventory().record_transaction(&id, TxnKind::Out, 30, None).await },
            )
        };
        let b = {
            let db = db.clone();
            let id = item.id.clone();
            tokio::spawn(
                async move { db.inventory().record_transaction(&id, TxnKind::Out, 30, None).await },
            )
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();

        // Both movements read 50 and committing would require 60 units;
        // the guard lets exactly one through.
        assert_eq!(successes, 1);

        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 20);
        assert_eq!(db.inventory().list_for_item(&item.id).await.unwrap().len(), 1);
    }
}
