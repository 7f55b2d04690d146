//! # Item Repository
//!
//! Database operations for stocked items: creation, search, and the
//! low-stock listing. Quantity changes do NOT happen here - they are owned
//! by the ledger repositories so that every mutation commits together with
//! the ledger entry explaining it.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stockroom_core::Item;

/// Fields for creating an item. Stock arrives through IN transactions, so
/// the initial quantity is normally zero.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
    pub category_id: Option<String>,
}

/// An item joined with its category name, as returned by the search
/// listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: Item,
    pub category_name: Option<String>,
}

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Searches items by name or SKU substring, case-insensitive.
    ///
    /// An empty or missing query lists everything. Results are ordered by
    /// name and include the category name when the item has one.
    pub async fn search(&self, query: Option<&str>) -> DbResult<Vec<ItemWithCategory>> {
        let query = query.map(str::trim).unwrap_or("");

        debug!(query = %query, "Searching items");

        if query.is_empty() {
            let items = sqlx::query_as::<_, ItemWithCategory>(
                r#"
                SELECT
                    i.id, i.name, i.sku, i.quantity, i.reorder_level,
                    i.purchase_price_cents, i.sale_price_cents, i.category_id,
                    i.created_at, i.updated_at,
                    c.name AS category_name
                FROM items i
                LEFT JOIN categories c ON c.id = i.category_id
                ORDER BY i.name
                "#,
            )
            .fetch_all(&self.pool)
            .await?;
            return Ok(items);
        }

        // SQLite LIKE is case-insensitive for ASCII; escape the LIKE
        // metacharacters so the user's query is a literal substring.
        let escaped = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        let items = sqlx::query_as::<_, ItemWithCategory>(
            r#"
            SELECT
                i.id, i.name, i.sku, i.quantity, i.reorder_level,
                i.purchase_price_cents, i.sale_price_cents, i.category_id,
                i.created_at, i.updated_at,
                c.name AS category_name
            FROM items i
            LEFT JOIN categories c ON c.id = i.category_id
            WHERE i.name LIKE ?1 ESCAPE '\' OR i.sku LIKE ?1 ESCAPE '\'
            ORDER BY i.name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, sku, quantity, reorder_level,
                   purchase_price_cents, sale_price_cents, category_id,
                   created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, sku, quantity, reorder_level,
                   purchase_price_cents, sale_price_cents, category_id,
                   created_at, updated_at
            FROM items
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Creates an item.
    ///
    /// A duplicate SKU surfaces as `DbError::UniqueViolation`; an unknown
    /// category as `DbError::ForeignKeyViolation`.
    pub async fn create(&self, new: NewItem) -> DbResult<Item> {
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            sku: new.sku,
            quantity: new.quantity,
            reorder_level: new.reorder_level,
            purchase_price_cents: new.purchase_price_cents,
            sale_price_cents: new.sale_price_cents,
            category_id: new.category_id,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, sku = %item.sku, "Creating item");

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, sku, quantity, reorder_level,
                purchase_price_cents, sale_price_cents, category_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.quantity)
        .bind(item.reorder_level)
        .bind(item.purchase_price_cents)
        .bind(item.sale_price_cents)
        .bind(&item.category_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists items at or under their reorder level, lowest stock first.
    pub async fn low_stock(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, sku, quantity, reorder_level,
                   purchase_price_cents, sale_price_cents, category_id,
                   created_at, updated_at
            FROM items
            WHERE quantity <= reorder_level
            ORDER BY quantity, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    fn tea() -> NewItem {
        NewItem {
            name: "Black Tea 250g".to_string(),
            sku: "TEA-001".to_string(),
            quantity: 50,
            reorder_level: 10,
            purchase_price_cents: 200,
            sale_price_cents: 350,
            category_id: None,
        }
    }

    fn coffee() -> NewItem {
        NewItem {
            name: "Ground Coffee 500g".to_string(),
            sku: "COF-001".to_string(),
            quantity: 4,
            reorder_level: 5,
            purchase_price_cents: 700,
            sale_price_cents: 1200,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_search_matches_name_and_sku_case_insensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.items().create(tea()).await.unwrap();
        db.items().create(coffee()).await.unwrap();

        let by_name = db.items().search(Some("black")).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].item.sku, "TEA-001");

        let by_sku = db.items().search(Some("cof-")).await.unwrap();
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].item.name, "Ground Coffee 500g");

        let all = db.items().search(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let none = db.items().search(Some("100% juice")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_includes_category_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let beverages = db.categories().create("Beverages").await.unwrap();

        let mut item = tea();
        item.category_id = Some(beverages.id.clone());
        db.items().create(item).await.unwrap();

        let found = db.items().search(Some("TEA")).await.unwrap();
        assert_eq!(found[0].category_name.as_deref(), Some("Beverages"));
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.items().create(tea()).await.unwrap();

        let mut dup = tea();
        dup.name = "Other Tea".to_string();
        let err = db.items().create(dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_category_is_foreign_key_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut item = tea();
        item.category_id = Some("missing".to_string());
        let err = db.items().create(item).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_threshold_is_inclusive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        // quantity 50 > reorder 10: not low
        db.items().create(tea()).await.unwrap();
        // quantity 4 <= reorder 5: low
        db.items().create(coffee()).await.unwrap();
        // quantity == reorder: low
        let mut boundary = tea();
        boundary.sku = "TEA-002".to_string();
        boundary.quantity = 10;
        db.items().create(boundary).await.unwrap();

        let low: Vec<String> = db
            .items()
            .low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.sku)
            .collect();
        assert_eq!(low, vec!["COF-001", "TEA-002"]);
    }
}
