//! # Analytics Repository
//!
//! Read-only aggregation for the dashboard overview. Recomputed from
//! scratch on every call; at this scale a cache would only add staleness.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::analytics::{revenue_by_day, Overview, SALES_WINDOW_DAYS};

/// Repository for analytics reads.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    /// Creates a new AnalyticsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AnalyticsRepository { pool }
    }

    /// Computes the dashboard overview as of `now`.
    ///
    /// `sales_by_day` covers the trailing [`SALES_WINDOW_DAYS`] calendar
    /// days ending today (UTC), zero-filled; `low_stock` counts items at or
    /// under their reorder level.
    pub async fn overview(&self, now: DateTime<Utc>) -> DbResult<Overview> {
        let today = now.date_naive();
        // Start of the first day in the window, so early-morning sales on
        // that day are included.
        let window_start = (today - Duration::days(SALES_WINDOW_DAYS - 1))
            .and_time(NaiveTime::MIN)
            .and_utc();

        let sales = sqlx::query_as::<_, (DateTime<Utc>, i64)>(
            "SELECT created_at, amount_cents FROM sales WHERE created_at >= ?1",
        )
        .bind(window_start)
        .fetch_all(&self.pool)
        .await?;

        let low_stock = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM items WHERE quantity <= reorder_level",
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(
            sales = sales.len(),
            low_stock = low_stock,
            "Computed overview"
        );

        Ok(Overview {
            sales_by_day: revenue_by_day(&sales, today),
            low_stock,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::item::NewItem;
    use crate::repository::user::NewUser;
    use stockroom_core::Role;

    #[tokio::test]
    async fn test_overview_folds_sales_and_counts_low_stock() {
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

        // Sells down to 5 <= reorder 10, so it counts as low stock too.
        let item = db
            .items()
            .create(NewItem {
                name: "Black Tea 250g".to_string(),
                sku: "TEA-001".to_string(),
                quantity: 8,
                reorder_level: 10,
                purchase_price_cents: 200,
                sale_price_cents: 350,
                category_id: None,
            })
            .await
            .unwrap();

        db.sales().record_sale(&item.id, 2, &user.id).await.unwrap();
        db.sales().record_sale(&item.id, 1, &user.id).await.unwrap();

        let overview = db.analytics().overview(Utc::now()).await.unwrap();

        assert_eq!(overview.sales_by_day.len(), SALES_WINDOW_DAYS as usize);
        assert_eq!(overview.low_stock, 1);

        // Both sales happened today, the last bucket.
        let today = overview.sales_by_day.last().unwrap();
        assert_eq!(today.amount_cents, 3 * 350);
        let earlier: i64 = overview.sales_by_day[..overview.sales_by_day.len() - 1]
            .iter()
            .map(|d| d.amount_cents)
            .sum();
        assert_eq!(earlier, 0);
    }

    #[tokio::test]
    async fn test_overview_on_empty_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let overview = db.analytics().overview(Utc::now()).await.unwrap();

        assert_eq!(overview.sales_by_day.len(), SALES_WINDOW_DAYS as usize);
        assert!(overview.sales_by_day.iter().all(|d| d.amount_cents == 0));
        assert_eq!(overview.low_stock, 0);
    }
}
