//! # stockroom-db: Database Layer for Stockroom
//!
//! SQLite storage for the inventory system, built on sqlx.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, item, ledger, ...)
//!
//! ## The Atomic Unit
//!
//! The two ledger repositories ([`InventoryRepository`] and
//! [`SaleRepository`]) are the only code that changes `items.quantity`, and
//! they always do so inside one SQL transaction together with the ledger
//! insert that explains the change. The quantity update itself is a guarded
//! in-database read-modify-write, so concurrent movements against the same
//! item serialize and lost updates cannot occur.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/stockroom.db")).await?;
//! let (txn, item) = db
//!     .inventory()
//!     .record_transaction("item-id", TxnKind::In, 50, Some("Initial stock"))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::analytics::AnalyticsRepository;
pub use repository::category::CategoryRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::item::{ItemRepository, ItemWithCategory, NewItem};
pub use repository::sale::SaleRepository;
pub use repository::user::{NewUser, UserRepository};
