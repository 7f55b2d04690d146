//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                            │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │     User     │   │     Item     │   │ InventoryTxn │         │
//! │  │ ──────────── │   │ ──────────── │   │ ──────────── │         │
//! │  │ id (UUID)    │   │ id (UUID)    │   │ id (UUID)    │         │
//! │  │ username     │   │ sku (unique) │   │ item_id (FK) │         │
//! │  │ role         │   │ quantity     │   │ kind         │         │
//! │  │ password hash│   │ reorder_level│   │ quantity     │         │
//! │  └──────────────┘   └──────────────┘   └──────────────┘         │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │     Role     │   │   TxnKind    │   │     Sale     │         │
//! │  │ ──────────── │   │ ──────────── │   │ ──────────── │         │
//! │  │ Staff        │   │ In           │   │ item_id (FK) │         │
//! │  │ Manager      │   │ Out          │   │ user_id (FK) │         │
//! │  │ Admin        │   │ Adjust       │   │ amount_cents │         │
//! │  └──────────────┘   └──────────────┘   └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! InventoryTxn and Sale are ledger entries: append-only records that each
//! explain exactly one quantity change on an Item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// User role, totally ordered for permission checks.
///
/// The declaration order defines the hierarchy: `Staff < Manager < Admin`.
/// An action requiring role R is allowed iff the caller's role is `>= R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Staff,
    Manager,
    Admin,
}

impl Role {
    /// Stable uppercase name, as stored and as sent on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "STAFF",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// The kind of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum TxnKind {
    /// Stock received; quantity is a positive delta.
    In,
    /// Stock removed; quantity is a positive delta.
    Out,
    /// Stocktake correction; quantity is the new absolute value.
    Adjust,
}

impl TxnKind {
    /// Applies this movement to a current quantity.
    ///
    /// This is the single definition of how the ledger folds into a stock
    /// level: `In` adds, `Out` subtracts, `Adjust` replaces outright.
    #[inline]
    pub const fn apply(self, current: i64, quantity: i64) -> i64 {
        match self {
            TxnKind::In => current + quantity,
            TxnKind::Out => current - quantity,
            TxnKind::Adjust => quantity,
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TxnKind::In => "IN",
            TxnKind::Out => "OUT",
            TxnKind::Adjust => "ADJUST",
        })
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account.
///
/// The password hash never leaves the server: it is skipped on
/// serialization so a `User` can be returned from the API directly.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A named grouping for items. Items reference it; it owns nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Item
// =============================================================================

/// A stocked item.
///
/// `quantity` is the single source of truth for the stock level. It is only
/// ever mutated together with a ledger entry (InventoryTxn or Sale) in the
/// same atomic unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Current stock level.
    pub quantity: i64,

    /// Threshold at or below which stock is considered low.
    pub reorder_level: i64,

    /// Acquisition price in cents.
    pub purchase_price_cents: i64,

    /// Selling price in cents.
    pub sale_price_cents: i64,

    /// Optional category reference.
    pub category_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the selling price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the acquisition price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Whether the item is at or under its reorder level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

// =============================================================================
// Inventory Transaction
// =============================================================================

/// An inventory movement ledger entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct InventoryTxn {
    pub id: String,
    pub item_id: String,
    pub kind: TxnKind,
    /// Delta for In/Out; the new absolute quantity for Adjust.
    pub quantity: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale ledger entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub item_id: String,
    /// Units sold; always positive.
    pub quantity: i64,
    /// quantity x the item's sale price in cents at the time of sale.
    pub amount_cents: i64,
    /// The acting user.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
