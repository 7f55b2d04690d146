//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the heart of the inventory system. It contains the domain
//! types and the rules that govern stock movement, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Stockroom Architecture                      │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 apps/api (HTTP handlers)                  │  │
//! │  │   login ──► items ──► inventory/txn ──► sales ──► alerts  │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                              │                                  │
//! │  ┌───────────────────────────▼───────────────────────────────┐  │
//! │  │              ★ stockroom-core (THIS CRATE) ★              │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────────┐   │  │
//! │  │  │  types  │ │  money  │ │ validation│ │  analytics   │   │  │
//! │  │  │ Item    │ │  Money  │ │   rules   │ │ 30-day fold  │   │  │
//! │  │  │ Ledger  │ │  cents  │ │   checks  │ │ low stock    │   │  │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └──────────────┘   │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                              │                                  │
//! │  ┌───────────────────────────▼───────────────────────────────┐  │
//! │  │              stockroom-db (Database Layer)                │  │
//! │  │        SQLite queries, migrations, repositories           │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Role, Item, InventoryTxn, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`analytics`] - Sales-by-day fold and low-stock predicate

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity applied to a sale when the request does not specify one.
pub const DEFAULT_SALE_QUANTITY: i64 = 1;

/// Maximum length of a SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length of an item or category name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 50;

/// Maximum length of an inventory transaction note.
pub const MAX_NOTE_LEN: usize = 500;
