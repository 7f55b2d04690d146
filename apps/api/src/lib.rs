//! # Stockroom API
//!
//! HTTP server for the inventory system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        API Server                               │
//! │                                                                 │
//! │  Client ──► axum Router ──► AuthSession ──► handler             │
//! │                 │            (401 / 403)       │                │
//! │                 │                              ▼                │
//! │                 │                      stockroom-db             │
//! │                 │                   (atomic stock writes)       │
//! │                 │                              │                │
//! │                 │              post-commit StockEvent           │
//! │                 │                              ▼                │
//! │                 │                    Low-Stock Notifier         │
//! │                 │                    (task, SMTP, failures      │
//! │                 │                     logged and dropped)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every protected route extracts an [`session::AuthSession`] from the
//! bearer token and checks its role explicitly; there is no ambient
//! authentication state.

pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod session;

use tokio::sync::mpsc;

use crate::auth::JwtManager;
use stockroom_db::Database;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
    /// Post-commit stock events, consumed by the notifier task.
    pub stock_events: mpsc::Sender<notify::StockEvent>,
}
