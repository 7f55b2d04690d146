//! HTTP routes.
//!
//! One module per resource; [`router`] assembles them. Role requirements:
//!
//! | route                  | method | role    |
//! |------------------------|--------|---------|
//! | /health                | GET    | -       |
//! | /auth/login            | POST   | -       |
//! | /users                 | GET/POST | ADMIN |
//! | /categories            | GET    | STAFF   |
//! | /categories            | POST   | MANAGER |
//! | /items                 | GET    | STAFF   |
//! | /items                 | POST   | MANAGER |
//! | /items/low-stock       | GET    | STAFF   |
//! | /inventory/txn         | POST   | STAFF   |
//! | /sales                 | POST   | STAFF   |
//! | /analytics/overview    | GET    | MANAGER |

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod health;
pub mod inventory;
pub mod items;
pub mod sales;
pub mod users;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/items", get(items::search_items).post(items::create_item))
        .route("/items/low-stock", get(items::low_stock_items))
        .route("/inventory/txn", post(inventory::record_transaction))
        .route("/sales", post(sales::record_sale))
        .route("/analytics/overview", get(analytics::overview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
