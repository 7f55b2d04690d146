//! # Seed Data
//!
//! Populates the database with the initial admin account, a few categories,
//! and one stocked item so a fresh install is immediately usable.
//!
//! ## Usage
//! ```bash
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! DATABASE_PATH=./data/stockroom.db cargo run -p stockroom-db --bin seed
//! ```
//!
//! Idempotent: existing rows are left alone.

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;

use stockroom_core::{Role, TxnKind};
use stockroom_db::{Database, DbConfig, NewItem, NewUser};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "Admin@123";
const CATEGORIES: &[&str] = &["Beverages", "Snacks", "Household", "Personal Care"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/stockroom.db".to_string());
    if let Some(parent) = std::path::Path::new(&path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::new(DbConfig::new(&path)).await?;

    seed_admin(&db).await?;
    seed_categories(&db).await?;
    seed_sample_item(&db).await?;

    println!("Seed complete. Admin: {ADMIN_USERNAME} / {ADMIN_PASSWORD}");
    Ok(())
}

async fn seed_admin(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    if db.users().get_by_username(ADMIN_USERNAME).await?.is_some() {
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
        .map_err(|e| format!("failed to hash admin password: {e}"))?
        .to_string();

    db.users()
        .create(NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@stockroom.local".to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    Ok(())
}

async fn seed_categories(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    for name in CATEGORIES {
        if db.categories().get_by_name(name).await?.is_none() {
            db.categories().create(name).await?;
        }
    }
    Ok(())
}

async fn seed_sample_item(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    if db.items().get_by_sku("TEA-001").await?.is_some() {
        return Ok(());
    }

    let beverages = db.categories().get_by_name("Beverages").await?;

    let item = db
        .items()
        .create(NewItem {
            name: "Black Tea 250g".to_string(),
            sku: "TEA-001".to_string(),
            quantity: 0,
            reorder_level: 10,
            purchase_price_cents: 200,
            sale_price_cents: 350,
            category_id: beverages.map(|c| c.id),
        })
        .await?;

    // Stock arrives through the ledger so the item's history starts paired.
    db.inventory()
        .record_transaction(&item.id, TxnKind::In, 50, Some("Initial stock"))
        .await?;

    Ok(())
}
