//! Relational store access for Products
//!
//! `ProductStore` wraps a sqlx connection pool and exposes the handful of
//! queries the service needs. The handle is cheap to clone and is passed
//! explicitly to whoever needs it; there is no process-wide singleton.
//!
//! `like` is quoted in every statement because it is an SQL keyword.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Product, ProductDraft};

const SELECT_COLUMNS: &str = r#"SELECT id, name, category, description, price, "like" FROM products"#;

/// Handle to the products table.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    /// Connect to the database named by `uri`.
    pub async fn connect(uri: &str) -> Result<Self, sqlx::Error> {
        info!("Connecting to database at {}", uri);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(uri)
            .await?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Capped at a single connection: each SQLite in-memory connection is its
    /// own database, so a wider pool would see different data per checkout.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// Create the products table if it does not exist yet.
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Initializing database schema");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT    NOT NULL,
                category    TEXT    NOT NULL,
                description TEXT    NOT NULL,
                price       INTEGER NOT NULL,
                "like"      INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All products, store default order.
    pub async fn all(&self) -> Result<Vec<Product>, sqlx::Error> {
        info!("Processing all Products");
        sqlx::query_as::<_, Product>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
    }

    /// Look up a single product by id; absence is not an error here.
    pub async fn find(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        info!("Processing lookup for id {}", id);
        sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// All products with exactly the given name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, sqlx::Error> {
        info!("Processing name query for {}", name);
        sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} WHERE name = ?1"))
            .bind(name)
            .fetch_all(&self.pool)
            .await
    }

    /// All products with exactly the given category.
    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, sqlx::Error> {
        info!("Processing category query for {}", category);
        sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} WHERE category = ?1"))
            .bind(category)
            .fetch_all(&self.pool)
            .await
    }

    /// All products with price in `[low, high]`, inclusive on both ends.
    pub async fn find_by_price_range(
        &self,
        low: i64,
        high: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        info!("Processing price range query for [{}, {}]", low, high);
        sqlx::query_as::<_, Product>(&format!(
            "{SELECT_COLUMNS} WHERE price >= ?1 AND price <= ?2"
        ))
        .bind(low)
        .bind(high)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert a validated draft; the store assigns a fresh id.
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, sqlx::Error> {
        info!("Creating {}", draft.name);
        let result = sqlx::query(
            r#"INSERT INTO products (name, category, description, price, "like")
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.like)
        .execute(&self.pool)
        .await?;

        Ok(Product::from_draft(result.last_insert_rowid(), draft))
    }

    /// Replace the row with the product's id in place.
    pub async fn update(&self, product: &Product) -> Result<(), sqlx::Error> {
        info!("Saving {}", product.name);
        sqlx::query(
            r#"UPDATE products
               SET name = ?1, category = ?2, description = ?3, price = ?4, "like" = ?5
               WHERE id = ?6"#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.like)
        .bind(product.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete the row if present; deleting a missing id is a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        info!("Deleting product with id {}", id);
        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
