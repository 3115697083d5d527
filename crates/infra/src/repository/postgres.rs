//! Postgres-backed inventory repository.
//!
//! ## Error Mapping
//!
//! Every sqlx failure (connectivity, query error, row decoding, pool
//! closed) is translated into `InfrastructureError::DatabaseConnection`,
//! tagged with the port operation that failed and the SKU where the
//! operation had one, wrapping the sqlx error as source. No retries: a
//! single failed attempt surfaces to the caller.
//!
//! ## Thread Safety
//!
//! Uses the sqlx connection pool, which is thread-safe (Arc + Send +
//! Sync); the repository can be shared freely across request handlers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use stockpile_core::{InfrastructureError, Inventory, InventoryRepository};

/// Row of the `t_inventory` table.
#[derive(Debug, FromRow)]
struct InventoryRow {
    id: i64,
    sku_code: String,
    quantity: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Inventory {
            id: Some(row.id),
            sku_code: row.sku_code,
            quantity: row.quantity,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, sku_code, quantity, created_at, updated_at";

/// Postgres-backed repository over the `t_inventory` table.
///
/// The upsert is a single `INSERT .. ON CONFLICT` statement, so concurrent
/// adds for the same SKU serialize on the row and cannot lose updates.
/// This relies on the unique index on `sku_code` created by
/// [`ensure_schema`](Self::ensure_schema).
#[derive(Debug, Clone)]
pub struct PostgresInventoryRepository {
    pool: Arc<PgPool>,
}

impl PostgresInventoryRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the inventory table and its SKU unique index if missing.
    ///
    /// The unique index is load-bearing: the atomic upsert conflicts on
    /// it.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), InfrastructureError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS t_inventory (
                id BIGSERIAL PRIMARY KEY,
                sku_code TEXT NOT NULL,
                quantity BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", None, e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS t_inventory_sku_code_key ON t_inventory (sku_code)",
        )
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", None, e))?;

        Ok(())
    }
}

fn map_sqlx_error(
    operation: &'static str,
    sku_code: Option<&str>,
    error: sqlx::Error,
) -> InfrastructureError {
    InfrastructureError::database_connection(operation, sku_code.map(str::to_owned), error)
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    #[instrument(skip(self), err)]
    async fn exists_with_minimum_quantity(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<bool, InfrastructureError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM t_inventory WHERE sku_code = $1 AND quantity >= $2)",
        )
        .bind(sku_code)
        .bind(quantity)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("exists_with_minimum_quantity", Some(sku_code), e))?;

        Ok(exists)
    }

    #[instrument(skip(self), err)]
    async fn find_by_sku(
        &self,
        sku_code: &str,
    ) -> Result<Option<Inventory>, InfrastructureError> {
        let row: Option<InventoryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM t_inventory WHERE sku_code = $1"
        ))
        .bind(sku_code)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_sku", Some(sku_code), e))?;

        Ok(row.map(Inventory::from))
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, InfrastructureError> {
        let row: Option<InventoryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM t_inventory WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", None, e))?;

        Ok(row.map(Inventory::from))
    }

    #[instrument(skip(self, inventory), fields(sku_code = %inventory.sku_code), err)]
    async fn save(&self, inventory: Inventory) -> Result<Inventory, InfrastructureError> {
        let row: InventoryRow = match inventory.id {
            Some(id) => sqlx::query_as(&format!(
                r#"
                UPDATE t_inventory
                SET sku_code = $2, quantity = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING {SELECT_COLUMNS}
                "#
            ))
            .bind(id)
            .bind(&inventory.sku_code)
            .bind(inventory.quantity)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("save", Some(&inventory.sku_code), e))?,
            None => sqlx::query_as(&format!(
                r#"
                INSERT INTO t_inventory (sku_code, quantity)
                VALUES ($1, $2)
                RETURNING {SELECT_COLUMNS}
                "#
            ))
            .bind(&inventory.sku_code)
            .bind(inventory.quantity)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("save", Some(&inventory.sku_code), e))?,
        };

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn upsert_add(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<Inventory, InfrastructureError> {
        // Single statement: create-or-add serializes on the sku_code
        // unique index, so two concurrent adds both land.
        let row: InventoryRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO t_inventory (sku_code, quantity)
            VALUES ($1, $2)
            ON CONFLICT (sku_code)
            DO UPDATE SET
                quantity = t_inventory.quantity + EXCLUDED.quantity,
                updated_at = NOW()
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(sku_code)
        .bind(quantity)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_add", Some(sku_code), e))?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<Inventory>, InfrastructureError> {
        let rows: Vec<InventoryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM t_inventory ORDER BY id"
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_all", None, e))?;

        Ok(rows.into_iter().map(Inventory::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: i64) -> Result<bool, InfrastructureError> {
        let result = sqlx::query("DELETE FROM t_inventory WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", None, e))?;

        Ok(result.rows_affected() > 0)
    }
}
