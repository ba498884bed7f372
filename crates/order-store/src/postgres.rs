use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{OrderId, OrderRecord, OrderStore, OrderStoreError, Result, Version};

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
            version: Version::new(row.try_get("version")?),
            payload: row.try_get("payload")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order_id: OrderId, payload: serde_json::Value) -> Result<Version> {
        let version = Version::first();

        sqlx::query(
            r#"
            INSERT INTO beer_orders (order_id, version, payload, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(version.as_i64())
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A primary key violation means the order was already inserted.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return OrderStoreError::AlreadyExists(order_id);
            }
            OrderStoreError::Database(e)
        })?;

        Ok(version)
    }

    async fn load(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT order_id, version, payload, updated_at
            FROM beer_orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn update(
        &self,
        order_id: OrderId,
        payload: serde_json::Value,
        expected_version: Version,
    ) -> Result<Version> {
        let new_version: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE beer_orders
            SET payload = $2, version = version + 1, updated_at = $3
            WHERE order_id = $1 AND version = $4
            RETURNING version
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(&payload)
        .bind(Utc::now())
        .bind(expected_version.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match new_version {
            Some(version) => Ok(Version::new(version)),
            None => {
                // No row matched: either a concurrent writer moved the
                // version, or the record never existed.
                let actual: Option<i64> =
                    sqlx::query_scalar("SELECT version FROM beer_orders WHERE order_id = $1")
                        .bind(order_id.as_uuid())
                        .fetch_optional(&self.pool)
                        .await?;

                match actual {
                    Some(actual) => Err(OrderStoreError::VersionConflict {
                        order_id,
                        expected: expected_version,
                        actual: Version::new(actual),
                    }),
                    None => Err(OrderStoreError::NotFound(order_id)),
                }
            }
        }
    }

    async fn current_version(&self, order_id: OrderId) -> Result<Option<Version>> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT version FROM beer_orders WHERE order_id = $1")
                .bind(order_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(version.map(Version::new))
    }
}
