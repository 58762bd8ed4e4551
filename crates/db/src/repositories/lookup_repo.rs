//! Generic repository for the lookup tables in [`crate::models::lookup`].

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::{LookupEntry, LookupTable};

const COLUMNS: &str = "id, name, created_at";

/// CRUD over any [`LookupTable`].
pub struct LookupRepo;

impl LookupRepo {
    /// List all entries, newest first.
    pub async fn list<T: LookupTable>(pool: &PgPool) -> Result<Vec<LookupEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id DESC", T::TABLE);
        sqlx::query_as::<_, LookupEntry>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id<T: LookupTable>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LookupEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", T::TABLE);
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create<T: LookupTable>(
        pool: &PgPool,
        name: &str,
    ) -> Result<LookupEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {COLUMNS}",
            T::TABLE
        );
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn rename<T: LookupTable>(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<LookupEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET name = $2 WHERE id = $1 RETURNING {COLUMNS}",
            T::TABLE
        );
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete<T: LookupTable>(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
