use super::store::{Collection, DocumentQuery, DocumentStore, RawDocument};
use super::DatabaseError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Document store over PostgreSQL: one table per collection, body in JSONB
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: Collection, data: Value) -> Result<RawDocument, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO {} (data)
            VALUES ($1)
            RETURNING id, data, created_at, updated_at
            "#,
            collection.as_str()
        );

        let doc = sqlx::query_as::<_, RawDocument>(&sql)
            .bind(data)
            .fetch_one(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT id, data, created_at, updated_at
            FROM {}
            WHERE id = $1
            "#,
            collection.as_str()
        );

        let doc = sqlx::query_as::<_, RawDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn find(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> Result<Vec<RawDocument>, DatabaseError> {
        // LIMIT NULL means no limit in PostgreSQL
        let sql = format!(
            r#"
            SELECT id, data, created_at, updated_at
            FROM {}
            WHERE data @> $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
            collection.as_str()
        );

        let docs = sqlx::query_as::<_, RawDocument>(&sql)
            .bind(query.filter_value())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(docs)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
    ) -> Result<Option<RawDocument>, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET data = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, data, created_at, updated_at
            "#,
            collection.as_str()
        );

        let doc = sqlx::query_as::<_, RawDocument>(&sql)
            .bind(id)
            .bind(data)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.as_str());

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection, filter: &Value) -> Result<i64, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE data @> $1",
            collection.as_str()
        );

        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(filter.clone())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
