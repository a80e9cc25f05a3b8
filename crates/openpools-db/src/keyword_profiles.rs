//! Keyword profile repository implementation.
//!
//! The `keywords` column is JSONB and is returned undecoded; decoding and
//! normalization belong to the matching core.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgRow, types::Json, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use openpools_core::{
    Error, KeywordProfile, KeywordProfileStore, Result, StoredKeywordProfile,
};

/// PostgreSQL implementation of KeywordProfileStore.
pub struct PgKeywordProfileRepository {
    pool: Pool<Postgres>,
}

impl PgKeywordProfileRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Store raw keyword JSON, bypassing the typed model. Used to load legacy
    /// rows and by tests that need malformed data.
    pub async fn upsert_raw(&self, user_id: Uuid, keywords: &JsonValue) -> Result<()> {
        let total = keywords.as_array().map(|a| a.len()).unwrap_or(0) as i32;
        sqlx::query(
            r#"
            INSERT INTO keyword_profiles (user_id, keywords, total_keywords, last_updated)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                keywords = EXCLUDED.keywords,
                total_keywords = EXCLUDED.total_keywords,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(user_id)
        .bind(keywords)
        .bind(total)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}

fn row_to_stored(row: &PgRow) -> StoredKeywordProfile {
    StoredKeywordProfile {
        user_id: row.get("user_id"),
        keywords: row.get("keywords"),
        total_keywords: row.get("total_keywords"),
        last_updated: row.get("last_updated"),
    }
}

#[async_trait]
impl KeywordProfileStore for PgKeywordProfileRepository {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<StoredKeywordProfile>> {
        let row = sqlx::query(
            "SELECT user_id, keywords, total_keywords, last_updated
             FROM keyword_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_stored))
    }

    async fn fetch_many(&self, user_ids: &[Uuid]) -> Result<Vec<StoredKeywordProfile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT user_id, keywords, total_keywords, last_updated
             FROM keyword_profiles WHERE user_id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "keyword_profiles",
            op = "fetch_many",
            requested = user_ids.len(),
            result_count = rows.len(),
            "Fetched keyword profiles"
        );
        Ok(rows.iter().map(row_to_stored).collect())
    }

    async fn list_all(&self) -> Result<Vec<StoredKeywordProfile>> {
        let rows = sqlx::query(
            "SELECT user_id, keywords, total_keywords, last_updated
             FROM keyword_profiles ORDER BY user_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(row_to_stored).collect())
    }

    async fn upsert(&self, profile: &KeywordProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO keyword_profiles (user_id, keywords, total_keywords, last_updated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                keywords = EXCLUDED.keywords,
                total_keywords = EXCLUDED.total_keywords,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(profile.user_id)
        .bind(Json(&profile.keywords))
        .bind(profile.total_keywords)
        .bind(profile.last_updated)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}
