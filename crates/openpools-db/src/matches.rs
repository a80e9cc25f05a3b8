//! Match repository implementation.

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use openpools_core::{Error, MatchRecord, MatchStore, Result};

/// PostgreSQL implementation of MatchStore.
pub struct PgMatchRepository {
    pool: Pool<Postgres>,
}

impl PgMatchRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchRepository {
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO matches (user_id, matched_user_id, compatibility_score,
                                     common_keywords, last_calculated)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, matched_user_id) DO UPDATE SET
                    compatibility_score = EXCLUDED.compatibility_score,
                    common_keywords = EXCLUDED.common_keywords,
                    last_calculated = EXCLUDED.last_calculated
                "#,
            )
            .bind(record.user_id)
            .bind(record.matched_user_id)
            .bind(record.compatibility_score)
            .bind(Json(&record.common_keywords))
            .bind(record.last_calculated)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "matches",
            op = "upsert",
            result_count = records.len(),
            "Upserted match rows"
        );
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MatchRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, matched_user_id, compatibility_score, common_keywords, last_calculated
            FROM matches
            WHERE user_id = $1
            ORDER BY compatibility_score DESC, matched_user_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.into_iter()
            .map(|row| {
                let Json(common_keywords): Json<Vec<String>> = row
                    .try_get("common_keywords")
                    .map_err(Error::Database)?;
                Ok(MatchRecord {
                    user_id: row.get("user_id"),
                    matched_user_id: row.get("matched_user_id"),
                    compatibility_score: row.get("compatibility_score"),
                    common_keywords,
                    last_calculated: row.get("last_calculated"),
                })
            })
            .collect()
    }
}
