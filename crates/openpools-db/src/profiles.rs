//! Profile repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use openpools_core::{Error, ProfileAttrs, ProfileStore, Result};

const PROFILE_COLUMNS: &str = "id, full_name, bio, location, job_title, company, \
                               linkedin_url, github_url, website_url";

/// PostgreSQL implementation of ProfileStore.
pub struct PgProfileRepository {
    pool: Pool<Postgres>,
}

impl PgProfileRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert or overwrite a profile row.
    ///
    /// Profiles are owned by the surrounding application; this exists for the
    /// admin tooling and tests.
    pub async fn upsert(&self, profile: &ProfileAttrs) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name, bio, location, job_title, company,
                                  linkedin_url, github_url, website_url, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                bio = EXCLUDED.bio,
                location = EXCLUDED.location,
                job_title = EXCLUDED.job_title,
                company = EXCLUDED.company,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                website_url = EXCLUDED.website_url,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(&profile.job_title)
        .bind(&profile.company)
        .bind(&profile.linkedin_url)
        .bind(&profile.github_url)
        .bind(&profile.website_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}

fn row_to_profile(row: &PgRow) -> ProfileAttrs {
    ProfileAttrs {
        user_id: row.get("id"),
        full_name: row.get("full_name"),
        bio: row.get("bio"),
        location: row.get("location"),
        job_title: row.get("job_title"),
        company: row.get("company"),
        linkedin_url: row.get("linkedin_url"),
        github_url: row.get("github_url"),
        website_url: row.get("website_url"),
    }
}

#[async_trait]
impl ProfileStore for PgProfileRepository {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileAttrs>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_profile))
    }

    async fn list_candidates(&self, exclude_user_id: Uuid) -> Result<Vec<ProfileAttrs>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM profiles WHERE id <> $1 ORDER BY id",
            PROFILE_COLUMNS
        ))
        .bind(exclude_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(row_to_profile).collect())
    }
}
