//! # openpools-db
//!
//! PostgreSQL storage layer for OpenPools.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations of the `openpools-core` store traits
//! - Embedded schema migrations (behind the `migrations` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use openpools_db::Database;
//! use openpools_matching::MatchEngine;
//!
//! let db = Database::connect("postgres://localhost/openpools").await?;
//! let engine = MatchEngine::new(
//!     Arc::new(db.profiles),
//!     Arc::new(db.keyword_profiles),
//!     Arc::new(db.matches),
//!     Default::default(),
//! );
//! ```

pub mod keyword_profiles;
pub mod matches;
pub mod pool;
pub mod profiles;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

pub use keyword_profiles::PgKeywordProfileRepository;
pub use matches::PgMatchRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig, PoolMetrics};
pub use profiles::PgProfileRepository;

use openpools_core::Result;
#[cfg(feature = "migrations")]
use openpools_core::Error;

/// Database handle holding one repository per table.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    pub profiles: PgProfileRepository,
    pub keyword_profiles: PgKeywordProfileRepository,
    pub matches: PgMatchRepository,
}

impl Database {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            profiles: PgProfileRepository::new(pool.clone()),
            keyword_profiles: PgKeywordProfileRepository::new(pool.clone()),
            matches: PgMatchRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with the default pool configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
