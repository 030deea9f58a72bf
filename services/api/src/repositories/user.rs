//! User lookups for the API service
//!
//! The API service never touches credentials; it only needs to confirm
//! that a token subject still exists in the store.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a user with the given ID exists
    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
