//! Favorite repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use swapi_favorites_core::{FavoriteId, UserId};

use super::RepositoryError;
use crate::models::Favorite;

#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: FavoriteId,
    user_id: UserId,
    name: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(r: FavoriteRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            url: r.url,
            created_at: r.created_at,
        }
    }
}

/// Repository for favorite database operations.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the favorites owned by a user, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Favorite>, RepositoryError> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            r"
            SELECT id, user_id, name, url, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    /// Get a favorite by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: FavoriteId) -> Result<Option<Favorite>, RepositoryError> {
        let row: Option<FavoriteRow> = sqlx::query_as(
            r"
            SELECT id, user_id, name, url, created_at
            FROM favorites
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Favorite::from))
    }

    /// Create a favorite inside its own transaction.
    ///
    /// Duplicates of an existing `(user_id, url)` pair are allowed. On any
    /// failure the transaction is rolled back before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owning user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        url: &str,
    ) -> Result<Favorite, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Result<FavoriteRow, sqlx::Error> = sqlx::query_as(
            r"
            INSERT INTO favorites (user_id, name, url)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, url, created_at
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(url)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await?;
                Ok(row.into())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Failed to roll back favorite insert");
                }
                Err(RepositoryError::from_write(e, "favorite owner"))
            }
        }
    }

    /// Delete a favorite by its ID, regardless of owner.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: FavoriteId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
