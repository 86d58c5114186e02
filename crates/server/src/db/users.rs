//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use swapi_favorites_core::UserId;

use super::RepositoryError;
use crate::models::User;

/// Row shape of the `users` table, including the password hash.
#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    password_hash: String,
    name: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_parts(self) -> (User, String) {
        let user = User {
            id: self.id,
            email: self.email,
            name: self.name,
            is_active: self.is_active,
            created_at: self.created_at,
        };
        (user, self.password_hash)
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new, active user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO users (email, password_hash, name, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, email, password_hash, name, is_active, created_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "email"))?;

        Ok(row.into_parts().0)
    }

    /// Find every user whose email and name both match, with their password hashes.
    ///
    /// A `None` name only matches users registered without a name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email_and_name(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<Vec<(User, String)>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT id, email, password_hash, name, is_active, created_at
            FROM users
            WHERE email = $1 AND name IS NOT DISTINCT FROM $2
            ",
        )
        .bind(email)
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_parts).collect())
    }

    /// List every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT id, email, password_hash, name, is_active, created_at
            FROM users
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_parts().0).collect())
    }
}
