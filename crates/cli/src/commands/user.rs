//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (same rules as POST /register)
//! swfav user create -e luke@rebellion.org -p 'use-the-force' -n Luke
//!
//! # List every user
//! swfav user list
//! ```

use swapi_favorites_server::db::{self, UserRepository};
use swapi_favorites_server::services::AuthError;
use swapi_favorites_server::services::auth::create_user;

use super::{CommandError, database_url};

/// Create a user with an Argon2id-hashed password.
///
/// Applies exactly the checks `POST /register` applies.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `CommandError` if email or password is blank, the email is
/// already registered, or the database is unreachable.
pub async fn create(email: &str, password: &str, name: Option<&str>) -> Result<i32, CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let user = create_user(&UserRepository::new(&pool), email, password, name)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => CommandError::UserExists(email.to_owned()),
            other => CommandError::Auth(other),
        })?;

    tracing::info!(user_id = %user.id, email = %user.email, "User created");
    Ok(user.id.as_i32())
}

/// Log every user, one line each.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable.
pub async fn list() -> Result<(), CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let users = UserRepository::new(&pool).list_all().await?;
    for user in &users {
        tracing::info!(
            "{} {} {} active={}",
            user.id,
            user.email,
            user.name.as_deref().unwrap_or("-"),
            user.is_active
        );
    }
    tracing::info!("{} user(s)", users.len());

    Ok(())
}
