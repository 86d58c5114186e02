//! Authentication service.
//!
//! Registration stores an Argon2id hash of the password. Sign-in matches on
//! email *and* name, then verifies the password; exactly one user must pass
//! all three checks for a token to be issued.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::instrument;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;
use crate::services::token::TokenKeys;

/// Result of a successful sign-in.
#[derive(Debug)]
pub struct SignedIn {
    /// Signed bearer token whose subject is `user.id`.
    pub token: String,
    pub user: User,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenKeys) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// See [`create_user`].
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        create_user(&self.users, email, password, name).await
    }

    /// Sign in with email, password and name.
    ///
    /// `name` must match the stored name exactly; `None` only matches users
    /// registered without one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless exactly one user matches.
    #[instrument(skip_all)]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<SignedIn, AuthError> {
        require("email", email)?;
        require("password", password)?;

        let mut matches: Vec<User> = self
            .users
            .find_by_email_and_name(email, name)
            .await?
            .into_iter()
            .filter(|(_, hash)| verify_password(password, hash).is_ok())
            .map(|(user, _)| user)
            .collect();

        let user = match matches.pop() {
            Some(user) if matches.is_empty() => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignedIn { token, user })
    }
}

/// Validate and store a new account. Every way of creating a user goes
/// through here, so the HTTP route and the CLI apply the same rules.
///
/// # Errors
///
/// Returns `AuthError::MissingField` if email or password is blank, before
/// anything is hashed or stored.
/// Returns `AuthError::UserAlreadyExists` if the email is already registered.
pub async fn create_user(
    users: &UserRepository<'_>,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, AuthError> {
    require("email", email)?;
    require("password", password)?;

    let password_hash = hash_password(password)?;

    users
        .create(email, &password_hash, name)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
