//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No single user matched the supplied email, name and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
