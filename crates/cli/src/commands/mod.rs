//! CLI subcommands.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use thiserror::Error;

use swapi_favorites_server::config::{ConfigError, database_url_from_env};

/// Errors shared by every subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] swapi_favorites_server::db::RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] swapi_favorites_server::services::AuthError),

    #[error("User already exists with email: {0}")]
    UserExists(String),
}

/// Read the connection string the server uses, loading `.env` first.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();
    Ok(database_url_from_env()?)
}
