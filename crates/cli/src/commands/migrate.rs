//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! swfav migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DB_CONNECTION_STRING` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! `crates/server/migrations/`:
//! ```text
//! migrations/
//! ├── 20260101000001_create_users.sql
//! └── 20260101000002_create_favorites.sql
//! ```

use swapi_favorites_server::db;

use super::{CommandError, database_url};

/// Apply every pending migration to the service database.
///
/// # Errors
///
/// Returns `CommandError` if the connection string is missing, the database
/// is unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
