//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use swapi_favorites_core::UserId;

/// A registered user.
///
/// The password hash never leaves the repository layer, so the serialized
/// form is always safe to return to clients.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across users.
    pub email: String,
    /// Optional display name. Also part of the sign-in match.
    pub name: Option<String>,
    /// Account flag, `true` for every account created through registration.
    pub is_active: bool,
    /// When the user was created.
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}
