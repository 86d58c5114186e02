//! Domain models for the favorites service.
//!
//! These are the public shapes returned by the JSON API. Database row types
//! live next to the queries in [`crate::db`].

pub mod favorite;
pub mod user;

pub use favorite::Favorite;
pub use user::User;
