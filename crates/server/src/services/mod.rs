//! Business logic services.
//!
//! - `auth` - Registration and sign-in
//! - `token` - Bearer token issuance and validation

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService, SignedIn};
pub use token::{Claims, TokenError, TokenKeys};
