//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request tracing span)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (any origin)
//!
//! Bearer authentication is not a layer: protected handlers take the
//! [`RequireAuth`] extractor, so unprotected routes stay untouched.

pub mod auth;
pub mod request_id;

pub use auth::RequireAuth;
pub use request_id::request_id_middleware;
