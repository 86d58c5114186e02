//! SWAPI Favorites Core - Shared types library.
//!
//! This crate provides common types used across all SWAPI Favorites components:
//! - `server` - The HTTP service (users, sign-in, favorites, SWAPI relay)
//! - `cli` - Command-line tools for migrations
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
