//! Core types for SWAPI Favorites.

pub mod id;

pub use id::*;
