//! SWAPI favorites service library.
//!
//! Relays people and planets from SWAPI and keeps per-user favorites in
//! `PostgreSQL`. Exposed as a library so the router can be exercised in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod swapi;
