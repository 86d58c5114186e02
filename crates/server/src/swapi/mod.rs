//! SWAPI relay client.
//!
//! The `/people` and `/planets` routes forward to the public Star Wars API and
//! hand the JSON body back untouched. Every request is exactly one upstream
//! GET, with no caching and no retry.

mod client;

pub use client::SwapiClient;

use std::fmt;

use thiserror::Error;

/// Page size requested when listing a collection. Large enough to cover every
/// SWAPI collection in one page.
pub const LIST_LIMIT: u32 = 1000;

/// Errors that can occur when talking to SWAPI.
#[derive(Debug, Error)]
pub enum SwapiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with something that is not JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Resource collections served by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    People,
    Planets,
}

impl ResourceKind {
    /// Path segment used by SWAPI for this collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Planets => "planets",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
