//! Favorite domain types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swapi_favorites_core::{FavoriteId, UserId};

/// A bookmarked SWAPI resource.
///
/// Serializes as `{id, user_id, name, url}`.
#[derive(Debug, Clone, Serialize)]
pub struct Favorite {
    /// Unique favorite ID.
    pub id: FavoriteId,
    /// User who created the favorite.
    pub user_id: UserId,
    /// Display name chosen by the client (e.g. "Luke Skywalker").
    pub name: String,
    /// Upstream resource locator, `{base}/{type}/{uid}`.
    pub url: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// The `uid` of an upstream resource as sent by clients.
///
/// SWAPI returns uids as strings (`"1"`), while hand-written clients tend to
/// send numbers (`1`). Both are accepted and rendered identically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResourceUid {
    Number(u64),
    Text(String),
}

impl ResourceUid {
    /// Whether the uid carries any content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ResourceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Build the url stored on a favorite.
///
/// `kind` is taken verbatim from the request path; it is not checked against
/// the resource kinds the relay serves.
#[must_use]
pub fn resource_url(base: &str, kind: &str, uid: &ResourceUid) -> String {
    format!("{}/{kind}/{uid}", base.trim_end_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_accepts_numbers_and_strings() {
        let n: ResourceUid = serde_json::from_str("1").unwrap();
        let s: ResourceUid = serde_json::from_str("\"1\"").unwrap();

        assert_eq!(n, ResourceUid::Number(1));
        assert_eq!(n.to_string(), s.to_string());
    }

    #[test]
    fn test_uid_rejects_other_json_types() {
        assert!(serde_json::from_str::<ResourceUid>("null").is_err());
        assert!(serde_json::from_str::<ResourceUid>("[1]").is_err());
        assert!(serde_json::from_str::<ResourceUid>("-3").is_err());
    }

    #[test]
    fn test_blank_uid() {
        assert!(ResourceUid::Text("  ".to_string()).is_blank());
        assert!(!ResourceUid::Text("4".to_string()).is_blank());
        assert!(!ResourceUid::Number(0).is_blank());
    }

    #[test]
    fn test_resource_url() {
        let base = "https://www.swapi.tech/api";
        assert_eq!(
            resource_url(base, "planets", &ResourceUid::Number(4)),
            "https://www.swapi.tech/api/planets/4"
        );
        assert_eq!(
            resource_url("https://www.swapi.tech/api/", "people", &ResourceUid::Text("1".into())),
            "https://www.swapi.tech/api/people/1"
        );
        // Free-form kinds pass straight through
        assert_eq!(
            resource_url(base, "starships", &ResourceUid::Number(9)),
            "https://www.swapi.tech/api/starships/9"
        );
    }

    #[test]
    fn test_serialized_favorite_shape() {
        let favorite = Favorite {
            id: FavoriteId::new(3),
            user_id: UserId::new(1),
            name: "Tatooine".to_string(),
            url: "https://www.swapi.tech/api/planets/1".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&favorite).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["id", "name", "url", "user_id"]);
    }
}
