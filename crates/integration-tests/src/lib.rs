//! End-to-end tests for the SWAPI favorites service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p swapi-favorites-cli -- migrate
//!
//! # Start the server
//! cargo run -p swapi-favorites-server
//!
//! # Run the ignored end-to-end tests against it
//! SWAPI_FAVORITES_URL=http://localhost:3000 cargo test -p swapi-favorites-integration-tests -- --ignored
//! ```
//!
//! Every test registers its own user with a random email, so runs never
//! collide with each other or with existing data.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the running server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SWAPI_FAVORITES_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// An email address no other test run will use.
#[must_use]
pub fn unique_email() -> String {
    format!("e2e-{}@example.test", Uuid::new_v4().simple())
}

/// The `sub` claim of a bearer token, read without verifying the signature.
///
/// Returns `None` if the token is not three dot-separated segments with a
/// JSON claims segment carrying a string `sub`.
#[must_use]
pub fn token_subject(token: &str) -> Option<String> {
    let claims = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(claims).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("sub")?.as_str().map(str::to_string)
}

/// A registered, signed-in user.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub token: String,
}

/// HTTP client bound to the server under test.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: base_url(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// POST a JSON body, optionally with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server cannot be reached.
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> reqwest::Result<Response> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// GET, optionally with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server cannot be reached.
    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Result<Response> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// DELETE without credentials.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server cannot be reached.
    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        self.client.delete(self.url(path)).send().await
    }

    /// Register a fresh user and sign them in.
    ///
    /// # Panics
    ///
    /// Panics if either step does not succeed, or if the id returned by
    /// `/register`, the `user_id` returned by `/signin` and the token's
    /// subject disagree; this is a test helper.
    pub async fn signed_in_user(&self, name: Option<&str>) -> TestUser {
        let email = unique_email();
        let password = format!("pw-{}", Uuid::new_v4().simple());

        let mut body = json!({"email": email, "password": password});
        if let Some(name) = name {
            body["name"] = json!(name);
        }

        let resp = self
            .post("/register", &body, None)
            .await
            .unwrap_or_else(|e| panic!("register request failed: {e}"));
        assert_eq!(resp.status(), StatusCode::CREATED, "register failed");
        let registered: Value = resp
            .json()
            .await
            .unwrap_or_else(|e| panic!("register body was not JSON: {e}"));
        let id = registered["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("register body has no numeric id: {registered}"));

        let resp = self
            .post("/signin", &body, None)
            .await
            .unwrap_or_else(|e| panic!("signin request failed: {e}"));
        assert_eq!(resp.status(), StatusCode::OK, "signin failed");

        let signed_in: Value = resp
            .json()
            .await
            .unwrap_or_else(|e| panic!("signin body was not JSON: {e}"));

        let token = signed_in["token"].as_str().unwrap_or_default().to_string();

        assert_eq!(signed_in["user_id"].as_i64(), Some(id), "signin user_id");
        assert_eq!(
            token_subject(&token),
            Some(id.to_string()),
            "token subject is not the registered id"
        );

        TestUser {
            id,
            email,
            password,
            name: name.map(str::to_string),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_emails_differ() {
        assert_ne!(unique_email(), unique_email());
    }

    #[test]
    fn test_token_subject() {
        let claims = URL_SAFE_NO_PAD.encode(br#"{"sub":"42","type":"access"}"#);
        assert_eq!(
            token_subject(&format!("header.{claims}.signature")),
            Some("42".to_string())
        );
        assert_eq!(token_subject("not-a-token"), None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let ctx = TestContext {
            client: Client::new(),
            base_url: "http://localhost:3000/".to_string(),
        };
        assert_eq!(ctx.url("/people"), "http://localhost:3000/people");
    }
}
