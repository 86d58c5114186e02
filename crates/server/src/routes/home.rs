//! Sitemap served at `/`.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// One row of the sitemap.
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub auth: bool,
    pub description: &'static str,
}

/// Every public endpoint, in the order it is documented.
pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint { method: "POST", path: "/register", auth: false, description: "Create an account" },
    Endpoint { method: "POST", path: "/signin", auth: false, description: "Exchange credentials for a bearer token" },
    Endpoint { method: "GET", path: "/people", auth: false, description: "All SWAPI people" },
    Endpoint { method: "GET", path: "/people/{id}", auth: false, description: "One SWAPI person" },
    Endpoint { method: "GET", path: "/planets", auth: false, description: "All SWAPI planets" },
    Endpoint { method: "GET", path: "/planets/{id}", auth: false, description: "One SWAPI planet" },
    Endpoint { method: "GET", path: "/users", auth: false, description: "Every registered user" },
    Endpoint { method: "GET", path: "/favorites", auth: true, description: "The caller's favorites" },
    Endpoint { method: "POST", path: "/favorites/{type}", auth: true, description: "Favorite a person or planet" },
    Endpoint { method: "DELETE", path: "/favorites/{id}", auth: false, description: "Remove a favorite" },
    Endpoint { method: "GET", path: "/health", auth: false, description: "Liveness probe" },
    Endpoint { method: "GET", path: "/health/ready", auth: false, description: "Readiness probe (database)" },
];

/// Sitemap page template.
#[derive(Template, WebTemplate)]
#[template(path = "sitemap.html")]
pub struct SitemapTemplate {
    pub endpoints: &'static [Endpoint],
}

/// Render the list of endpoints.
pub async fn sitemap() -> impl IntoResponse {
    SitemapTemplate {
        endpoints: ENDPOINTS,
    }
}
