//! HTTP handlers for the Elevea composition root
//!
//! The dashboard handlers stand in for the proxied admin/client apps:
//! they render the identity the gate established, nothing more.

use axum::{
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

use elevea_auth::{
    clear_cookie_header, CurrentUser, SESSION_COOKIE_NAME, X_USER_EMAIL, X_USER_ROLE, X_USER_SITE,
};
use elevea_common::{Error, Result};

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /login: placeholder page; the real login UI is the marketing SPA
pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Elevea login</title><p>Sign in to continue.</p>")
}

/// POST /logout: clear the session cookie and send the user back to login
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, clear_cookie_header(SESSION_COOKIE_NAME)),
            (header::LOCATION, "/login".to_string()),
        ],
    )
}

/// Response shape for `GET /api/session`
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub email: String,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_slug: Option<String>,
    pub expires_at_ms: i64,
}

/// GET /api/session: return the session context for the current caller
pub async fn session(CurrentUser(claims): CurrentUser) -> Result<Json<SessionResponse>> {
    Ok(Json(SessionResponse {
        email: claims.email,
        role: claims.role.as_str(),
        site_slug: claims.site_slug,
        expires_at_ms: claims.exp,
    }))
}

/// Identity context a dashboard renders for
#[derive(Debug, Serialize)]
pub struct DashboardContext {
    pub dashboard: &'static str,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// GET /admin/dashboard: identity from the gate-verified claims
pub async fn admin_dashboard(CurrentUser(claims): CurrentUser) -> Result<Json<DashboardContext>> {
    Ok(Json(DashboardContext {
        dashboard: "admin",
        email: Some(claims.email),
        role: Some(claims.role.as_str().to_string()),
        site: claims.site_slug,
    }))
}

/// GET /client/dashboard: identity from the trusted headers the gate
/// injected, the same view a proxied downstream would see
pub async fn client_dashboard(headers: HeaderMap) -> Json<DashboardContext> {
    Json(DashboardContext {
        dashboard: "client",
        email: header_value(&headers, X_USER_EMAIL),
        role: header_value(&headers, X_USER_ROLE),
        site: header_value(&headers, X_USER_SITE),
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound(uri.path().to_string())
}
