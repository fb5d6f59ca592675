//! Access-control gate for the admin and client dashboards
//!
//! Each request is classified with the pure [`decide`] function, and
//! [`session_gate`] maps the decision onto HTTP: pass through, 302 to
//! the login page, 403, forward with trusted identity headers, or 500
//! when no secret is configured.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::claims::{Role, SessionClaims};
use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::cookie::extract_cookie_value;
use crate::error::AuthError;
use crate::token::decode_token;

/// Trusted identity headers written by the gate on forwarded requests.
/// Inbound values are stripped on every request so handlers only ever
/// see what this gate wrote.
pub const X_USER_EMAIL: &str = "x-user-email";
pub const X_USER_ROLE: &str = "x-user-role";
pub const X_USER_SITE: &str = "x-user-site";

const TRUSTED_HEADERS: &[&str] = &[X_USER_EMAIL, X_USER_ROLE, X_USER_SITE];

/// Shared state for the session gate middleware
#[derive(Clone)]
pub struct GateState {
    pub config: Arc<GateConfig>,
    pub clock: Arc<dyn Clock>,
}

impl GateState {
    pub fn new(config: GateConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    pub fn with_system_clock(config: GateConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }
}

/// Outcome of the gate for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is not protected; pass through untouched
    Pass,
    /// No valid session; redirect to the login page at the given location
    Redirect(String),
    /// Valid session, insufficient role
    Forbidden,
    /// Valid session; forward with trusted identity headers
    Forward(SessionClaims),
    /// No secret configured; the gate refuses to operate
    Misconfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleRequirement {
    AdminOnly,
    AnyAuthenticated,
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Role requirement for a protected prefix, or `None` for public paths.
///
/// Admins are allowed everywhere; clients are restricted to `/client/*`.
fn required_role(path: &str) -> Option<RoleRequirement> {
    if path_has_prefix(path, "/admin") {
        Some(RoleRequirement::AdminOnly)
    } else if path_has_prefix(path, "/client") {
        Some(RoleRequirement::AnyAuthenticated)
    } else {
        None
    }
}

fn login_redirect(login_path: &str, path: &str, query: Option<&str>) -> String {
    let original = match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    };
    format!("{login_path}?next={}", urlencoding::encode(&original))
}

/// Classify a request against the gate's decision table.
///
/// Stateless across requests: the outcome depends only on the path,
/// the presented cookie, the configured secret, and `now_ms`.
pub fn decide(
    config: &GateConfig,
    now_ms: i64,
    path: &str,
    query: Option<&str>,
    cookie_header: Option<&HeaderValue>,
) -> GateDecision {
    let Some(requirement) = required_role(path) else {
        return GateDecision::Pass;
    };

    if config.secret.is_empty() {
        return GateDecision::Misconfigured;
    }

    let claims = cookie_header
        .and_then(|header| extract_cookie_value(header, &config.cookie_name))
        .and_then(|token| decode_token(&token, config.secret.as_bytes(), now_ms).ok());

    let Some(claims) = claims else {
        return GateDecision::Redirect(login_redirect(&config.login_path, path, query));
    };

    match requirement {
        RoleRequirement::AdminOnly if claims.role != Role::Admin => GateDecision::Forbidden,
        _ => GateDecision::Forward(claims),
    }
}

/// Axum middleware enforcing the session gate.
///
/// Layer this over the full router; unprotected paths pass through
/// (minus inbound `x-user-*` headers, which are always stripped).
pub async fn session_gate(
    State(state): State<GateState>,
    mut request: Request,
    next: Next,
) -> Response {
    for name in TRUSTED_HEADERS {
        request.headers_mut().remove(*name);
    }

    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let decision = decide(
        &state.config,
        state.clock.now_ms(),
        &path,
        query.as_deref(),
        request.headers().get(header::COOKIE),
    );

    match decision {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path = %path, "No valid session, redirecting to login");
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        GateDecision::Forbidden => {
            tracing::debug!(path = %path, "Valid session with insufficient role");
            AuthError::Forbidden.into_response()
        }
        GateDecision::Forward(claims) => {
            let headers = request.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&claims.email) {
                headers.insert(HeaderName::from_static(X_USER_EMAIL), value);
            }
            headers.insert(
                HeaderName::from_static(X_USER_ROLE),
                HeaderValue::from_static(claims.role.as_str()),
            );
            if let Some(site) = claims.site_slug.as_deref() {
                if let Ok(value) = HeaderValue::from_str(site) {
                    headers.insert(HeaderName::from_static(X_USER_SITE), value);
                }
            }

            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GateDecision::Misconfigured => {
            tracing::error!("SESSION_SECRET is not configured, refusing protected access");
            AuthError::MissingSecret.into_response()
        }
    }
}
