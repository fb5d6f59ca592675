//! Gate configuration

use crate::cookie::SESSION_COOKIE_NAME;

/// Session gate configuration, injected at construction rather than
/// read from process globals per request.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Shared HMAC secret. Empty means the gate fails closed on every
    /// protected request.
    pub secret: String,
    /// Cookie carrying the session token
    pub cookie_name: String,
    /// Login page the gate redirects to
    pub login_path: String,
}

impl GateConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            login_path: "/login".to_string(),
        }
    }
}
