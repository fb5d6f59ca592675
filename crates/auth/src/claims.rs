//! Session claims types

use serde::{Deserialize, Serialize};

/// Principal role carried in a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

/// Claims embedded in the session cookie.
///
/// Wire field names are camelCase to stay compatible with cookies
/// already in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Authenticated principal's identifier
    pub email: String,
    /// Role (admin or client)
    pub role: Role,
    /// Tenant site the principal is scoped to (present for clients)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_slug: Option<String>,
    /// Expiry, epoch milliseconds
    pub exp: i64,
}
