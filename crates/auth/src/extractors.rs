//! Axum extractors for gate-verified identity
//!
//! Generic over any state `S` where `GateState: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::claims::SessionClaims;
use crate::cookie::extract_cookie_value;
use crate::error::AuthError;
use crate::gate::GateState;
use crate::token::decode_token;

/// Authenticated session extractor.
///
/// Behind [`crate::gate::session_gate`] the verified claims are read
/// from the request extensions; elsewhere (e.g. the session
/// introspection endpoint) the cookie is verified directly.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    GateState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(CurrentUser(claims.clone()));
        }

        let gate = GateState::from_ref(state);

        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .ok_or(AuthError::InvalidSession)?;
        let token = extract_cookie_value(cookie_header, &gate.config.cookie_name)
            .ok_or(AuthError::InvalidSession)?;

        let claims = decode_token(
            &token,
            gate.config.secret.as_bytes(),
            gate.clock.now_ms(),
        )?;

        Ok(CurrentUser(claims))
    }
}
