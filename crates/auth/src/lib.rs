//! Session authentication for the Elevea dashboards
//!
//! Provides the signed session-token codec, the constant-time
//! comparison primitive, and the axum gate middleware protecting the
//! `/admin` and `/client` route prefixes.

mod claims;
mod clock;
mod compare;
mod config;
mod cookie;
mod error;
mod extractors;
mod gate;
mod signature;
mod token;

pub use claims::{Role, SessionClaims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use compare::constant_time_eq;
pub use config::GateConfig;
pub use cookie::{
    clear_cookie_header, extract_cookie_value, set_cookie_header, SESSION_COOKIE_NAME,
    SESSION_TTL_SECS,
};
pub use error::AuthError;
pub use extractors::CurrentUser;
pub use gate::{
    decide, session_gate, GateDecision, GateState, X_USER_EMAIL, X_USER_ROLE, X_USER_SITE,
};
pub use token::{decode_token, encode_token};
