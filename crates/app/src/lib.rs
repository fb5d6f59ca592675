//! Elevea application composition root
//!
//! Composes the dashboard routes behind the session gate.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use elevea_auth::{session_gate, GateConfig, GateState};
use elevea_common::Config;

pub mod handlers;

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config) -> Router {
    let gate = GateState::with_system_clock(GateConfig::new(config.session_secret.clone()));
    create_app_with_gate(gate)
}

/// Router composition with an explicit gate, so tests can inject a
/// chosen secret or a fixed clock.
pub fn create_app_with_gate(gate: GateState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(|| async { "Elevea API v0.0.1-SNAPSHOT" }))
        .route("/login", get(handlers::login_page))
        .route("/logout", post(handlers::logout))
        .route("/api/session", get(handlers::session))
        .route("/admin/dashboard", get(handlers::admin_dashboard))
        .route("/client/dashboard", get(handlers::client_dashboard))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(gate.clone(), session_gate))
        .with_state(gate)
}
