//! Gate integration tests
//!
//! Drives the composed router end to end: login redirects, role
//! gating, trusted header injection, and fail-closed behavior when no
//! secret is configured.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use common::{future_exp_ms, past_exp_ms, session_cookie, test_app, test_config, TEST_SECRET};
use elevea_auth::Role;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

mod test_redirects {
    use super::*;

    #[tokio::test]
    async fn test_no_cookie_redirects_to_login() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fadmin%2Fanything"
        );
    }

    #[tokio::test]
    async fn test_redirect_preserves_query() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/reports?from=2024")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fclient%2Freports%3Ffrom%3D2024"
        );
    }

    #[tokio::test]
    async fn test_tampered_cookie_redirects() {
        let mut cookie = session_cookie(Role::Client, Some("ACME"), future_exp_ms());

        // Flip the last character of the signature
        let last = cookie.pop().unwrap();
        cookie.push(if last == 'A' { 'B' } else { 'A' });

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_expiry_boundary_with_fixed_clock() {
        use elevea_auth::{FixedClock, GateConfig, GateState};
        use std::sync::Arc;

        let now_ms = 1_700_000_000_000;
        let app = || {
            elevea_app::create_app_with_gate(GateState::new(
                GateConfig::new(TEST_SECRET),
                Arc::new(FixedClock(now_ms)),
            ))
        };

        // exp == now is already expired
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, session_cookie(Role::Client, Some("ACME"), now_ms))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);

        // exp strictly in the future is accepted
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, session_cookie(Role::Client, Some("ACME"), now_ms + 1))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_cookie_redirects() {
        let cookie = session_cookie(Role::Client, Some("ACME"), past_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }
}

mod test_role_gating {
    use super::*;

    #[tokio::test]
    async fn test_client_forbidden_on_admin_paths() {
        let cookie = session_cookie(Role::Client, Some("ACME"), future_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_client_forwarded_with_identity_headers() {
        let cookie = session_cookie(Role::Client, Some("ACME"), future_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // The handler echoes the trusted headers the gate injected
        let body = body_json(response).await;
        assert_eq!(body["email"], "owner@acme.com");
        assert_eq!(body["role"], "client");
        assert_eq!(body["site"], "ACME");
    }

    #[tokio::test]
    async fn test_admin_allowed_on_admin_paths() {
        let cookie = session_cookie(Role::Admin, None, future_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "ops@elevea.com");
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn test_admin_allowed_on_client_paths() {
        let cookie = session_cookie(Role::Admin, None, future_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["role"], "admin");
    }
}

mod test_header_spoofing {
    use super::*;

    #[tokio::test]
    async fn test_spoofed_headers_are_overwritten() {
        let cookie = session_cookie(Role::Client, Some("ACME"), future_exp_ms());

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header(header::COOKIE, cookie)
                    .header("x-user-email", "evil@example.com")
                    .header("x-user-role", "admin")
                    .header("x-user-site", "OTHER")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Identity comes from the verified cookie, never the inbound headers
        let body = body_json(response).await;
        assert_eq!(body["email"], "owner@acme.com");
        assert_eq!(body["role"], "client");
        assert_eq!(body["site"], "ACME");
    }

    #[tokio::test]
    async fn test_spoofed_headers_without_cookie_are_discarded() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/dashboard")
                    .header("x-user-role", "admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // No valid token: redirected, the spoofed header never reaches a handler
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_spoofed_headers_stripped_on_unprotected_paths() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/session")
                    .header("x-user-email", "evil@example.com")
                    .header("x-user-role", "admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // The spoofed headers do not conjure up a session
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

mod test_fail_closed {
    use super::*;

    #[tokio::test]
    async fn test_missing_secret_rejects_protected_paths() {
        for path in ["/admin/dashboard", "/client/dashboard", "/admin/anything"] {
            let app = elevea_app::create_app(&test_config(""));
            let cookie = session_cookie(Role::Admin, None, future_exp_ms());

            let response = app
                .oneshot(
                    Request::builder()
                        .uri(path)
                        .header(header::COOKIE, cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "expected fail-closed on {path}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_secret_leaves_unprotected_paths_up() {
        let app = elevea_app::create_app(&test_config(""));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
