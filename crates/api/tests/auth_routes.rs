//! Tests for authentication and role enforcement at the router level.
//!
//! Exercises the real middleware stack with `tower::ServiceExt::oneshot`;
//! every request here is rejected (or answered) before any database query,
//! so no infrastructure is needed.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{auth_token, test_app};

/// Helper: run a request and return status + parsed JSON body.
async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn profile_route_without_token_returns_401() {
    let request = Request::builder()
        .uri("/api/v1/profiles/host")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn malformed_authorization_header_returns_401() {
    let request = Request::builder()
        .uri("/api/v1/profiles/host/status")
        .header("authorization", "Token abc123")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_bearer_token_returns_401() {
    let request = Request::builder()
        .uri("/api/v1/profiles/host")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn review_queue_rejects_plain_users_with_403() {
    let token = auth_token(7, "user");
    let request = Request::builder()
        .uri("/api/v1/admin/reviews")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Reviewer role required");
}

#[tokio::test]
async fn review_queue_rejects_unknown_roles_with_403() {
    let token = auth_token(7, "superuser");
    let request = Request::builder()
        .uri("/api/v1/admin/reviews")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(request).await;

    // The endpoint itself stays up; only the database probe fails.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let request = Request::builder()
        .uri("/api/v1/profiles/guest")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
