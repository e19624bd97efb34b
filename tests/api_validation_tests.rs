// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! Malformed identifiers and bodies are rejected before any database
//! access, so these run against the offline mock.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Body,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn test_add_favorite_malformed_activity_id() {
    let (app, state) = common::create_test_app();
    let user_id = uuid::Uuid::new_v4().to_string();
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            "PUT",
            "/api/favorites/not-a-uuid",
            &token,
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_favorite_malformed_activity_id() {
    let (app, state) = common::create_test_app();
    let user_id = uuid::Uuid::new_v4().to_string();
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/favorites/12345/toggle",
            &token,
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_with_malformed_id_in_payload() {
    let (app, state) = common::create_test_app();
    let user_id = uuid::Uuid::new_v4().to_string();
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let body = serde_json::json!({ "activity_ids": ["not-a-uuid"] }).to_string();

    let response = app
        .oneshot(authed_request(
            "PUT",
            "/api/favorites",
            &token,
            Body::from(body),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_activity_malformed_id() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/activities/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let (app, _) = common::create_test_app();

    let body = serde_json::json!({
        "first_name": "Jean",
        "last_name": "Dupont",
        "email": "not-an-email",
        "password": "s3cret-enough",
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let (app, _) = common::create_test_app();

    let body = serde_json::json!({
        "first_name": "Jean",
        "last_name": "Dupont",
        "email": "jean@example.com",
        "password": "short",
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_activity_rejects_empty_name() {
    let (app, state) = common::create_test_app();
    let user_id = uuid::Uuid::new_v4().to_string();
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let body = serde_json::json!({
        "name": "",
        "city": "Paris",
        "description": "A walk",
        "price": 10,
    })
    .to_string();

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/me/activities",
            &token,
            Body::from(body),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
