// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account directory integration tests.
//!
//! These tests require the Firestore emulator to be running.

use citybreak_api::error::AppError;
use citybreak_api::models::Role;
use citybreak_api::services::{NewUser, UserService};

mod common;

async fn user_service() -> UserService {
    UserService::new(common::test_db().await)
}

fn signup(email: &str) -> NewUser {
    NewUser {
        first_name: "Anne".to_string(),
        last_name: "Bernard".to_string(),
        email: email.to_string(),
        password: "correct horse battery staple".to_string(),
        role: None,
    }
}

#[tokio::test]
async fn test_create_and_get_by_email() {
    require_emulator!();

    let users = user_service().await;
    let email = common::unique_email();

    let created = users.create(signup(&email)).await.unwrap();
    assert_eq!(created.role, Role::User);
    assert!(created.token.is_none());

    // The stored password is a bcrypt hash, never the plaintext
    assert_ne!(created.password_hash, "correct horse battery staple");
    assert!(bcrypt::verify("correct horse battery staple", &created.password_hash).unwrap());

    let fetched = users.get_by_email(&email).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.first_name, "Anne");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    require_emulator!();

    let users = user_service().await;
    let email = common::unique_email();

    users.create(signup(&email)).await.unwrap();

    // Surfaced as an authorization-style rejection, not a validation error
    let err = users.create(signup(&email)).await.unwrap_err();
    assert!(
        matches!(err, AppError::Unauthorized),
        "expected Unauthorized, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_authenticate() {
    require_emulator!();

    let users = user_service().await;
    let email = common::unique_email();
    users.create(signup(&email)).await.unwrap();

    let user = users
        .authenticate(&email, "correct horse battery staple")
        .await
        .unwrap();
    assert_eq!(user.email, email);

    let err = users.authenticate(&email, "wrong password").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = users
        .authenticate(&common::unique_email(), "whatever password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}

#[tokio::test]
async fn test_update_token_persists() {
    require_emulator!();

    let users = user_service().await;
    let email = common::unique_email();
    let user = users.create(signup(&email)).await.unwrap();

    let updated = users.update_token(&user.id, "session-token-1").await.unwrap();
    assert_eq!(updated.token.as_deref(), Some("session-token-1"));

    let fetched = users.get_by_id(&user.id).await.unwrap();
    assert_eq!(fetched.token.as_deref(), Some("session-token-1"));
}

#[tokio::test]
async fn test_get_by_id_missing_is_not_found() {
    require_emulator!();

    let users = user_service().await;
    let missing = uuid::Uuid::new_v4().to_string();

    let err = users.get_by_id(&missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_set_debug_mode() {
    require_emulator!();

    let users = user_service().await;
    let email = common::unique_email();
    let user = users.create(signup(&email)).await.unwrap();
    assert!(!user.debug_mode_enabled);

    let updated = users.set_debug_mode(&user.id, true).await.unwrap();
    assert!(updated.debug_mode_enabled);

    let fetched = users.get_by_id(&user.id).await.unwrap();
    assert!(fetched.debug_mode_enabled);
}

#[tokio::test]
async fn test_count_counts_accounts() {
    require_emulator!();

    let users = user_service().await;
    let before = users.count().await.unwrap();

    users.create(signup(&common::unique_email())).await.unwrap();

    let after = users.count().await.unwrap();
    assert!(after > before);
}
