//! tests/api/reset_password.rs

use crate::helpers::{response_message, spawn_app};
use secrecy::ExposeSecret;

#[tokio::test]
async fn reset_password_replaces_the_stored_password() {
    // Arrange
    let test_app = spawn_app().await;
    let new_password = "newpass";

    // Act - Part 1 - reset
    let response = test_app
        .post_reset_password(&serde_json::json!({
            "email": &test_app.test_user.email,
            "password": new_password
        }))
        .await;
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response_message(response).await,
        "Your password has been reset."
    );

    // Act - Part 2 - log in with the new password
    let response = test_app
        .post_login(&serde_json::json!({
            "email": &test_app.test_user.email,
            "password": new_password
        }))
        .await;
    assert_eq!(200, response.status().as_u16());

    // Act - Part 3 - the old password is gone
    let response = test_app.test_user.login(&test_app).await;
    assert_eq!(401, response.status().as_u16());

    // Assert - only a digest is stored
    let record = test_app
        .store
        .get(test_app.test_user.user_id)
        .await
        .unwrap();
    assert_ne!(record.password_digest.expose_secret(), new_password);
}

#[tokio::test]
async fn reset_password_for_unknown_email_is_not_permitted() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .post_reset_password(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "newpass"
        }))
        .await;

    // Assert
    assert_eq!(422, response.status().as_u16());
    assert_eq!(
        response_message(response).await,
        "This action can not be done."
    );
    // the test user is untouched
    let response = test_app.test_user.login(&test_app).await;
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn reset_password_rejects_an_empty_password() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .post_reset_password(&serde_json::json!({
            "email": &test_app.test_user.email,
            "password": "   "
        }))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let response = test_app.test_user.login(&test_app).await;
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn reset_password_with_a_missing_field_gets_a_json_message_body() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .post_reset_password(&serde_json::json!({
            "email": &test_app.test_user.email
        }))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response_message(response).await,
        "The request body is not a valid JSON credentials object."
    );
}
