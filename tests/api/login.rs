//! tests/api/login.rs

use crate::helpers::{response_message, spawn_app};

#[tokio::test]
async fn login_returns_a_signed_token_for_valid_credentials() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app.test_user.login(&test_app).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["access_token"].as_str().unwrap();
    let claims = test_app.jwt_issuer().decode(token).unwrap();
    assert_eq!(claims.sub, test_app.test_user.user_id);
    assert_eq!(claims.user, test_app.test_user.display_name);
}

#[tokio::test]
async fn login_with_a_wrong_password_is_unauthorized() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .post_login(&serde_json::json!({
            "email": &test_app.test_user.email,
            "password": "wrong-password"
        }))
        .await;

    // Assert
    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        response.headers().get("WWW-Authenticate").unwrap(),
        "Bearer"
    );
    assert_eq!(response_message(response).await, "Authentication failed.");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_get_identical_responses() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let unknown_email = test_app
        .post_login(&serde_json::json!({
            "email": "nobody@example.com",
            "password": &test_app.test_user.password
        }))
        .await;
    let wrong_password = test_app
        .post_login(&serde_json::json!({
            "email": &test_app.test_user.email,
            "password": "wrong-password"
        }))
        .await;

    // Assert
    assert_eq!(unknown_email.status(), wrong_password.status());
    assert_eq!(
        response_message(unknown_email).await,
        response_message(wrong_password).await
    );
}

#[tokio::test]
async fn login_returns_a_400_for_invalid_data() {
    // Arrange
    let test_app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({"email": "not-an-email", "password": "secret"}),
            "invalid email",
        ),
        (
            serde_json::json!({"email": "a@example.com", "password": ""}),
            "empty password",
        ),
        (
            serde_json::json!({"email": "a@example.com"}),
            "missing password",
        ),
        (serde_json::json!({"password": "secret"}), "missing email"),
    ];

    for (body, description) in test_cases {
        // Act
        let response = test_app.post_login(&body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            // Additional customised error message on test failure
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let message = response_message(response).await;
        assert!(
            !message.contains("line 1"),
            "The error message leaked parser details when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn missing_fields_get_a_json_message_body() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .post_login(&serde_json::json!({"password": "secret"}))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "application/json"
    );
    assert_eq!(
        response_message(response).await,
        "The request body is not a valid JSON credentials object."
    );
}

#[tokio::test]
async fn a_non_json_body_gets_a_json_message_body() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .api_client
        .post(&format!("{}/login", &test_app.address))
        .header("Content-Type", "text/plain")
        .body("email=a@example.com&password=secret")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response_message(response).await,
        "The request body is not a valid JSON credentials object."
    );
}
