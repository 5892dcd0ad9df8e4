use serde_json::json;

use crate::helpers::{TestApp, TokenPair, error_message};

#[tokio::test]
async fn should_return_201_for_valid_registration() {
    let app = TestApp::new().await;

    let response = app.register("alice", "alice@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn should_return_400_for_malformed_registration() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "username": "", "email": "alice@x.com", "password": "password1" }),
        json!({ "username": "al", "email": "alice@x.com", "password": "password1" }),
        json!({ "username": "alice", "email": "alice-at-x", "password": "password1" }),
        json!({ "username": "alice", "email": "alice@x.com", "password": "short" }),
    ];

    for body in test_cases {
        let response = app.post_auth("/register", &body).await;
        assert_eq!(response.status().as_u16(), 400, "input: {body}");
    }
}

#[tokio::test]
async fn should_return_409_for_duplicate_registration() {
    let app = TestApp::new().await;
    app.register("alice", "alice@x.com", "password1").await;

    let response = app.register("alice", "other@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "User already exists");
}

#[tokio::test]
async fn should_login_with_username_or_email() {
    let app = TestApp::new().await;
    app.register("alice", "alice@x.com", "password1").await;

    for input in ["alice", "alice@x.com"] {
        let response = app.login(input, "password1").await;
        assert_eq!(response.status().as_u16(), 200);

        let pair = response.json::<TokenPair>().await.unwrap();
        assert!(!pair.access_token.is_empty());
        assert_eq!(pair.refresh_token.len(), 64);
    }
}

#[tokio::test]
async fn should_return_401_for_wrong_password_and_404_for_unknown_user() {
    let app = TestApp::new().await;
    app.register("alice", "alice@x.com", "password1").await;

    let wrong = app.login("alice", "password2").await;
    assert_eq!(wrong.status().as_u16(), 401);

    let unknown = app.login("bob", "password1").await;
    assert_eq!(unknown.status().as_u16(), 404);

    let empty = app.login("", "password1").await;
    assert_eq!(empty.status().as_u16(), 400);
}

#[tokio::test]
async fn refresh_token_is_single_use() {
    let app = TestApp::new().await;
    let (_, first) = app.sign_in("alice", "alice@x.com", "password1").await;

    let response = app.refresh(&first.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);
    let second = response.json::<TokenPair>().await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);

    let replay = app.refresh(&first.refresh_token).await;
    assert_eq!(replay.status().as_u16(), 401);
    assert_eq!(error_message(replay).await, "No active session");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new().await;
    let (_, pair) = app.sign_in("alice", "alice@x.com", "password1").await;

    let response = app.logout(&pair.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<serde_json::Value>().await.unwrap()["success"],
        true
    );

    let again = app.logout(&pair.refresh_token).await;
    assert_eq!(again.status().as_u16(), 401);

    let refresh = app.refresh(&pair.refresh_token).await;
    assert_eq!(refresh.status().as_u16(), 401);
}
