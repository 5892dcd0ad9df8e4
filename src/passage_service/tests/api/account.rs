use serde_json::{Value, json};

use crate::helpers::{TestApp, TokenPair, error_message};

#[tokio::test]
async fn should_return_401_without_bearer_token() {
    let app = TestApp::new().await;
    let (id, _) = app.sign_in("alice", "alice@x.com", "password1").await;

    let response = app
        .http_client
        .get(format!("{}/users/{}", app.account_address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let forged = app.get_user("not-a-token", &id).await;
    assert_eq!(forged.status().as_u16(), 401);
}

#[tokio::test]
async fn alice_walkthrough() {
    let app = TestApp::new().await;
    let (id, first) = app.sign_in("alice", "alice@x.com", "password1").await;

    let response = app
        .post_account(&first.access_token, &id, "balance", &json!({ "amount": 100.0 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .put_account(
            &first.access_token,
            &id,
            "email",
            &json!({ "old_email": "alice@x.com", "new_email": "a2@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let profile = app
        .get_user(&first.access_token, &id)
        .await
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(profile["balance"], 100.0);
    assert_eq!(profile["email"], "a2@x.com");
    assert_eq!(profile["username"], "alice");

    let second = app
        .refresh(&first.refresh_token)
        .await
        .json::<TokenPair>()
        .await
        .unwrap();
    let replay = app.refresh(&first.refresh_token).await;
    assert_eq!(replay.status().as_u16(), 401);

    let logout = app.logout(&second.refresh_token).await;
    assert_eq!(logout.status().as_u16(), 200);
    let after_logout = app.refresh(&second.refresh_token).await;
    assert_eq!(after_logout.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_403_for_another_users_account() {
    let app = TestApp::new().await;
    let (alice_id, _) = app.sign_in("alice", "alice@x.com", "password1").await;
    let (_, bob) = app.sign_in("bob", "bob@x.com", "password1").await;

    let read = app.get_user(&bob.access_token, &alice_id).await;
    assert_eq!(read.status().as_u16(), 403);

    // Field validity does not matter once the caller is not the owner.
    let email = app
        .put_account(
            &bob.access_token,
            &alice_id,
            "email",
            &json!({ "old_email": "wrong@x.com", "new_email": "b2@x.com" }),
        )
        .await;
    assert_eq!(email.status().as_u16(), 403);

    let purchase = app
        .post_account(&bob.access_token, &alice_id, "purchases", &json!({ "amount": 5.0 }))
        .await;
    assert_eq!(purchase.status().as_u16(), 403);
}

#[tokio::test]
async fn should_return_409_when_email_belongs_to_another_account() {
    let app = TestApp::new().await;
    app.sign_in("alice", "alice@x.com", "password1").await;
    let (bob_id, bob) = app.sign_in("bob", "bob@x.com", "password1").await;

    let response = app
        .put_account(
            &bob.access_token,
            &bob_id,
            "email",
            &json!({ "old_email": "bob@x.com", "new_email": "alice@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "Email already taken");
}

#[tokio::test]
async fn should_return_400_for_wrong_old_email_and_bad_amount() {
    let app = TestApp::new().await;
    let (id, pair) = app.sign_in("alice", "alice@x.com", "password1").await;

    let wrong_email = app
        .put_account(
            &pair.access_token,
            &id,
            "email",
            &json!({ "old_email": "other@x.com", "new_email": "a2@x.com" }),
        )
        .await;
    assert_eq!(wrong_email.status().as_u16(), 400);
    assert_eq!(error_message(wrong_email).await, "Wrong email");

    let zero = app
        .post_account(&pair.access_token, &id, "balance", &json!({ "amount": 0.0 }))
        .await;
    assert_eq!(zero.status().as_u16(), 400);

    let bad_id = app.get_user(&pair.access_token, "not-a-uuid").await;
    assert_eq!(bad_id.status().as_u16(), 400);
}

#[tokio::test]
async fn password_change_requires_old_password() {
    let app = TestApp::new().await;
    let (id, pair) = app.sign_in("alice", "alice@x.com", "password1").await;

    let wrong = app
        .put_account(
            &pair.access_token,
            &id,
            "password",
            &json!({ "old_password": "password9", "new_password": "password2" }),
        )
        .await;
    assert_eq!(wrong.status().as_u16(), 401);

    let ok = app
        .put_account(
            &pair.access_token,
            &id,
            "password",
            &json!({ "old_password": "password1", "new_password": "password2" }),
        )
        .await;
    assert_eq!(ok.status().as_u16(), 200);

    assert_eq!(app.login("alice", "password1").await.status().as_u16(), 401);
    assert_eq!(app.login("alice", "password2").await.status().as_u16(), 200);
}

#[tokio::test]
async fn purchase_debits_balance() {
    let app = TestApp::new().await;
    let (id, pair) = app.sign_in("alice", "alice@x.com", "password1").await;

    app.post_account(&pair.access_token, &id, "balance", &json!({ "amount": 50.0 }))
        .await;
    let response = app
        .post_account(&pair.access_token, &id, "purchases", &json!({ "amount": 20.0 }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let profile = app
        .get_user(&pair.access_token, &id)
        .await
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(profile["balance"], 30.0);
}
