use std::time::Duration;

use passage_adapters::{
    Argon2Hasher, HashMapSessionStore, HashMapUserRepository, JwtCodec,
    config::{ServerSettings, constants::test},
};
use passage_application::{AccountService, AuthService, TokenLifetimes};
use passage_service::PassageServer;
use reqwest::{Client, Response};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub struct TestApp {
    pub auth_address: String,
    pub account_address: String,
    pub http_client: Client,
}

#[derive(Debug, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let user_repository = HashMapUserRepository::new();
        let auth_service = AuthService::new(
            user_repository.clone(),
            HashMapSessionStore::new(),
            Argon2Hasher::new(),
            JwtCodec::new(&Secret::from("api-test-secret".to_string())),
            TokenLifetimes {
                access_token_ttl: Duration::from_secs(60),
                refresh_token_ttl: Duration::from_secs(600),
            },
        );
        let account_service = AccountService::new(user_repository, Argon2Hasher::new());

        let settings = ServerSettings {
            auth_address: test::APP_ADDRESS.to_string(),
            account_address: test::APP_ADDRESS.to_string(),
            request_timeout_millis: 10_000,
            allowed_origins: vec![],
        };
        let server = PassageServer::new(auth_service, account_service, &settings);

        let auth_listener = TcpListener::bind(&settings.auth_address).await.unwrap();
        let account_listener = TcpListener::bind(&settings.account_address).await.unwrap();
        let auth_address = format!("http://{}", auth_listener.local_addr().unwrap());
        let account_address = format!("http://{}", account_listener.local_addr().unwrap());

        tokio::spawn(server.run(auth_listener, account_listener));

        Self {
            auth_address,
            account_address,
            http_client: Client::new(),
        }
    }

    pub async fn post_auth(&self, path: &str, body: &Value) -> Response {
        self.http_client
            .post(format!("{}{}", self.auth_address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response {
        self.post_auth(
            "/register",
            &json!({ "username": username, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, input: &str, password: &str) -> Response {
        self.post_auth("/login", &json!({ "input": input, "password": password }))
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Response {
        self.post_auth("/refresh", &json!({ "refresh_token": refresh_token }))
            .await
    }

    pub async fn logout(&self, token: &str) -> Response {
        self.post_auth("/logout", &json!({ "token": token })).await
    }

    /// Registers and logs in, returning the new id and token pair.
    pub async fn sign_in(&self, username: &str, email: &str, password: &str) -> (String, TokenPair) {
        let response = self.register(username, email, password).await;
        assert_eq!(response.status().as_u16(), 201);
        let id = response.json::<Value>().await.unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();

        let pair = self
            .login(username, password)
            .await
            .json::<TokenPair>()
            .await
            .unwrap();
        (id, pair)
    }

    pub async fn get_user(&self, access_token: &str, id: &str) -> Response {
        self.http_client
            .get(format!("{}/users/{}", self.account_address, id))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_account(
        &self,
        access_token: &str,
        id: &str,
        field: &str,
        body: &Value,
    ) -> Response {
        self.http_client
            .put(format!("{}/users/{}/{}", self.account_address, id, field))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_account(
        &self,
        access_token: &str,
        id: &str,
        field: &str,
        body: &Value,
    ) -> Response {
        self.http_client
            .post(format!("{}/users/{}/{}", self.account_address, id, field))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn error_message(response: Response) -> String {
    response.json::<Value>().await.unwrap()["error"]
        .as_str()
        .unwrap()
        .to_string()
}
