//! In-memory collaborators shared by the unit tests of this crate.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use passage_core::{
    AccessClaims, AccessToken, AccessTokenCodec, Amount, CredentialHasher, Email, HasherError,
    LoginKind, NewUser, Password, PasswordHash, RefreshToken, SessionStore, SessionStoreError,
    TokenCodecError, User, UserId, UserRepository, UserRepositoryError, Username,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use crate::token_issuer::TokenLifetimes;

pub fn lifetimes() -> TokenLifetimes {
    TokenLifetimes {
        access_token_ttl: Duration::from_secs(900),
        refresh_token_ttl: Duration::from_secs(3600),
    }
}

pub fn secret(value: &str) -> Secret<String> {
    Secret::from(value.to_string())
}

/// Inserts a user directly, hashing with [`PlainHasher`].
pub async fn seed_user(users: &InMemoryUsers, username: &str, email: &str, password: &str) -> User {
    let password = Password::parse(secret(password)).unwrap();
    let new_user = NewUser {
        id: UserId::new(),
        username: Username::parse(username).unwrap(),
        email: Email::parse(email).unwrap(),
        password_hash: PlainHasher.hash(&password).await.unwrap(),
        created_at: Utc::now(),
    };
    let id = users.save_user(new_user).await.unwrap();
    users.get_user_by_id(&id).await.unwrap()
}

/// Minimal user table for the use-case tests. Beyond plain storage it can
/// fail every call and can answer the availability pre-checks with a stale
/// "available", leaving the write-time constraint as the only guard.
#[derive(Default, Clone)]
pub struct InMemoryUsers {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    stale_pre_checks: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl InMemoryUsers {
    pub fn with_stale_pre_checks() -> Self {
        let users = Self::default();
        users.stale_pre_checks.store(true, Ordering::SeqCst);
        users
    }

    pub fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_failing(&self) -> Result<(), UserRepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserRepositoryError::UnexpectedError(
                "connection reset".to_string(),
            ));
        }
        Ok(())
    }

    async fn is_free(&self, taken: impl Fn(&User) -> bool) -> Result<bool, UserRepositoryError> {
        self.check_failing()?;
        if self.stale_pre_checks.load(Ordering::SeqCst) {
            return Ok(true);
        }
        Ok(!self.users.read().await.values().any(taken))
    }

    async fn modify(
        &self,
        id: &UserId,
        change: impl FnOnce(&mut User),
    ) -> Result<(), UserRepositoryError> {
        self.check_failing()?;
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserRepositoryError::UserNotFound)?;
        change(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn is_username_available(
        &self,
        username: &Username,
    ) -> Result<bool, UserRepositoryError> {
        self.is_free(|u| &u.username == username).await
    }

    async fn is_email_available(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        self.is_free(|u| &u.email == email).await
    }

    async fn save_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError> {
        self.check_failing()?;
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        let id = user.id;
        users.insert(id, User::from(user));
        Ok(id)
    }

    async fn get_user(&self, kind: LoginKind, value: &str) -> Result<User, UserRepositoryError> {
        self.check_failing()?;
        self.users
            .read()
            .await
            .values()
            .find(|u| match kind {
                LoginKind::Username => u.username.as_str() == value,
                LoginKind::Email => u.email.as_str() == value,
            })
            .cloned()
            .ok_or(UserRepositoryError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        self.check_failing()?;
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserRepositoryError::UserNotFound)
    }

    async fn update_email(&self, id: &UserId, email: &Email) -> Result<(), UserRepositoryError> {
        if self.users.read().await.values().any(|u| &u.email == email && &u.id != id) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        self.modify(id, |u| u.email = email.clone()).await
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        self.modify(id, |u| u.password_hash = password_hash.clone()).await
    }

    async fn update_balance(&self, id: &UserId, delta: Amount) -> Result<(), UserRepositoryError> {
        self.modify(id, |u| u.balance += delta.value()).await
    }

    async fn create_purchase(
        &self,
        id: &UserId,
        amount: Amount,
    ) -> Result<(), UserRepositoryError> {
        self.modify(id, |u| u.balance -= amount.value()).await
    }
}

#[derive(Default, Clone)]
pub struct InMemorySessions {
    sessions: Arc<RwLock<HashMap<String, (UserId, Duration)>>>,
}

impl InMemorySessions {
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn ttl_of(&self, token: &RefreshToken) -> Option<Duration> {
        self.sessions
            .read()
            .await
            .get(token.as_str())
            .map(|(_, ttl)| *ttl)
    }
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn put(
        &self,
        token: &RefreshToken,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(token.as_str().to_owned(), (*user_id, ttl));
        Ok(())
    }

    async fn delete_if_present(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<UserId>, SessionStoreError> {
        Ok(self
            .sessions
            .write()
            .await
            .remove(token.as_str())
            .map(|(user_id, _)| user_id))
    }

    async fn exists(&self, token: &RefreshToken) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.read().await.contains_key(token.as_str()))
    }
}

/// Reversible stand-in for the real hasher; keeps the tests fast.
#[derive(Default, Clone)]
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "plain${}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> bool {
        hash.as_ref()
            .expose_secret()
            .strip_prefix("plain$")
            .is_some_and(|stored| stored == candidate.as_ref().expose_secret())
    }
}

/// Unsigned `sub|email|exp` codec that still enforces expiry.
#[derive(Default, Clone)]
pub struct FakeCodec;

impl AccessTokenCodec for FakeCodec {
    fn encode(&self, claims: &AccessClaims) -> Result<AccessToken, TokenCodecError> {
        Ok(AccessToken::new(format!(
            "{}|{}|{}",
            claims.sub, claims.email, claims.exp
        )))
    }

    fn decode(&self, token: &str) -> Result<AccessClaims, TokenCodecError> {
        let invalid = || TokenCodecError::InvalidToken(token.to_string());
        let mut parts = token.split('|');
        let (Some(sub), Some(email), Some(exp), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let claims = AccessClaims {
            sub: UserId::parse(sub).map_err(|_| invalid())?,
            email: Email::parse(email).map_err(|_| invalid())?,
            exp: exp.parse().map_err(|_| invalid())?,
        };
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenCodecError::Expired);
        }
        Ok(claims)
    }
}
