use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    amount::Amount,
    email::Email,
    login_input::LoginKind,
    password::PasswordHash,
    token::RefreshToken,
    user::{NewUser, User, UserId},
    username::Username,
};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence for user records.
///
/// The availability checks are best-effort: implementations must also reject
/// duplicate usernames and emails in `save_user` and `update_email` with
/// `UserAlreadyExists`, since a check and a later write are not atomic with
/// respect to concurrent callers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn is_username_available(&self, username: &Username)
    -> Result<bool, UserRepositoryError>;

    async fn is_email_available(&self, email: &Email) -> Result<bool, UserRepositoryError>;

    async fn save_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError>;

    async fn get_user(&self, kind: LoginKind, value: &str) -> Result<User, UserRepositoryError>;

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError>;

    async fn update_email(&self, id: &UserId, email: &Email) -> Result<(), UserRepositoryError>;

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Adds `delta` to the stored balance.
    async fn update_balance(&self, id: &UserId, delta: Amount) -> Result<(), UserRepositoryError>;

    /// Debits `amount` from the stored balance.
    async fn create_purchase(&self, id: &UserId, amount: Amount)
    -> Result<(), UserRepositoryError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store error: {0}")]
    DatabaseError(String),
}

/// Binds opaque tokens to the identity they were issued for.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(
        &self,
        token: &RefreshToken,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), SessionStoreError>;

    /// Removes the binding and returns the identity it held. Among concurrent
    /// callers presenting the same token at most one observes `Some`.
    async fn delete_if_present(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<UserId>, SessionStoreError>;

    async fn exists(&self, token: &RefreshToken) -> Result<bool, SessionStoreError>;
}
