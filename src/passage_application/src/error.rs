use std::fmt::Display;

use thiserror::Error;

use crate::token_issuer::TokenError;

/// Failure kinds of Register, Login, Logout and RefreshSession.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    AlreadyExists,
    #[error("User not found")]
    NotFound,
    #[error("No active session")]
    NoActiveSession,
    #[error("Invalid access token: {0}")]
    InvalidToken(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub(crate) fn internal(operation: &str, cause: impl Display) -> Self {
        AuthError::Internal(format!("{operation}: {cause}"))
    }
}

impl From<TokenError> for AuthError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::NoActiveSession => AuthError::NoActiveSession,
            TokenError::InvalidToken(e) => AuthError::InvalidToken(e.to_string()),
            TokenError::Internal(e) => AuthError::Internal(e),
        }
    }
}

/// Failure kinds of the ownership-gated account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("Not allowed to access this account")]
    Forbidden,
    #[error("Wrong email")]
    WrongEmail,
    #[error("Email already taken")]
    EmailAlreadyTaken,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub(crate) fn internal(operation: &str, cause: impl Display) -> Self {
        AccountError::Internal(format!("{operation}: {cause}"))
    }
}
