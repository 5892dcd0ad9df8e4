use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use passage_application::{AccountError, AuthError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Not allowed to access this account")]
    Forbidden,

    #[error("User not found")]
    NotFound,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Email already taken")]
    EmailAlreadyTaken,

    #[error("Wrong email")]
    WrongEmail,

    #[error("No active session")]
    NoActiveSession,

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::WrongEmail => StatusCode::BAD_REQUEST,

            ApiError::InvalidCredentials
            | ApiError::Unauthenticated(_)
            | ApiError::NoActiveSession => StatusCode::UNAUTHORIZED,

            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists | ApiError::EmailAlreadyTaken => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Rejects a request field that is empty after trimming.
    pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ApiError> {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidArgument(format!("{field} is required")));
        }
        Ok(())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_message = match &self {
            ApiError::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::AlreadyExists => ApiError::AlreadyExists,
            AuthError::NotFound => ApiError::NotFound,
            AuthError::NoActiveSession => ApiError::NoActiveSession,
            AuthError::InvalidToken(e) => ApiError::Unauthenticated(e),
            AuthError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::InvalidArgument(e) => ApiError::InvalidArgument(e),
            AccountError::InvalidCredentials => ApiError::InvalidCredentials,
            AccountError::NotFound => ApiError::NotFound,
            AccountError::Forbidden => ApiError::Forbidden,
            AccountError::WrongEmail => ApiError::WrongEmail,
            AccountError::EmailAlreadyTaken => ApiError::EmailAlreadyTaken,
            AccountError::Internal(e) => ApiError::Internal(e),
        }
    }
}
