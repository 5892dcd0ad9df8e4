use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use passage_application::AuthService;
use passage_core::{
    AccessTokenCodec, CredentialHasher, RefreshToken, SessionStore, TokenPair, UserRepository,
    Validator,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub input: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token.into_string(),
            refresh_token: pair.refresh_token.into_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, S, H, C>(
    State(service): State<Arc<AuthService<U, S, H, C>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    S: SessionStore + 'static,
    H: CredentialHasher + 'static,
    C: AccessTokenCodec + 'static,
{
    ApiError::require_non_empty("username", &request.username)?;
    ApiError::require_non_empty("email", &request.email)?;
    ApiError::require_non_empty("password", request.password.expose_secret())?;
    Validator::check_register(&request.username, &request.email, request.password.clone())
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

    let id = service
        .register(&request.username, &request.email, request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id: id.to_string() }),
    ))
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, S, H, C>(
    State(service): State<Arc<AuthService<U, S, H, C>>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    S: SessionStore + 'static,
    H: CredentialHasher + 'static,
    C: AccessTokenCodec + 'static,
{
    ApiError::require_non_empty("input", &request.input)?;
    ApiError::require_non_empty("password", request.password.expose_secret())?;

    let pair = service.login(&request.input, request.password).await?;

    Ok(Json(TokenPairResponse::from(pair)))
}

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, S, H, C>(
    State(service): State<Arc<AuthService<U, S, H, C>>>,
    Json(request): Json<LogoutRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    S: SessionStore + 'static,
    H: CredentialHasher + 'static,
    C: AccessTokenCodec + 'static,
{
    ApiError::require_non_empty("token", &request.token)?;

    let success = service.logout(&RefreshToken::from(request.token)).await?;

    Ok(Json(LogoutResponse { success }))
}

#[tracing::instrument(name = "Refresh session", skip_all)]
pub async fn refresh<U, S, H, C>(
    State(service): State<Arc<AuthService<U, S, H, C>>>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    S: SessionStore + 'static,
    H: CredentialHasher + 'static,
    C: AccessTokenCodec + 'static,
{
    ApiError::require_non_empty("refresh_token", &request.refresh_token)?;

    let pair = service
        .refresh_session(&RefreshToken::from(request.refresh_token))
        .await?;

    Ok(Json(TokenPairResponse::from(pair)))
}
