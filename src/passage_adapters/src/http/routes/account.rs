use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use passage_application::AccountService;
use passage_core::{AccessClaims, CredentialHasher, User, UserId, UserRepository};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub balance: f64,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            balance: user.balance,
            discount: user.discount,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateEmailRequest {
    pub old_email: String,
    pub new_email: String,
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
}

#[derive(Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub success: bool,
}

const CONFIRMED: ConfirmationResponse = ConfirmationResponse { success: true };

fn parse_target(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|e| ApiError::InvalidArgument(e.to_string()))
}

#[tracing::instrument(name = "Get user", skip_all)]
pub async fn get_user<U, H>(
    State(service): State<Arc<AccountService<U, H>>>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let target = parse_target(&id)?;

    let user = service.get_user_by_id(&claims.sub, &target).await?;

    Ok(Json(UserResponse::from(user)))
}

#[tracing::instrument(name = "Update email", skip_all)]
pub async fn update_email<U, H>(
    State(service): State<Arc<AccountService<U, H>>>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let target = parse_target(&id)?;
    ApiError::require_non_empty("old_email", &request.old_email)?;
    ApiError::require_non_empty("new_email", &request.new_email)?;

    service
        .update_email(&claims.sub, &target, &request.old_email, &request.new_email)
        .await?;

    Ok(Json(CONFIRMED))
}

#[tracing::instrument(name = "Update password", skip_all)]
pub async fn update_password<U, H>(
    State(service): State<Arc<AccountService<U, H>>>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let target = parse_target(&id)?;
    ApiError::require_non_empty("old_password", request.old_password.expose_secret())?;
    ApiError::require_non_empty("new_password", request.new_password.expose_secret())?;

    service
        .update_password(
            &claims.sub,
            &target,
            request.old_password,
            request.new_password,
        )
        .await?;

    Ok(Json(CONFIRMED))
}

#[tracing::instrument(name = "Update balance", skip_all)]
pub async fn update_balance<U, H>(
    State(service): State<Arc<AccountService<U, H>>>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let target = parse_target(&id)?;

    service
        .update_balance(&claims.sub, &target, request.amount)
        .await?;

    Ok(Json(CONFIRMED))
}

#[tracing::instrument(name = "Create purchase", skip_all)]
pub async fn create_purchase<U, H>(
    State(service): State<Arc<AccountService<U, H>>>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let target = parse_target(&id)?;

    service
        .create_purchase(&claims.sub, &target, request.amount)
        .await?;

    Ok(Json(CONFIRMED))
}
