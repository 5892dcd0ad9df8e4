use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use passage_application::AuthService;
use passage_core::{AccessTokenCodec, CredentialHasher, SessionStore, UserRepository};

use super::routes::ApiError;

/// Verifies the `Authorization: Bearer <access token>` header and stores the
/// token's [`passage_core::AccessClaims`] in the request extensions.
pub async fn require_bearer<U, S, H, C>(
    State(service): State<Arc<AuthService<U, S, H, C>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserRepository + Clone + 'static,
    S: SessionStore + 'static,
    H: CredentialHasher + 'static,
    C: AccessTokenCodec + 'static,
{
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthenticated("Missing bearer token".to_string()))?;

    let claims = service.verify_access_token(token).map_err(|e| {
        tracing::info!(error = %e, "bearer token rejected");
        ApiError::Unauthenticated("Invalid access token".to_string())
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
