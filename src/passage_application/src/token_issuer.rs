use std::time::Duration;

use chrono::Utc;
use passage_core::{
    AccessClaims, AccessToken, AccessTokenCodec, RefreshToken, SessionStore, TokenCodecError,
    TokenPair, User, UserId, UserRepository, UserRepositoryError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("No active session")]
    NoActiveSession,
    #[error("{0}")]
    InvalidToken(TokenCodecError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

/// Issues access tokens and drives single-use refresh-token rotation.
#[derive(Clone)]
pub struct TokenIssuer<S, C, U> {
    session_store: S,
    codec: C,
    user_repository: U,
    lifetimes: TokenLifetimes,
}

impl<S, C, U> TokenIssuer<S, C, U>
where
    S: SessionStore,
    C: AccessTokenCodec,
    U: UserRepository,
{
    pub fn new(session_store: S, codec: C, user_repository: U, lifetimes: TokenLifetimes) -> Self {
        Self {
            session_store,
            codec,
            user_repository,
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    pub fn session_store(&self) -> &S {
        &self.session_store
    }

    pub fn issue_access_token(&self, user: &User, ttl: Duration) -> Result<AccessToken, TokenError> {
        if ttl.is_zero() {
            return Err(TokenError::Internal(
                "access token ttl must be positive".to_string(),
            ));
        }
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| TokenError::Internal(format!("access token ttl out of range: {e}")))?;
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Internal("access token expiry out of range".to_string()))?
            .timestamp();

        let claims = AccessClaims {
            sub: user.id,
            email: user.email.clone(),
            exp,
        };

        self.codec
            .encode(&claims)
            .map_err(|e| TokenError::Internal(format!("issue access token: {e}")))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.codec.decode(token).map_err(TokenError::InvalidToken)
    }

    /// Generates a refresh token and binds it to `user_id` for the refresh TTL.
    pub async fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, TokenError> {
        let token = RefreshToken::generate();

        self.session_store
            .put(&token, user_id, self.lifetimes.refresh_token_ttl)
            .await
            .map_err(|e| TokenError::Internal(format!("store refresh token: {e}")))?;

        Ok(token)
    }

    /// Exchanges `old` for a fresh token pair.
    ///
    /// The old token is consumed with a single atomic delete before anything is
    /// issued, so two callers racing on one token cannot both succeed. If
    /// issuing fails after the delete the old token stays consumed and the
    /// caller has to log in again.
    #[tracing::instrument(name = "TokenIssuer::rotate_refresh_token", skip_all)]
    pub async fn rotate_refresh_token(&self, old: &RefreshToken) -> Result<TokenPair, TokenError> {
        let user_id = self
            .session_store
            .delete_if_present(old)
            .await
            .map_err(|e| TokenError::Internal(format!("consume refresh token: {e}")))?
            .ok_or(TokenError::NoActiveSession)?;

        let user = match self.user_repository.get_user_by_id(&user_id).await {
            Ok(user) => user,
            Err(UserRepositoryError::UserNotFound) => {
                tracing::warn!(%user_id, "refresh token bound to unknown user");
                return Err(TokenError::NoActiveSession);
            }
            Err(e) => return Err(TokenError::Internal(format!("resolve session owner: {e}"))),
        };

        let refresh_token = self.issue_refresh_token(&user.id).await?;
        let access_token = self.issue_access_token(&user, self.lifetimes.access_token_ttl)?;

        tracing::info!(%user_id, "refresh token rotated");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
