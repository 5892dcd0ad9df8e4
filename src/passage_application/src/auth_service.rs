use passage_core::{
    AccessClaims, AccessTokenCodec, CredentialHasher, RefreshToken, SessionStore, TokenPair,
    UserId, UserRepository,
};
use secrecy::Secret;

use crate::{
    error::AuthError,
    token_issuer::{TokenIssuer, TokenLifetimes},
    use_cases::{LoginUseCase, LogoutUseCase, RegisterUseCase},
};

/// Register, Login, Logout and RefreshSession over one set of collaborators.
#[derive(Clone)]
pub struct AuthService<U, S, H, C> {
    user_repository: U,
    hasher: H,
    token_issuer: TokenIssuer<S, C, U>,
}

impl<U, S, H, C> AuthService<U, S, H, C>
where
    U: UserRepository + Clone,
    S: SessionStore,
    H: CredentialHasher,
    C: AccessTokenCodec,
{
    pub fn new(
        user_repository: U,
        session_store: S,
        hasher: H,
        codec: C,
        lifetimes: TokenLifetimes,
    ) -> Self {
        let token_issuer = TokenIssuer::new(session_store, codec, user_repository.clone(), lifetimes);
        Self {
            user_repository,
            hasher,
            token_issuer,
        }
    }

    pub fn token_issuer(&self) -> &TokenIssuer<S, C, U> {
        &self.token_issuer
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: Secret<String>,
    ) -> Result<UserId, AuthError> {
        RegisterUseCase::new(&self.user_repository, &self.hasher)
            .execute(username, email, password)
            .await
    }

    pub async fn login(&self, input: &str, password: Secret<String>) -> Result<TokenPair, AuthError> {
        LoginUseCase::new(&self.user_repository, &self.hasher, &self.token_issuer)
            .execute(input, password)
            .await
    }

    pub async fn logout(&self, token: &RefreshToken) -> Result<bool, AuthError> {
        LogoutUseCase::new(self.token_issuer.session_store())
            .execute(token)
            .await
    }

    pub async fn refresh_session(&self, refresh_token: &RefreshToken) -> Result<TokenPair, AuthError> {
        Ok(self.token_issuer.rotate_refresh_token(refresh_token).await?)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        Ok(self.token_issuer.verify_access_token(token)?)
    }
}
