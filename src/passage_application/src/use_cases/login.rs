use passage_core::{
    AccessTokenCodec, CredentialHasher, SessionStore, TokenPair, UserRepository,
    UserRepositoryError, Validator,
};
use secrecy::Secret;

use crate::{error::AuthError, token_issuer::TokenIssuer};

const OPERATION: &str = "login";

/// Login use case - authenticates credentials and opens a session
pub struct LoginUseCase<'a, U, H, S, C>
where
    U: UserRepository,
    H: CredentialHasher,
    S: SessionStore,
    C: AccessTokenCodec,
{
    user_repository: &'a U,
    hasher: &'a H,
    token_issuer: &'a TokenIssuer<S, C, U>,
}

impl<'a, U, H, S, C> LoginUseCase<'a, U, H, S, C>
where
    U: UserRepository,
    H: CredentialHasher,
    S: SessionStore,
    C: AccessTokenCodec,
{
    pub fn new(user_repository: &'a U, hasher: &'a H, token_issuer: &'a TokenIssuer<S, C, U>) -> Self {
        Self {
            user_repository,
            hasher,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `input` - Username or email; the lookup column is picked from its shape
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// A fresh access/refresh token pair
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, input: &str, password: Secret<String>) -> Result<TokenPair, AuthError> {
        let login = Validator::check_login(input, password).map_err(|e| {
            tracing::info!(error = %e, "login input rejected");
            AuthError::InvalidCredentials
        })?;

        let user = self
            .user_repository
            .get_user(login.kind, &login.identifier)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => {
                    tracing::info!(kind = %login.kind, "no user for login input");
                    AuthError::NotFound
                }
                e => AuthError::internal(OPERATION, e),
            })?;

        if !self.hasher.verify(&user.password_hash, &login.password).await {
            tracing::warn!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .token_issuer
            .issue_access_token(&user, self.token_issuer.lifetimes().access_token_ttl)?;
        let refresh_token = self.token_issuer.issue_refresh_token(&user.id).await?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
