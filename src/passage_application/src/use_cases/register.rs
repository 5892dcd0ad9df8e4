use chrono::Utc;
use passage_core::{
    CredentialHasher, NewUser, UserId, UserRepository, UserRepositoryError, Validator,
};
use secrecy::Secret;

use crate::error::AuthError;

const OPERATION: &str = "register";

/// Register use case - creates a new user record
pub struct RegisterUseCase<'a, U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    user_repository: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> RegisterUseCase<'a, U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    pub fn new(user_repository: &'a U, hasher: &'a H) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    /// Execute the register use case
    ///
    /// The availability checks only fail fast before the password is hashed;
    /// the repository's uniqueness constraint on save is what decides.
    ///
    /// # Returns
    /// The new user's id, or `InvalidCredentials`, `AlreadyExists`, `Internal`
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
        password: Secret<String>,
    ) -> Result<UserId, AuthError> {
        let input = Validator::check_register(username, email, password).map_err(|e| {
            tracing::info!(error = %e, "registration input rejected");
            AuthError::InvalidCredentials
        })?;

        let username_available = self
            .user_repository
            .is_username_available(&input.username)
            .await
            .map_err(|e| AuthError::internal(OPERATION, e))?;
        if !username_available {
            tracing::warn!("username already taken");
            return Err(AuthError::AlreadyExists);
        }

        let email_available = self
            .user_repository
            .is_email_available(&input.email)
            .await
            .map_err(|e| AuthError::internal(OPERATION, e))?;
        if !email_available {
            tracing::warn!("email already taken");
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(&input.password).await.map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            AuthError::internal(OPERATION, e)
        })?;

        let new_user = NewUser {
            id: UserId::new(),
            username: input.username,
            email: input.email,
            password_hash,
            created_at: Utc::now(),
        };

        match self.user_repository.save_user(new_user).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "user registered");
                Ok(id)
            }
            Err(UserRepositoryError::UserAlreadyExists) => {
                tracing::warn!("uniqueness constraint rejected registration");
                Err(AuthError::AlreadyExists)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save user");
                Err(AuthError::internal(OPERATION, e))
            }
        }
    }
}
