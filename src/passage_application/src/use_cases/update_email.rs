use passage_core::{LoginKind, UserId, UserRepository, UserRepositoryError, Validator};

use crate::{
    error::AccountError,
    use_cases::ownership::{load_owned_user, write_error},
};

const OPERATION: &str = "update_email";

/// Update email use case - replaces the stored email after checking the old one
pub struct UpdateEmailUseCase<'a, U>
where
    U: UserRepository,
{
    user_repository: &'a U,
}

impl<'a, U> UpdateEmailUseCase<'a, U>
where
    U: UserRepository,
{
    pub fn new(user_repository: &'a U) -> Self {
        Self { user_repository }
    }

    /// Execute the update email use case
    ///
    /// # Returns
    /// `InvalidArgument` for malformed addresses, `WrongEmail` when `old_email`
    /// is not the stored one, `EmailAlreadyTaken` when another account owns
    /// `new_email`
    #[tracing::instrument(name = "UpdateEmailUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        caller: &UserId,
        target: &UserId,
        old_email: &str,
        new_email: &str,
    ) -> Result<(), AccountError> {
        let old_email = Validator::check_email(old_email)
            .map_err(|e| AccountError::InvalidArgument(format!("old email: {e}")))?;
        let new_email = Validator::check_email(new_email)
            .map_err(|e| AccountError::InvalidArgument(format!("new email: {e}")))?;
        if old_email == new_email {
            return Err(AccountError::InvalidArgument(
                "New email must differ from the old one".to_string(),
            ));
        }

        let user = load_owned_user(self.user_repository, caller, target, OPERATION).await?;

        if user.email != old_email {
            tracing::info!(user_id = %user.id, "old email does not match");
            return Err(AccountError::WrongEmail);
        }

        match self
            .user_repository
            .get_user(LoginKind::Email, new_email.as_str())
            .await
        {
            Ok(owner) if owner.id != user.id => {
                tracing::info!(user_id = %user.id, "new email owned by another account");
                return Err(AccountError::EmailAlreadyTaken);
            }
            Ok(_) | Err(UserRepositoryError::UserNotFound) => {}
            Err(e) => return Err(AccountError::internal(OPERATION, e)),
        }

        self.user_repository
            .update_email(&user.id, &new_email)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => AccountError::EmailAlreadyTaken,
                e => write_error(OPERATION, e),
            })?;

        tracing::info!(user_id = %user.id, "email updated");
        Ok(())
    }
}
