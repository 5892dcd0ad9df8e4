use passage_core::{CredentialHasher, UserId, UserRepository, Validator};
use secrecy::{ExposeSecret, Secret};

use crate::{
    error::AccountError,
    use_cases::ownership::{load_owned_user, write_error},
};

const OPERATION: &str = "update_password";

/// Update password use case - verifies the current password and stores a new hash
pub struct UpdatePasswordUseCase<'a, U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    user_repository: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> UpdatePasswordUseCase<'a, U, H>
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

    #[tracing::instrument(
        name = "UpdatePasswordUseCase::execute",
        skip(self, old_password, new_password)
    )]
    pub async fn execute(
        &self,
        caller: &UserId,
        target: &UserId,
        old_password: Secret<String>,
        new_password: Secret<String>,
    ) -> Result<(), AccountError> {
        if old_password.expose_secret() == new_password.expose_secret() {
            return Err(AccountError::InvalidArgument(
                "New password must differ from the old one".to_string(),
            ));
        }
        let old_password = Validator::check_password(old_password)
            .map_err(|e| AccountError::InvalidArgument(format!("old password: {e}")))?;
        let new_password = Validator::check_password(new_password)
            .map_err(|e| AccountError::InvalidArgument(format!("new password: {e}")))?;

        let user = load_owned_user(self.user_repository, caller, target, OPERATION).await?;

        if !self.hasher.verify(&user.password_hash, &old_password).await {
            tracing::warn!(user_id = %user.id, "old password does not verify");
            return Err(AccountError::InvalidCredentials);
        }

        let password_hash = self
            .hasher
            .hash(&new_password)
            .await
            .map_err(|e| AccountError::internal(OPERATION, e))?;

        self.user_repository
            .update_password(&user.id, &password_hash)
            .await
            .map_err(|e| write_error(OPERATION, e))?;

        tracing::info!(user_id = %user.id, "password updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use passage_core::Password;

    use super::*;
    use crate::test_support::{InMemoryUsers, PlainHasher, secret, seed_user};

    #[tokio::test]
    async fn test_update_password_success() {
        let users = InMemoryUsers::default();
        let alice = seed_user(&users, "alice", "alice@x.com", "password1").await;

        UpdatePasswordUseCase::new(&users, &PlainHasher)
            .execute(&alice.id, &alice.id, secret("password1"), secret("password2"))
            .await
            .unwrap();

        let stored = users.get_user_by_id(&alice.id).await.unwrap();
        let new_password = Password::parse(secret("password2")).unwrap();
        assert!(PlainHasher.verify(&stored.password_hash, &new_password).await);
    }

    #[tokio::test]
    async fn test_update_password_wrong_old_password() {
        let users = InMemoryUsers::default();
        let alice = seed_user(&users, "alice", "alice@x.com", "password1").await;

        let result = UpdatePasswordUseCase::new(&users, &PlainHasher)
            .execute(&alice.id, &alice.id, secret("password9"), secret("password2"))
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_password_shape_checks() {
        let users = InMemoryUsers::default();
        let alice = seed_user(&users, "alice", "alice@x.com", "password1").await;
        let use_case = UpdatePasswordUseCase::new(&users, &PlainHasher);

        for (old, new) in [
            ("password1", "password1"),
            ("short", "password2"),
            ("password1", "short"),
        ] {
            let result = use_case
                .execute(&alice.id, &alice.id, secret(old), secret(new))
                .await;
            assert!(matches!(result, Err(AccountError::InvalidArgument(_))));
        }
    }

    #[tokio::test]
    async fn test_update_password_of_other_account_is_forbidden() {
        let users = InMemoryUsers::default();
        let alice = seed_user(&users, "alice", "alice@x.com", "password1").await;
        let bob = seed_user(&users, "bob", "bob@x.com", "password1").await;

        let result = UpdatePasswordUseCase::new(&users, &PlainHasher)
            .execute(&bob.id, &alice.id, secret("password1"), secret("password2"))
            .await;
        assert!(matches!(result, Err(AccountError::Forbidden)));
    }
}
