use passage_core::{CredentialHasher, User, UserId, UserRepository};
use secrecy::Secret;

use crate::{
    error::AccountError,
    use_cases::{
        CreatePurchaseUseCase, GetUserUseCase, UpdateBalanceUseCase, UpdateEmailUseCase,
        UpdatePasswordUseCase,
    },
};

/// Account operations. Every method takes the authenticated caller first and
/// refuses to act on any record but the caller's own.
#[derive(Clone)]
pub struct AccountService<U, H> {
    user_repository: U,
    hasher: H,
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    pub fn new(user_repository: U, hasher: H) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    pub async fn get_user_by_id(&self, caller: &UserId, target: &UserId) -> Result<User, AccountError> {
        GetUserUseCase::new(&self.user_repository)
            .execute(caller, target)
            .await
    }

    pub async fn update_email(
        &self,
        caller: &UserId,
        target: &UserId,
        old_email: &str,
        new_email: &str,
    ) -> Result<(), AccountError> {
        UpdateEmailUseCase::new(&self.user_repository)
            .execute(caller, target, old_email, new_email)
            .await
    }

    pub async fn update_password(
        &self,
        caller: &UserId,
        target: &UserId,
        old_password: Secret<String>,
        new_password: Secret<String>,
    ) -> Result<(), AccountError> {
        UpdatePasswordUseCase::new(&self.user_repository, &self.hasher)
            .execute(caller, target, old_password, new_password)
            .await
    }

    pub async fn update_balance(&self, caller: &UserId, target: &UserId, delta: f64) -> Result<(), AccountError> {
        UpdateBalanceUseCase::new(&self.user_repository)
            .execute(caller, target, delta)
            .await
    }

    pub async fn create_purchase(
        &self,
        caller: &UserId,
        target: &UserId,
        amount: f64,
    ) -> Result<(), AccountError> {
        CreatePurchaseUseCase::new(&self.user_repository)
            .execute(caller, target, amount)
            .await
    }
}
