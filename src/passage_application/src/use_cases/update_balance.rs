use passage_core::{Amount, UserId, UserRepository};

use crate::{
    error::AccountError,
    use_cases::ownership::{load_owned_user, write_error},
};

const OPERATION: &str = "update_balance";

/// Update balance use case - adds a signed delta to the caller's balance
///
/// Not idempotent: a retried request applies the delta twice.
pub struct UpdateBalanceUseCase<'a, U>
where
    U: UserRepository,
{
    user_repository: &'a U,
}

impl<'a, U> UpdateBalanceUseCase<'a, U>
where
    U: UserRepository,
{
    pub fn new(user_repository: &'a U) -> Self {
        Self { user_repository }
    }

    #[tracing::instrument(name = "UpdateBalanceUseCase::execute", skip(self))]
    pub async fn execute(&self, caller: &UserId, target: &UserId, delta: f64) -> Result<(), AccountError> {
        let delta = Amount::parse(delta).map_err(|e| AccountError::InvalidArgument(e.to_string()))?;

        let user = load_owned_user(self.user_repository, caller, target, OPERATION).await?;

        self.user_repository
            .update_balance(&user.id, delta)
            .await
            .map_err(|e| write_error(OPERATION, e))?;

        tracing::info!(user_id = %user.id, delta = delta.value(), "balance updated");
        Ok(())
    }
}
