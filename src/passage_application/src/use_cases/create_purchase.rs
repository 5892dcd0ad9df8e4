use passage_core::{Amount, UserId, UserRepository};

use crate::{
    error::AccountError,
    use_cases::ownership::{load_owned_user, write_error},
};

const OPERATION: &str = "create_purchase";

/// Create purchase use case - debits the purchase amount from the balance
pub struct CreatePurchaseUseCase<'a, U>
where
    U: UserRepository,
{
    user_repository: &'a U,
}

impl<'a, U> CreatePurchaseUseCase<'a, U>
where
    U: UserRepository,
{
    pub fn new(user_repository: &'a U) -> Self {
        Self { user_repository }
    }

    #[tracing::instrument(name = "CreatePurchaseUseCase::execute", skip(self))]
    pub async fn execute(&self, caller: &UserId, target: &UserId, amount: f64) -> Result<(), AccountError> {
        let amount = Amount::parse(amount).map_err(|e| AccountError::InvalidArgument(e.to_string()))?;

        let user = load_owned_user(self.user_repository, caller, target, OPERATION).await?;

        self.user_repository
            .create_purchase(&user.id, amount)
            .await
            .map_err(|e| write_error(OPERATION, e))?;

        tracing::info!(user_id = %user.id, amount = amount.value(), "purchase recorded");
        Ok(())
    }
}
