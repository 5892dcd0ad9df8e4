use passage_core::{User, UserId, UserRepository};

use crate::{error::AccountError, use_cases::ownership::load_owned_user};

/// Get user use case - reads the caller's own profile
pub struct GetUserUseCase<'a, U>
where
    U: UserRepository,
{
    user_repository: &'a U,
}

impl<'a, U> GetUserUseCase<'a, U>
where
    U: UserRepository,
{
    pub fn new(user_repository: &'a U) -> Self {
        Self { user_repository }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip(self))]
    pub async fn execute(&self, caller: &UserId, target: &UserId) -> Result<User, AccountError> {
        load_owned_user(self.user_repository, caller, target, "get_user_by_id").await
    }
}
