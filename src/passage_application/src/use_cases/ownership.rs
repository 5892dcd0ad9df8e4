use passage_core::{User, UserId, UserRepository, UserRepositoryError};

use crate::error::AccountError;

/// Loads `target` and confirms it belongs to `caller`.
///
/// Runs before any field-level check against the stored record, so a caller
/// probing someone else's account learns nothing beyond `Forbidden`.
pub(crate) async fn load_owned_user<U>(
    user_repository: &U,
    caller: &UserId,
    target: &UserId,
    operation: &str,
) -> Result<User, AccountError>
where
    U: UserRepository,
{
    let user = user_repository
        .get_user_by_id(target)
        .await
        .map_err(|e| match e {
            UserRepositoryError::UserNotFound => AccountError::NotFound,
            e => AccountError::internal(operation, e),
        })?;

    if &user.id != caller {
        tracing::warn!(%caller, %target, operation, "cross-account access denied");
        return Err(AccountError::Forbidden);
    }

    Ok(user)
}

/// Maps a repository failure on a record that was just loaded.
pub(crate) fn write_error(operation: &str, error: UserRepositoryError) -> AccountError {
    match error {
        UserRepositoryError::UserNotFound => AccountError::NotFound,
        e => {
            tracing::error!(error = %e, operation, "account write failed");
            AccountError::internal(operation, e)
        }
    }
}
