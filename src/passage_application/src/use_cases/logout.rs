use passage_core::{RefreshToken, SessionStore};

use crate::error::AuthError;

/// Logout use case - removes the session bound to a token
pub struct LogoutUseCase<'a, S>
where
    S: SessionStore,
{
    session_store: &'a S,
}

impl<'a, S> LogoutUseCase<'a, S>
where
    S: SessionStore,
{
    pub fn new(session_store: &'a S) -> Self {
        Self { session_store }
    }

    /// Execute the logout use case
    ///
    /// # Returns
    /// `true` once the session is gone, `NoActiveSession` if there was none
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &RefreshToken) -> Result<bool, AuthError> {
        let removed = self
            .session_store
            .delete_if_present(token)
            .await
            .map_err(|e| AuthError::internal("logout", e))?;

        match removed {
            Some(user_id) => {
                tracing::info!(%user_id, "session closed");
                Ok(true)
            }
            None => Err(AuthError::NoActiveSession),
        }
    }
}
