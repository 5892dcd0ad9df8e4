use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use passage_core::{
    Amount, Email, LoginKind, NewUser, PasswordHash, User, UserId, UserRepository,
    UserRepositoryError, Username,
};
use tokio::sync::RwLock;

/// In-memory user repository. One lock guards the whole map, so the uniqueness
/// check and the insert in `save_user` happen as one step.
#[derive(Default, Clone)]
pub struct HashMapUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for HashMapUserRepository {
    async fn is_username_available(
        &self,
        username: &Username,
    ) -> Result<bool, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(!users.values().any(|u| &u.username == username))
    }

    async fn is_email_available(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(!users.values().any(|u| &u.email == email))
    }

    async fn save_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError> {
        let mut users = self.users.write().await;
        let taken = users.contains_key(&user.id)
            || users
                .values()
                .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        let id = user.id;
        users.insert(id, User::from(user));
        Ok(id)
    }

    async fn get_user(&self, kind: LoginKind, value: &str) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| match kind {
                LoginKind::Username => u.username.as_str() == value,
                LoginKind::Email => u.email.as_str() == value,
            })
            .cloned()
            .ok_or(UserRepositoryError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        users
            .get(id)
            .cloned()
            .ok_or(UserRepositoryError::UserNotFound)
    }

    async fn update_email(&self, id: &UserId, email: &Email) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| &u.email == email && &u.id != id) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        let user = users.get_mut(id).ok_or(UserRepositoryError::UserNotFound)?;
        user.email = email.clone();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserRepositoryError::UserNotFound)?;
        user.password_hash = password_hash.clone();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_balance(&self, id: &UserId, delta: Amount) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserRepositoryError::UserNotFound)?;
        user.balance += delta.value();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn create_purchase(
        &self,
        id: &UserId,
        amount: Amount,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserRepositoryError::UserNotFound)?;
        user.balance -= amount.value();
        user.updated_at = Utc::now();
        Ok(())
    }
}
