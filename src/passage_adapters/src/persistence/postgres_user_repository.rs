use chrono::{DateTime, Utc};
use passage_core::{
    Amount, Email, LoginKind, NewUser, PasswordHash, User, UserId, UserRepository,
    UserRepositoryError, Username,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserRepository { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    balance: f64,
    discount: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserRepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from(row.id),
            username: Username::parse(row.username)
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?,
            email: Email::parse(row.email)
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?,
            password_hash: PasswordHash::new(Secret::from(row.password_hash)),
            balance: row.balance,
            discount: row.discount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, username, email, password_hash, balance, discount, created_at, updated_at
    FROM users
"#;

fn map_write_error(e: sqlx::Error) -> UserRepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserRepositoryError::UserAlreadyExists;
        }
    }
    UserRepositoryError::UnexpectedError(e.to_string())
}

fn expect_one_row(result: sqlx::postgres::PgQueryResult) -> Result<(), UserRepositoryError> {
    if result.rows_affected() == 0 {
        return Err(UserRepositoryError::UserNotFound);
    }
    Ok(())
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(name = "Checking username availability in PostgreSQL", skip_all)]
    async fn is_username_available(
        &self,
        username: &Username,
    ) -> Result<bool, UserRepositoryError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
        Ok(!taken)
    }

    #[tracing::instrument(name = "Checking email availability in PostgreSQL", skip_all)]
    async fn is_email_available(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
        Ok(!taken)
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn save_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_ref().expose_secret())
        .bind(user.created_at);

        query.execute(&self.pool).await.map_err(map_write_error)?;

        Ok(user.id)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, kind: LoginKind, value: &str) -> Result<User, UserRepositoryError> {
        let sql = match kind {
            LoginKind::Username => format!("{SELECT_USER} WHERE username = $1"),
            LoginKind::Email => format!("{SELECT_USER} WHERE email = $1"),
        };

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserRepositoryError::UserNotFound);
        };
        User::try_from(row)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserRepositoryError::UserNotFound);
        };
        User::try_from(row)
    }

    #[tracing::instrument(name = "Updating email in PostgreSQL", skip_all)]
    async fn update_email(&self, id: &UserId, email: &Email) -> Result<(), UserRepositoryError> {
        let result = sqlx::query("UPDATE users SET email = $1, updated_at = now() WHERE id = $2")
            .bind(email.as_str())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        expect_one_row(result)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
                .bind(password_hash.as_ref().expose_secret())
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        expect_one_row(result)
    }

    #[tracing::instrument(name = "Updating balance in PostgreSQL", skip_all)]
    async fn update_balance(&self, id: &UserId, delta: Amount) -> Result<(), UserRepositoryError> {
        let result =
            sqlx::query("UPDATE users SET balance = balance + $1, updated_at = now() WHERE id = $2")
                .bind(delta.value())
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        expect_one_row(result)
    }

    #[tracing::instrument(name = "Recording purchase in PostgreSQL", skip_all)]
    async fn create_purchase(
        &self,
        id: &UserId,
        amount: Amount,
    ) -> Result<(), UserRepositoryError> {
        let result =
            sqlx::query("UPDATE users SET balance = balance - $1, updated_at = now() WHERE id = $2")
                .bind(amount.value())
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        expect_one_row(result)
    }
}
