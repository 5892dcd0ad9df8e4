use passage_adapters::config::{PostgresSettings, RedisSettings};
use redis::{Client, RedisResult, aio::MultiplexedConnection};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the configured URL and runs all pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, BootstrapError> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret()).await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Configure and return a multiplexed async Redis connection
pub async fn configure_redis(
    settings: &RedisSettings,
) -> Result<MultiplexedConnection, BootstrapError> {
    let client = get_redis_client(&settings.url())?;
    Ok(client.get_multiplexed_async_connection().await?)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

/// Create a Redis client
///
/// # Arguments
/// * `redis_url` - Full `redis://` URL, including password and database
pub fn get_redis_client(redis_url: &str) -> RedisResult<Client> {
    redis::Client::open(redis_url)
}
