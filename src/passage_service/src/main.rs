use color_eyre::eyre::Result;
use passage_adapters::{
    Argon2Hasher, JwtCodec, PostgresUserRepository, RedisSessionStore, config::PassageSettings,
};
use passage_application::{AccountService, AuthService};
use passage_service::{PassageServer, configure_postgresql, configure_redis, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Refuses to start without a signing secret
    let settings = PassageSettings::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let redis_conn = configure_redis(&settings.redis).await?;

    let user_repository = PostgresUserRepository::new(pg_pool);
    let session_store = RedisSessionStore::new(redis_conn);
    let codec = JwtCodec::new(&settings.auth.jwt_secret);

    let auth_service = AuthService::new(
        user_repository.clone(),
        session_store,
        Argon2Hasher::new(),
        codec,
        settings.auth.token_lifetimes(),
    );
    let account_service = AccountService::new(user_repository, Argon2Hasher::new());

    let server = PassageServer::new(auth_service, account_service, &settings.server);

    let auth_listener = TcpListener::bind(&settings.server.auth_address).await?;
    let account_listener = TcpListener::bind(&settings.server.account_address).await?;
    tracing::info!("Starting passage...");

    server.run(auth_listener, account_listener).await?;

    Ok(())
}
