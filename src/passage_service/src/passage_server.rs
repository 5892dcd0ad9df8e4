use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use passage_adapters::{
    config::ServerSettings,
    http::{
        require_bearer,
        routes::{
            create_purchase, get_user, login, logout, refresh, register, update_balance,
            update_email, update_password,
        },
    },
};
use passage_application::{AccountService, AuthService};
use passage_core::{AccessTokenCodec, CredentialHasher, SessionStore, UserRepository};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The two HTTP surfaces: the public auth endpoints and the bearer-protected
/// account endpoints. They are served on separate listeners.
pub struct PassageServer {
    auth_router: Router,
    account_router: Router,
}

impl PassageServer {
    /// Build both routers over the given services
    ///
    /// # Arguments
    /// * `auth_service` - Register/Login/Logout/Refresh, also used to verify bearer tokens
    /// * `account_service` - Ownership-gated account operations
    /// * `settings` - Request timeout and CORS origins
    pub fn new<U, S, H, C>(
        auth_service: AuthService<U, S, H, C>,
        account_service: AccountService<U, H>,
        settings: &ServerSettings,
    ) -> Self
    where
        U: UserRepository + Clone + 'static,
        S: SessionStore + 'static,
        H: CredentialHasher + 'static,
        C: AccessTokenCodec + 'static,
    {
        let auth_service = Arc::new(auth_service);

        let auth_router = Router::new()
            .route("/register", post(register::<U, S, H, C>))
            .route("/login", post(login::<U, S, H, C>))
            .route("/logout", post(logout::<U, S, H, C>))
            .route("/refresh", post(refresh::<U, S, H, C>))
            .with_state(auth_service.clone());

        let account_router = Router::new()
            .route("/users/{id}", get(get_user::<U, H>))
            .route("/users/{id}/email", put(update_email::<U, H>))
            .route("/users/{id}/password", put(update_password::<U, H>))
            .route("/users/{id}/balance", post(update_balance::<U, H>))
            .route("/users/{id}/purchases", post(create_purchase::<U, H>))
            .route_layer(from_fn_with_state(
                auth_service,
                require_bearer::<U, S, H, C>,
            ))
            .with_state(Arc::new(account_service));

        Self {
            auth_router: with_layers(auth_router, settings),
            account_router: with_layers(account_router, settings),
        }
    }

    pub fn auth_router(&self) -> Router {
        self.auth_router.clone()
    }

    pub fn account_router(&self) -> Router {
        self.account_router.clone()
    }

    /// Serve both routers until either listener fails
    pub async fn run(
        self,
        auth_listener: TcpListener,
        account_listener: TcpListener,
    ) -> Result<(), std::io::Error> {
        tracing::info!("Auth endpoints listening on {}", auth_listener.local_addr()?);
        tracing::info!(
            "Account endpoints listening on {}",
            account_listener.local_addr()?
        );

        tokio::try_join!(
            serve(auth_listener, self.auth_router),
            serve(account_listener, self.account_router),
        )?;

        Ok(())
    }
}

async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
        .serve(router.into_make_service())
        .await
}

fn with_layers(router: Router, settings: &ServerSettings) -> Router {
    let mut router = router.layer(TimeoutLayer::new(settings.request_timeout()));

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_origin(AllowOrigin::list(origins));
        router = router.layer(cors);
    }

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(make_span_with_request_id)
            .on_request(on_request)
            .on_response(on_response),
    )
}
