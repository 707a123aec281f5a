//! Rosterly API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use rosterly_application::{
    AccountService, Authenticator, DirectoryService, PolicyEngine, TokenConfig, TokenService,
};
use rosterly_core::AppError;
use rosterly_domain::Hierarchy;
use rosterly_infrastructure::{
    Argon2PasswordHasher, InMemoryEmployeeRepository, InMemoryUserRepository,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let hierarchy = Arc::new(Hierarchy::new(config.hierarchy.clone())?);

    let token_service = TokenService::new(TokenConfig::with_default_ttls(
        config.access_secret.clone(),
        config.refresh_secret.clone(),
    ))?;
    let authenticator = Authenticator::new(token_service.clone());

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let employee_repository = Arc::new(InMemoryEmployeeRepository::new());
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    if config.dev_seed {
        dev_seed::run(
            &user_repository,
            &employee_repository,
            password_hasher.as_ref(),
            &hierarchy,
        )
        .await?;
    }

    let account_service = AccountService::new(
        user_repository.clone(),
        password_hasher.clone(),
        token_service.clone(),
    );
    let policy_engine = PolicyEngine::new(hierarchy.clone());
    let directory_service = DirectoryService::new(employee_repository.clone(), policy_engine);

    let app_state = AppState {
        account_service,
        directory_service,
        token_service,
        authenticator,
    };

    let protected_routes = Router::new()
        .route(
            "/api/employees",
            get(handlers::employees::list_employees_handler),
        )
        .route(
            "/api/employees/{employee_id}",
            get(handlers::employees::get_employee_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(handlers::auth::login_handler))
        .route(
            "/auth/refresh-token",
            post(handlers::auth::refresh_token_handler),
        )
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let host = IpAddr::from_str(&config.api_host).map_err(|error| {
        AppError::Internal(format!("invalid API_HOST '{}': {error}", config.api_host))
    })?;
    let address = SocketAddr::from((host, config.api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rosterly-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
