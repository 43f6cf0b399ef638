//! LearnTrack server binary.
//!
//! Wires configuration, the PostgreSQL adapters, the Stripe payment
//! provider and the JWT verifier into the Axum application.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{middleware, routing::get, Router};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use learntrack::adapters::auth::{JwtConfig, JwtTokenVerifier};
use learntrack::adapters::http::{api_router, auth_middleware, AppState, AuthState};
use learntrack::adapters::postgres::{
    PostgresCourseCatalog, PostgresEnrollmentReader, PostgresEnrollmentRepository,
};
use learntrack::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use learntrack::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting LearnTrack server"
    );

    // Database pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Persistence adapters
    let state = AppState {
        enrollment_repository: Arc::new(PostgresEnrollmentRepository::new(pool.clone())),
        enrollment_reader: Arc::new(PostgresEnrollmentReader::new(pool.clone())),
        course_catalog: Arc::new(PostgresCourseCatalog::new(pool.clone())),
        payment_provider: Arc::new(build_payment_provider(&config)),
    };

    // Token verification
    let jwt_config = JwtConfig::new(
        SecretString::new(config.auth.jwt_secret.clone()),
        config.auth.jwt_issuer.clone(),
        config.auth.jwt_audience.clone(),
    );
    let auth_state: AuthState = Arc::new(JwtTokenVerifier::new(jwt_config));

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        origins => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_payment_provider(config: &AppConfig) -> StripePaymentAdapter {
    let mut stripe_config = StripeConfig::new(
        config.payment.stripe_api_key.clone(),
        config.payment.stripe_webhook_secret.clone(),
    )
    .with_require_livemode(config.payment.require_livemode);

    if let Some(base_url) = &config.payment.api_base_url {
        stripe_config = stripe_config.with_base_url(base_url.clone());
    }

    StripePaymentAdapter::new(stripe_config)
}

async fn health() -> &'static str {
    "OK"
}
