//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use the feature crates' error enums.

mod config;
mod services;

use std::net::SocketAddr;
use std::str::FromStr;

use auth::PgUserRepository;
use auth::middleware::identify_user;
use axum::Router;
use axum::middleware::from_fn_with_state;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;
use crate::services::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,gallery=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let mut connect_options = PgConnectOptions::from_str(&config.database_url)?;
    if config.production {
        connect_options = connect_options.disable_statement_logging();
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Connected to database");

    let services = Services::setup(pool, &config).await?;

    tracing::info!(
        production = config.production,
        images_dir = %config.images_dir.display(),
        "Services ready"
    );

    // Build router
    let app = Router::new()
        .merge(auth::auth_router(services.auth.clone()))
        .merge(gallery::gallery_router(services.gallery))
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .layer(from_fn_with_state(
            services.auth,
            identify_user::<PgUserRepository>,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
