/**
 * Server Initialization
 *
 * This module turns a loaded `ServerConfig` into a ready-to-serve router.
 *
 * # Initialization Process
 *
 * 1. Connect to Postgres and run migrations, or fall back to the
 *    in-memory store when no `DATABASE_URL` is configured
 * 2. Build the token codec, password hasher and cookie settings
 * 3. Attach the media and chat integrations whose credentials are present
 * 4. Create the router and apply the CORS policy
 *
 * A configured database that cannot be reached is a startup error; the
 * server does not silently run on memory in that case.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::{PasswordHasher, SessionCookie};
use crate::backend::integrations::{CloudinaryMediaStore, StreamChatClient};
use crate::backend::routes::{cors_layer, create_router};
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::Stores;

const MAX_DB_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to the database and bring the schema up to date
async fn load_database(url: &str) -> Result<PgPool, StartupError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(url)
        .await?;
    tracing::info!("Database connected");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Build the shared application state from configuration
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let stores = match &config.database_url {
        Some(url) => Stores::postgres(load_database(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store (data is lost on restart)");
            Stores::memory()
        }
    };

    let mut state = AppState::new(stores, &config.jwt_secret)
        .with_hasher(PasswordHasher::new(config.bcrypt_cost))
        .with_session_cookie(SessionCookie::new(config.production));

    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!("Avatar uploads enabled (cloud {})", cloudinary.cloud_name);
            state = state.with_media(Arc::new(CloudinaryMediaStore::new(cloudinary)));
        }
        None => tracing::warn!("Cloudinary not configured, avatar uploads are disabled"),
    }

    match &config.stream {
        Some(stream) => {
            tracing::info!("Chat identity sync enabled");
            state = state.with_chat(Arc::new(StreamChatClient::new(stream)));
        }
        None => tracing::warn!("Stream not configured, chat identity sync and tokens are disabled"),
    }

    Ok(state)
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing shuvomedia backend server");

    let state = build_state(config).await?;
    let app = create_router(state).layer(cors_layer(config.allowed_origin.clone()));

    tracing::info!(
        "Router configured (CORS origin {:?}, secure cookies: {})",
        config.allowed_origin,
        config.production
    );
    Ok(app)
}
