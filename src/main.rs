use std::sync::Arc;

use cloudbankx::api::{self, AppState};
use cloudbankx::auth::{CredentialStore, SessionKey};
use cloudbankx::services::BankingService;
use cloudbankx::store::AccountStore;
use cloudbankx::{AppError, Config, Result};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudbankx=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Load the account document; a legacy-shaped file is migrated here.
    let store = Arc::new(AccountStore::open_or_create(config.database_path.clone())?);
    tracing::info!(path = %config.database_path.display(), "account document ready");

    let banking = Arc::new(BankingService::new(Arc::clone(&store)));

    let credentials = Arc::new(if config.seed_demo_users {
        tracing::warn!("seeding demo credentials (DEMO_USERS=1)");
        CredentialStore::with_demo_users()?
    } else {
        CredentialStore::new()
    });

    let sessions = Arc::new(match &config.session_secret {
        Some(secret) => SessionKey::new(secret.clone()),
        None => {
            tracing::warn!("SESSION_SECRET not set; sessions will not survive a restart");
            SessionKey::random()
        }
    });

    // Create app state and build the router
    let app_state = AppState::new(store, banking, credentials, sessions);
    let app = api::router(app_state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(())
}
