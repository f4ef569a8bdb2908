//! Numo API Server
//!
//! Main entry point for the Numo backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use numo_api::clients::OpenAiInterpreter;
use numo_api::{AppState, create_router};
use numo_db::connect_with;
use numo_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "numo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let jwt_service = JwtService::new(config.jwt.clone());

    let interpreter = OpenAiInterpreter::new(&config.numochat)?;
    if interpreter.is_configured() {
        info!(model = %config.numochat.model, "NumoChat interpreter configured");
    } else {
        warn!("NumoChat API key not set; /numochat will be unavailable");
    }

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        interpreter: Arc::new(interpreter),
    };

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
