//! HTTP front end for dish swipe sessions.
//!
//! ## Endpoints
//!
//! All but `/health` require `Authorization: Bearer <token>`.
//!
//! - `GET  /health`: liveness probe
//! - `GET  /cuisine`: every cuisine in the catalog
//! - `POST /startSession`: `{"cuisine": "POLSKA"}` (optional) → first batch
//! - `POST /continueSession`: `{"liked": [...], "disliked": [...], "skipped": [...]}`
//!   → `{"status": "batch" | "complete", "dishes": [...]}`
//! - `GET  /sessionResults`: top recommendations, resets the swipe history
//!
//! ## Example Usage
//!
//! ```ignore
//! let config = ServerConfig::from_env()?;
//! server::start_server(config).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use tokio::signal::ctrl_c;
use tokio::task::JoinHandle;
use tokio::{net::TcpListener, task::spawn_blocking};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::{CurrentUser, IdentityProvider, TokenTable};
pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use routes::{
    continue_session_handler, cuisines_handler, health_handler, session_results_handler,
    start_session_handler,
};

/// Routes plus CORS and request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/cuisine", get(cuisines_handler))
        .route("/startSession", post(start_session_handler))
        .route("/continueSession", post(continue_session_handler))
        .route("/sessionResults", get(session_results_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Periodically drop sessions idle for longer than the configured TTL.
///
/// Returns `None` when eviction is disabled.
pub fn spawn_session_sweeper(state: Arc<AppState>) -> Option<JoinHandle<()>> {
    let ttl = state.config.session_ttl?;
    let every = state.config.sweep_interval;
    info!("Evicting sessions idle for more than {ttl:?}, checking every {every:?}");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let sessions = state.sessions.clone();
            if let Err(e) = spawn_blocking(move || sessions.evict_idle(ttl)).await {
                warn!("Session sweep failed: {e}");
            }
        }
    }))
}

/// Load state from `config`, serve until Ctrl-C / SIGTERM
pub async fn start_server(config: ServerConfig) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::load(config)?;
    let sweeper = spawn_session_sweeper(Arc::clone(&state));

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = build_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
