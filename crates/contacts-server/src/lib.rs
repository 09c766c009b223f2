//! Contacts server: a server-rendered contact list with search, creation
//! and per-contact detail/edit pages.
//!
//! The root route pairs a loader (`GET /?q=`) that lists contacts matching
//! the query with an action (`POST /`) that creates a blank contact and
//! redirects to its edit page. Nested contact routes render into the shell's
//! detail pane.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod view;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::store::{ContactStore, StoreError};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Contact persistence.
    pub store: ContactStore,
    /// Configuration the server was started with.
    pub config: AppConfig,
}

impl AppState {
    /// Open the store described by `config`, seeding it if requested.
    pub async fn new(config: AppConfig) -> Result<Arc<Self>, StoreError> {
        let store = ContactStore::open(config.data_file.clone()).await?;
        if config.seed {
            store.seed_if_empty().await?;
        }
        Ok(Arc::new(Self { store, config }))
    }

    /// State around an existing store.
    pub fn with_store(store: ContactStore, config: AppConfig) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root_loader).post(routes::root_action))
        .route("/app.css", get(routes::stylesheet))
        .route(
            "/contacts/{id}",
            get(routes::contact_page).post(routes::favorite_action),
        )
        .route(
            "/contacts/{id}/edit",
            get(routes::edit_page).post(routes::edit_action),
        )
        .route("/contacts/{id}/destroy", post(routes::destroy_action))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured port and serve until Ctrl+C or SIGTERM.
pub async fn serve(state: Arc<AppState>) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.listen_port);
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "contacts server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("contacts server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
