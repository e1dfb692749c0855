//! Inventory catalog web application.
//!
//! Items belong to categories; both get list/detail views and
//! create/update/delete forms with server-side validation.
//!
//! # General Flow
//!
//! - Router maps verb/path pairs to handlers
//! - Handlers validate input, read/write the store, and pick a view
//! - Validation failures re-render the originating form with the entered
//!   values and field errors; successes redirect to the canonical URL
//! - Missing ids render the shared error page as a 404
//!
//! The store is MongoDB, reached through one handle built at startup and
//! passed down in the application state. A companion `seeder` binary
//! populates a fresh database with test records.

use axum::{routing::get, Router};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod database;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod state;
pub mod templates;

use routes::{categories, items};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let app = Router::new()
        .route("/", get(routes::home))
        .route("/catalog", get(routes::index))
        .route("/catalog/categories", get(categories::category_list))
        .route(
            "/catalog/categories/create",
            get(categories::category_create_get).post(categories::category_create_post),
        )
        .route("/catalog/categories/{id}", get(categories::category_detail))
        .route(
            "/catalog/categories/{id}/delete",
            get(categories::category_delete_get).post(categories::category_delete_post),
        )
        .route(
            "/catalog/categories/{id}/update",
            get(categories::category_update_get).post(categories::category_update_post),
        )
        .route("/catalog/items", get(items::item_list))
        .route(
            "/catalog/items/create",
            get(items::item_create_get).post(items::item_create_post),
        )
        .route("/catalog/items/{id}", get(items::item_detail))
        .route(
            "/catalog/items/{id}/delete",
            get(items::item_delete_get).post(items::item_delete_post),
        )
        .route(
            "/catalog/items/{id}/update",
            get(items::item_update_get).post(items::item_update_post),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
