//! Curses API Server
//!
//! A small CRUD service for curse records (name, start date, end date).
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgresCurseRepository;
use app::{CurseService, PaginatorConfig};
use config::Config;
use domain::ports::CurseRepository;
use error::AppError;

/// Application state shared across all handlers
pub struct AppState<CR: CurseRepository> {
    pub curse_service: Arc<CurseService<CR>>,
    pub paginator: PaginatorConfig,
}

impl<CR: CurseRepository> Clone for AppState<CR> {
    fn clone(&self) -> Self {
        Self {
            curse_service: self.curse_service.clone(),
            paginator: self.paginator,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `TimeoutLayer` answers with an empty 408; give it the usual error body.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return AppError::Timeout.into_response();
    }
    response
}

/// Build the HTTP router for the given repository implementation
pub fn build_router<CR: CurseRepository + 'static>(
    state: AppState<CR>,
    request_timeout: Duration,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
            Method::HEAD,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Curses
        .route(
            "/curses",
            post(handlers::create_curse::<CR>).get(handlers::list_curses::<CR>),
        )
        .route(
            "/curses/:id",
            get(handlers::get_curse::<CR>)
                .patch(handlers::update_curse::<CR>)
                .delete(handlers::delete_curse::<CR>),
        )
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::map_response(timeout_envelope))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,curses_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Curses API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_migrate {
        adapters::postgres::apply_schema(&db)
            .await
            .context("Failed to apply database schema")?;
        tracing::info!("Database schema applied");
    }

    // Create adapters and services
    let curse_repo = Arc::new(PostgresCurseRepository::new(db));
    let curse_service = Arc::new(CurseService::new(curse_repo));

    let state = AppState {
        curse_service,
        paginator: config.paginator,
    };

    let app = build_router(state, config.request_timeout);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::warn!("Received SIGTERM, shutting down");
        }
    }
}
