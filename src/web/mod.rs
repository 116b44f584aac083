//! Transit departure service.
//!
//! A small REST API that proxies the departure provider for display clients
//! and keeps the latest wearable health reading.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness probe
//! - `GET /health` - Health check with version
//! - `GET /api/next` - Upcoming departures (optional ?limit=)
//! - `POST /api/health` - Store a health reading
//! - `GET /api/health` - Latest health reading

pub mod health_store;

pub use health_store::{HealthReading, HealthStore, HealthUpdate};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::transit::{fetch_departures, DepartureSource, MetrolinxClient, TransitError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the service.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Where departures come from
    source: Arc<dyn DepartureSource>,
    /// Latest health reading
    health: Arc<HealthStore>,
}

impl AppState {
    /// Creates state that fetches from the configured provider.
    pub fn new(config: Config) -> Result<Self, TransitError> {
        let client = MetrolinxClient::new(&config.transit)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Creates state with a custom departure source (for testing).
    #[must_use]
    pub fn with_source(config: Config, source: Arc<dyn DepartureSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            health: Arc::new(HealthStore::new()),
        }
    }

    /// Returns the health store.
    #[must_use]
    pub fn health_store(&self) -> &HealthStore {
        &self.health
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Liveness response for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always "ok".
    pub status: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Query parameters for `GET /api/next`.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    /// Maximum number of departures to return.
    pub limit: Option<usize>,
}

/// Informational response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Maps a provider failure to a response status.
fn transit_error_response(err: &TransitError) -> (StatusCode, Json<ApiError>) {
    let (status, message) = match err {
        TransitError::MissingApiKey => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Departure provider not configured",
        ),
        TransitError::InvalidTime { .. } => {
            (StatusCode::BAD_GATEWAY, "Provider sent an unreadable departure")
        }
        TransitError::Http(_) | TransitError::Status { .. } | TransitError::Body(_) => {
            (StatusCode::BAD_GATEWAY, "Departure provider unavailable")
        }
    };
    warn!(error = %err, status = status.as_u16(), "Departure request failed");
    (status, Json(ApiError::with_details(message, err.to_string())))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Liveness probe.
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Maps an extractor rejection to the JSON error shape.
fn rejection_response(
    status: StatusCode,
    error: &str,
    details: String,
) -> (StatusCode, Json<ApiError>) {
    warn!(status = status.as_u16(), %details, "Rejected request");
    (status, Json(ApiError::with_details(error, details)))
}

/// GET /api/next - Upcoming departures, earliest first.
async fn next_departures(
    State(state): State<AppState>,
    query: Result<Query<NextQuery>, QueryRejection>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let Query(query) = query.map_err(|rejection| {
        rejection_response(rejection.status(), "Invalid query", rejection.body_text())
    })?;
    let transit = &state.config.transit;
    let limit = query.limit.unwrap_or(transit.default_limit);

    let departures = fetch_departures(state.source.as_ref(), limit, transit.time_policy())
        .await
        .map_err(|e| transit_error_response(&e))?;

    if departures.is_empty() {
        return Ok(Json(MessageResponse {
            message: "No upcoming departures".to_string(),
        })
        .into_response());
    }

    Ok(Json(departures).into_response())
}

/// POST /api/health - Replace the stored health reading.
async fn record_health(
    State(state): State<AppState>,
    update: Result<Json<HealthUpdate>, JsonRejection>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let Json(update) = update.map_err(|rejection| {
        rejection_response(rejection.status(), "Invalid health reading", rejection.body_text())
    })?;
    state
        .health
        .record(HealthReading::from_update(update, Utc::now()));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/health - Latest stored health reading.
async fn latest_health(
    State(state): State<AppState>,
) -> Result<Json<HealthReading>, (StatusCode, Json<ApiError>)> {
    state.health.latest().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("No health reading recorded")),
        )
    })
}

// ============================================================================
// Router & Server
// ============================================================================

/// Creates the router with all API routes.
pub fn create_router(state: AppState) -> Router {
    // Display clients and the phone app run on other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/next", get(next_departures))
        .route("/api/health", get(latest_health).post(record_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the departure service.
///
/// # Errors
///
/// Returns an error if the provider client can't be built or the server
/// fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting Bubu transit service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
