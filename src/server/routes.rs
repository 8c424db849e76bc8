//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::cluster::ClusterSettings;
use crate::coord::point::decode;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::{GeocodeSource, Geocoder};
use crate::map::{refresh, MapSnapshot};
use crate::server::state::AppState;
use crate::store::FleetSource;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router<S: FleetSource + 'static>(state: Arc<AppState<S>>) -> Router {
    // Try relative to cwd first, then next to the executable
    let static_path = if Path::new("static").exists() {
        PathBuf::from("static")
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
            .filter(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from("static"))
    };

    Router::new()
        .route("/api/map", get(map_handler::<S>))
        .route("/api/geocode", get(geocode_handler::<S>))
        .route("/api/point", get(point_handler))
        .route("/api/status", get(status_handler::<S>))
        .route("/api/formats", get(formats_handler))
        .fallback_service(ServeDir::new(static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "STORE_ERROR" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::PointParse(_) => "POINT_PARSE",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Store(_) | Error::Http(_) => "STORE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Map request query
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    /// Zoom level; the configured default when absent
    pub zoom: Option<u8>,
}

/// Fetch the fleet and return a clustered snapshot
///
/// GET /api/map?zoom=N
async fn map_handler<S: FleetSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapSnapshot>, ApiError> {
    let zoom = query.zoom.unwrap_or(state.default_zoom);
    let snapshot = refresh(&state.source, zoom, &state.cluster, &state.geocoder).await?;
    Ok(Json(snapshot))
}

/// Geocode request query
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// Geocode response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub query: String,
    pub lat: f64,
    pub lng: f64,
    pub source: GeocodeSource,
}

/// Resolve a location name
///
/// GET /api/geocode?q=...
async fn geocode_handler<S: FleetSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<GeocodeQuery>,
) -> Json<GeocodeResponse> {
    let result = state.geocoder.resolve(&query.q);
    Json(GeocodeResponse {
        query: query.q,
        lat: result.coords.lat,
        lng: result.coords.lng,
        source: result.source,
    })
}

/// Point literal query
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub literal: String,
}

/// Decode a point literal
///
/// GET /api/point?literal=(x,y)
async fn point_handler(Query(query): Query<PointQuery>) -> Result<Json<Coordinates>, ApiError> {
    Ok(Json(decode(&query.literal)?))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Fleet source name
    pub source: String,
    /// Active clustering thresholds
    pub cluster: ClusterSettings,
    /// Zoom used when a map request gives none
    pub default_zoom: u8,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<S: FleetSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.name().to_string(),
        cluster: state.cluster,
        default_zoom: state.default_zoom,
        uptime_secs: state.uptime_secs(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}
