//! HTTP JSON API.
//!
//! Every request is handled statelessly against the immutable catalog; the
//! server holds no per-player progress, so instances are freely replicated
//! behind a load balancer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::protocol::{ErrorBody, HealthResponse, QrBatchEntry, QrResponse, VerifyResponse};
use crate::qr;
use crate::types::{LocationId, LocationRecord};

/// Shared server state: the catalog plus the base URL baked into QR codes.
pub struct AppState {
    pub catalog: Catalog,
    pub base_url: String,
}

impl AppState {
    pub fn new(catalog: Catalog, base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Location not found")]
    NotFound,

    #[error("Failed to generate QR code")]
    Encode(#[from] qr::EncodeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Encode(e) => {
                tracing::error!("QR code generation error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// All API routes. The static frontend fallback and middleware layers are
/// added in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/locations", get(list_locations))
        .route("/api/location/{id}", get(get_location))
        .route("/api/verify/{id}", post(verify_location))
        .route("/api/qr/all", get(all_location_qrs))
        .route("/api/qr/{id}", get(location_qr))
        .route("/location/{id}", get(scan_redirect))
        .route("/health", get(health))
        .with_state(state)
}

/// GET /api/locations
async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<LocationRecord>> {
    Json(state.catalog.get_all().to_vec())
}

/// GET /api/location/{id}
async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LocationId>,
) -> Result<Json<LocationRecord>, ApiError> {
    let location = state.catalog.get_by_id(id).ok_or(ApiError::NotFound)?;
    Ok(Json(location.clone()))
}

/// POST /api/verify/{id}
///
/// Confirms the id is a real location and names what follows it. There is
/// deliberately no server-side progress check; sequence authority lives in
/// the client.
async fn verify_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LocationId>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let location = state.catalog.get_by_id(id).ok_or(ApiError::NotFound)?;
    let next_location = state.catalog.get_by_id(id + 1).map(|next| next.name.clone());

    Ok(Json(VerifyResponse {
        success: true,
        location: location.clone(),
        next_location,
    }))
}

/// GET /api/qr/{id}
async fn location_qr(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LocationId>,
) -> Result<Json<QrResponse>, ApiError> {
    let location = state.catalog.get_by_id(id).ok_or(ApiError::NotFound)?;

    let url = qr::location_url(&state.base_url, id);
    let qr_code = qr::encode_data_url(&url)?;

    Ok(Json(QrResponse {
        qr_code,
        url,
        location: location.clone(),
    }))
}

/// GET /api/qr/all
async fn all_location_qrs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QrBatchEntry>>, ApiError> {
    let mut entries = Vec::with_capacity(state.catalog.get_all().len());
    for location in state.catalog.get_all() {
        let url = qr::location_url(&state.base_url, location.id);
        entries.push(QrBatchEntry {
            id: location.id,
            name: location.name.clone(),
            qr_code: qr::encode_data_url(&url)?,
            url,
        });
    }
    Ok(Json(entries))
}

/// GET /location/{id}
///
/// Landing route for codes scanned with a regular camera app instead of the
/// in-game scanner; hands the id to the frontend as a query parameter.
async fn scan_redirect(Path(id): Path<LocationId>) -> Redirect {
    Redirect::temporary(&format!("/?location={}", id))
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
