//! Wire types for the HTTP JSON API.

use serde::{Deserialize, Serialize};

use crate::types::{LocationId, LocationRecord};

/// Response to `POST /api/verify/{id}`.
///
/// The server only confirms that the id exists and names what follows it;
/// it keeps no notion of any player's progress. Sequence correctness is the
/// client's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub location: LocationRecord,
    /// Name of the next location, `None` after the final one.
    pub next_location: Option<String>,
}

/// Response to `GET /api/qr/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    /// Base64 `data:` URL, ready for an `<img>` tag.
    pub qr_code: String,
    pub url: String,
    pub location: LocationRecord,
}

/// One entry of `GET /api/qr/all` (used by the admin poster page).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrBatchEntry {
    pub id: LocationId,
    pub name: String,
    pub qr_code: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// JSON error body for every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
