//! QR code generation for location posters.
//!
//! Each location gets a QR code encoding its canonical scan URL. Codes are
//! rendered as SVG and wrapped in a base64 `data:` URL so the admin page can
//! drop them straight into an `<img>` tag.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::render::svg;
use qrcode::QrCode;

use crate::types::LocationId;

/// Rendered side length in pixels.
const QR_SIZE: u32 = 300;
const QR_DARK: &str = "#000000";
const QR_LIGHT: &str = "#ffffff";

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// The canonical URL a location's QR code points at. Scanning it outside
/// the app lands on the frontend with the id as a query parameter.
pub fn location_url(base_url: &str, id: LocationId) -> String {
    format!("{}/location/{}", base_url.trim_end_matches('/'), id)
}

/// Render `url` as an SVG QR code wrapped in a base64 `data:` URL.
pub fn encode_data_url(url: &str) -> Result<String, EncodeError> {
    let code = QrCode::new(url.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .dark_color(svg::Color(QR_DARK))
        .light_color(svg::Color(QR_LIGHT))
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}
