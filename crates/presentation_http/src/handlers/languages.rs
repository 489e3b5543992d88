//! Supported languages handler

use axum::Json;
use domain::{SupportedLanguage, supported_languages};

/// List the languages the synthesis pipeline supports, sorted by name
pub async fn list_languages() -> Json<Vec<SupportedLanguage>> {
    Json(supported_languages())
}
